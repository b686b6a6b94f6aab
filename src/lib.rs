//! prompt-enhancer: rewrites a rough prompt into a structured one.
//!
//! Pipeline: [`detect_frameworks`] scores each catalog framework against the
//! input, [`classify_use_case`] picks a domain, and [`transform_prompt`]
//! composes the final prompt from the applicable scaffolds and the caller's
//! parameters. Persistence and transport sit around this pure core.

pub mod config;
pub mod deserializers;
pub mod engine;
pub mod error;
pub mod frameworks;
pub mod http;
pub mod parameters;
pub mod storage;
pub mod transformer;
pub mod use_case;

pub use engine::{Enhancement, PromptService};
pub use error::{EnhancerError, Result};
pub use frameworks::{FrameworkCandidate, FrameworkId, detect_frameworks};
pub use parameters::{AudienceLevel, OutputFormat, PromptParameters, Tone};
pub use transformer::{EnhancedPrompt, transform, transform_prompt};
pub use use_case::{UseCase, classify_use_case};
