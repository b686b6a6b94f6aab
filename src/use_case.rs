//! Use-case classification for prompt enhancement
//!
//! Maps free text to one coarse intent label using keyword groups checked in a
//! fixed priority order. The first group with any hit wins.

use crate::error::{EnhancerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keywords that indicate marketing content (campaigns, ads, brand work)
pub const MARKETING_KEYWORDS: &[&str] = &[
    "marketing",
    "advertis",
    "copy",
    "campaign",
    "slogan",
    "brand",
    "sales",
    "landing page",
    "product launch",
];

/// Keywords that indicate technical content (code, APIs, systems)
pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "code",
    "api",
    "technical",
    "programming",
    "software",
    "debug",
    "function",
    "database",
    "algorithm",
];

/// Keywords that indicate creative writing
pub const CREATIVE_KEYWORDS: &[&str] = &[
    "story",
    "creative",
    "poem",
    "poetry",
    "fiction",
    "novel",
    "narrative",
    "lyrics",
    "screenplay",
];

/// Keywords that indicate analytical work
pub const ANALYSIS_KEYWORDS: &[&str] = &[
    "analyze",
    "analyse",
    "analysis",
    "data",
    "insight",
    "compare",
    "trend",
    "statistic",
    "research",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Marketing,
    Technical,
    Creative,
    Analysis,
    General,
}

impl UseCase {
    pub const ALL: [UseCase; 5] = [
        UseCase::Marketing,
        UseCase::Technical,
        UseCase::Creative,
        UseCase::Analysis,
        UseCase::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::Marketing => "marketing",
            UseCase::Technical => "technical",
            UseCase::Creative => "creative",
            UseCase::Analysis => "analysis",
            UseCase::General => "general",
        }
    }

    /// Opening sentence of an enhanced prompt for this use case.
    pub fn framing(&self) -> &'static str {
        match self {
            UseCase::Marketing => {
                "You are an experienced marketing strategist who writes persuasive, audience-focused copy that drives action."
            }
            UseCase::Technical => {
                "You are a senior engineer and technical writer who produces precise, accurate and well-structured technical material."
            }
            UseCase::Creative => {
                "You are an imaginative creative writer with a strong command of narrative, imagery and voice."
            }
            UseCase::Analysis => {
                "You are a rigorous analyst who turns information into clear, evidence-based insight."
            }
            UseCase::General => {
                "You are a knowledgeable assistant who produces clear, well-organized and genuinely useful content."
            }
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = EnhancerError;

    fn from_str(s: &str) -> Result<Self> {
        UseCase::ALL
            .iter()
            .copied()
            .find(|uc| uc.as_str() == s)
            .ok_or_else(|| {
                EnhancerError::validation(format!(
                    "unrecognized use case '{}'; expected one of: marketing, technical, creative, analysis, general",
                    s
                ))
            })
    }
}

/// Classify input text into a use case.
///
/// Lower-cases the text and checks the keyword groups in priority order:
/// marketing, technical, creative, analysis. Returns `UseCase::General`
/// when nothing matches.
///
/// # Examples
/// ```
/// use prompt_enhancer::use_case::{classify_use_case, UseCase};
///
/// assert_eq!(classify_use_case("Draft a campaign slogan"), UseCase::Marketing);
/// assert_eq!(classify_use_case("Help me write a blog post about coffee"), UseCase::General);
/// ```
pub fn classify_use_case(input: &str) -> UseCase {
    let lower = input.to_lowercase();

    let groups = [
        (UseCase::Marketing, MARKETING_KEYWORDS),
        (UseCase::Technical, TECHNICAL_KEYWORDS),
        (UseCase::Creative, CREATIVE_KEYWORDS),
        (UseCase::Analysis, ANALYSIS_KEYWORDS),
    ];

    groups
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(use_case, _)| *use_case)
        .unwrap_or(UseCase::General)
}
