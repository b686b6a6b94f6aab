//! Prompting framework catalog and detection.
//!
//! The catalog is fixed: TCREI, RSTI and TFCDC, always reported in that order.
//! Each framework lives in its own module with a detection predicate over
//! surface cues and a scaffold template. Dispatch is a `match` on
//! [`FrameworkId`]; there is no runtime registry.
//! Deterministic and dependency-free apart from the structural regexes.

pub(crate) mod cues;
pub mod rsti;
pub mod tcrei;
pub mod tfcdc;

use crate::parameters::PromptParameters;
use crate::use_case::UseCase;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FrameworkId {
    Tcrei,
    Rsti,
    Tfcdc,
}

impl FrameworkId {
    /// Catalog order.
    pub const ALL: [FrameworkId; 3] = [FrameworkId::Tcrei, FrameworkId::Rsti, FrameworkId::Tfcdc];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkId::Tcrei => "TCREI",
            FrameworkId::Rsti => "RSTI",
            FrameworkId::Tfcdc => "TFCDC",
        }
    }

    /// The words the acronym stands for.
    pub fn components(&self) -> &'static [&'static str] {
        match self {
            FrameworkId::Tcrei => &["Task", "Context", "References", "Evaluate", "Iterate"],
            FrameworkId::Rsti => &["Request", "Style", "Tone", "Intent"],
            FrameworkId::Tfcdc => &["Technical", "Format", "Content", "Detail", "Constraints"],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FrameworkId::Tcrei => "Frames a concrete task with context, references and a self-check loop",
            FrameworkId::Rsti => "Shapes the style, tone and intent of audience-facing writing",
            FrameworkId::Tfcdc => "Adds structure, detail and hard constraints for technical or formatted output",
        }
    }

    /// Heading used for this framework's scaffold block.
    pub fn heading(&self) -> String {
        format!("## {} ({})", self.components().join(", "), self.as_str())
    }

    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        FrameworkId::ALL.iter().copied().find(|id| id.as_str() == upper)
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry's verdict for a given input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkCandidate {
    pub framework: FrameworkId,
    pub applicable: bool,
    /// Share of the framework's signal kinds that fired, 0.0 to 1.0.
    pub confidence: f32,
    pub rationale: String,
}

/// A signal kind that fired, with the cues that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Signal {
    pub kind: &'static str,
    pub cues: Vec<&'static str>,
}

/// Raw predicate result before it becomes a [`FrameworkCandidate`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Detection {
    pub fired: Vec<Signal>,
    pub kinds: usize,
    pub applicable: bool,
}

impl Detection {
    /// Collects non-empty signals in the order given.
    pub(crate) fn from_signals(candidates: Vec<(&'static str, Vec<&'static str>)>) -> Self {
        let kinds = candidates.len();
        let fired = candidates
            .into_iter()
            .filter(|(_, cues)| !cues.is_empty())
            .map(|(kind, cues)| Signal { kind, cues })
            .collect();
        Self {
            fired,
            kinds,
            applicable: false,
        }
    }

    pub(crate) fn has(&self, kind: &str) -> bool {
        self.fired.iter().any(|s| s.kind == kind)
    }

    fn into_candidate(self, framework: FrameworkId) -> FrameworkCandidate {
        let confidence = if self.kinds == 0 {
            0.0
        } else {
            ((self.fired.len() as f32 / self.kinds as f32) * 100.0).round() / 100.0
        };
        let rationale = if self.fired.is_empty() {
            "no cues matched".to_string()
        } else {
            let parts: Vec<String> = self
                .fired
                .iter()
                .map(|s| format!("{} ({})", s.kind, s.cues.join(", ")))
                .collect();
            let verdict = if self.applicable {
                "applicable"
            } else {
                "below threshold"
            };
            format!("{}: {}", verdict, parts.join("; "))
        };
        FrameworkCandidate {
            framework,
            applicable: self.applicable,
            confidence,
            rationale,
        }
    }
}

/// Inputs available to a scaffold template.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldContext<'a> {
    pub input: &'a str,
    pub params: &'a PromptParameters,
    pub use_case: UseCase,
}

/// Scaffold body for one framework.
pub fn scaffold(framework: FrameworkId, ctx: &ScaffoldContext<'_>) -> String {
    match framework {
        FrameworkId::Tcrei => tcrei::scaffold(ctx),
        FrameworkId::Rsti => rsti::scaffold(ctx),
        FrameworkId::Tfcdc => tfcdc::scaffold(ctx),
    }
}

/// Classify `input` against every framework in the catalog.
///
/// Always returns one candidate per catalog entry, in catalog order. Total over
/// all strings: the empty string yields every candidate non-applicable.
pub fn detect_frameworks(input: &str) -> Vec<FrameworkCandidate> {
    let lower = input.to_lowercase();
    FrameworkId::ALL
        .iter()
        .map(|&id| {
            let detection = match id {
                FrameworkId::Tcrei => tcrei::detect(&lower, input),
                FrameworkId::Rsti => rsti::detect(&lower, input),
                FrameworkId::Tfcdc => tfcdc::detect(&lower, input),
            };
            detection.into_candidate(id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_size() {
        let long = "x".repeat(50_000);
        for input in ["", "hello", "Write technical API docs", long.as_str()] {
            let ids: Vec<FrameworkId> = detect_frameworks(input).iter().map(|c| c.framework).collect();
            assert_eq!(ids, FrameworkId::ALL.to_vec());
        }
    }

    #[test]
    fn test_empty_input_is_never_applicable() {
        let candidates = detect_frameworks("");
        assert!(candidates.iter().all(|c| !c.applicable));
        assert!(candidates.iter().all(|c| c.confidence == 0.0));
        assert!(candidates.iter().all(|c| c.rationale == "no cues matched"));
    }

    #[test]
    fn test_blog_request() {
        let candidates = detect_frameworks("Help me write a blog post about coffee");
        assert!(candidates[0].applicable, "TCREI: task verb present");
        assert!(candidates[1].applicable, "RSTI: blog/post style cue");
        assert!(!candidates[2].applicable, "TFCDC: nothing technical");
        assert!(candidates[0].rationale.contains("write"));
    }

    #[test]
    fn test_technical_request() {
        let candidates = detect_frameworks("Write technical API documentation for our REST endpoints");
        assert!(candidates[0].applicable);
        assert!(!candidates[1].applicable);
        assert!(candidates[2].applicable);
        assert!(candidates[2].rationale.contains("api"));
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let lower = detect_frameworks("use a formal tone");
        let upper = detect_frameworks("USE A FORMAL TONE");
        assert_eq!(lower, upper);
        assert!(lower[1].applicable);
    }

    #[test]
    fn test_confidence_in_unit_range() {
        let candidates = detect_frameworks(
            "Write an engaging blog post about our API, for example a tutorial. Use a table and keep it under the limit.",
        );
        for c in candidates {
            assert!((0.0..=1.0).contains(&c.confidence), "{:?}", c);
        }
    }

    #[test]
    fn test_framework_id_parse_and_serde() {
        assert_eq!(FrameworkId::parse("tcrei"), Some(FrameworkId::Tcrei));
        assert_eq!(FrameworkId::parse("nope"), None);
        assert_eq!(serde_json::to_string(&FrameworkId::Tfcdc).unwrap(), "\"TFCDC\"");
    }
}
