//! TCREI framework: Task, Context, References, Evaluate, Iterate.

use super::cues::{matched, sentence_count};
use super::{Detection, ScaffoldContext};
use crate::parameters::AudienceLevel;

/// Verbs that mark the input as a concrete task
pub const TASK_VERBS: &[&str] = &[
    "write",
    "create",
    "draft",
    "generate",
    "help me",
    "build",
    "make",
    "design",
    "plan",
    "explain",
    "summarize",
    "describe",
    "develop",
];

/// Phrases that supply background or situational context
pub const CONTEXT_CUES: &[&str] = &[
    "about",
    "for my",
    "for our",
    "because",
    "background",
    "context",
    "audience",
];

/// Phrases that point at examples or reference material
pub const REFERENCE_CUES: &[&str] = &[
    "example",
    "such as",
    "e.g.",
    "like this",
    "sample",
    "reference",
    "similar to",
];

/// Applicable when a task verb is present, or when at least two signal kinds fire.
pub(crate) fn detect(lower: &str, raw: &str) -> Detection {
    let multi_sentence = if sentence_count(raw) >= 2 {
        vec!["multiple sentences"]
    } else {
        vec![]
    };
    let mut detection = Detection::from_signals(vec![
        ("task verb", matched(lower, TASK_VERBS)),
        ("context cue", matched(lower, CONTEXT_CUES)),
        ("reference cue", matched(lower, REFERENCE_CUES)),
        ("structure", multi_sentence),
    ]);
    detection.applicable = detection.has("task verb") || detection.fired.len() >= 2;
    detection
}

pub(crate) fn scaffold(ctx: &ScaffoldContext<'_>) -> String {
    let reader = ctx.params.audience_level.as_str();
    let references = match ctx.params.audience_level {
        AudienceLevel::Beginner => "Include at least one simple, everyday example for each key idea.",
        AudienceLevel::Intermediate => {
            "Include concrete examples where they make an idea easier to apply."
        }
        AudienceLevel::Expert => {
            "Reference established practice, edge cases or counter-examples where they sharpen the point."
        }
    };
    let lines = [
        format!(
            "- Task: Complete the request above in full, treating it as a {} task.",
            ctx.use_case
        ),
        format!(
            "- Context: The reader is at the {} level; state any background they need before relying on it.",
            reader
        ),
        format!("- References: {}", references),
        format!(
            "- Evaluate: Before finishing, check that every part of the request is answered and that the {} tone holds throughout.",
            ctx.params.tone
        ),
        "- Iterate: Where the request is ambiguous, state the assumption you made and suggest one follow-up that would refine the result.".to_string(),
    ];
    lines.join("\n")
}
