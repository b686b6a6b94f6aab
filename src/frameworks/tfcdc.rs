//! TFCDC framework: Technical, Format, Content, Detail, Constraints.

use super::cues::{matched, structural_cues};
use super::{Detection, ScaffoldContext};
use crate::parameters::{AudienceLevel, OutputFormat};

/// Technical subject matter
pub const TECHNICAL_CUES: &[&str] = &[
    "api",
    "code",
    "function",
    "technical",
    "documentation",
    "endpoint",
    "schema",
    "database",
    "algorithm",
    "implement",
];

/// Explicit requests for an output format
pub const FORMAT_CUES: &[&str] = &[
    "format",
    "table",
    "json",
    "markdown",
    "bullet",
    "list",
    "step-by-step",
    "steps",
    "outline",
];

/// Hard requirements and limits
pub const CONSTRAINT_CUES: &[&str] = &[
    "must",
    "should not",
    "no more than",
    "at least",
    "limit",
    "constraint",
    "within",
    "only",
];

/// Applicable when any technical, format, constraint or structural cue is present.
pub(crate) fn detect(lower: &str, raw: &str) -> Detection {
    let mut detection = Detection::from_signals(vec![
        ("technical cue", matched(lower, TECHNICAL_CUES)),
        ("format cue", matched(lower, FORMAT_CUES)),
        ("constraint cue", matched(lower, CONSTRAINT_CUES)),
        ("structure", structural_cues(raw)),
    ]);
    detection.applicable = !detection.fired.is_empty();
    detection
}

pub(crate) fn scaffold(ctx: &ScaffoldContext<'_>) -> String {
    let technical = match ctx.params.audience_level {
        AudienceLevel::Beginner => "Be accurate, and define every technical term the first time it appears.",
        AudienceLevel::Intermediate => "Be accurate and specific; name the concrete tools, values or steps involved.",
        AudienceLevel::Expert => "Be exact: include precise terminology, trade-offs and failure modes.",
    };
    let format = match ctx.params.output_format {
        OutputFormat::Article => "Use descriptive section headings and short paragraphs.",
        OutputFormat::List => "Use a bulleted list; keep items parallel and self-contained.",
        OutputFormat::Code => "Put all code in fenced blocks with a language tag, followed by a brief explanation.",
        OutputFormat::Email => "Use a subject line, short paragraphs and a single clear closing request.",
        OutputFormat::Summary => "Use one opening sentence with the key takeaway, then supporting points.",
    };
    let given = structural_cues(ctx.input);
    let constraints = if given.is_empty() {
        "Honor every explicit requirement in the request; do not invent facts, figures or interfaces.".to_string()
    } else {
        format!(
            "Honor every explicit requirement in the request and keep its {} structure; do not invent facts, figures or interfaces.",
            given.join(" and ")
        )
    };
    let lines = [
        format!("- Technical: {}", technical),
        format!("- Format: {}", format),
        "- Content: Cover everything the request asks for before adding optional extras.".to_string(),
        format!(
            "- Detail: Spend the roughly {} words on depth rather than breadth.",
            ctx.params.word_count
        ),
        format!("- Constraints: {}", constraints),
    ];
    lines.join("\n")
}
