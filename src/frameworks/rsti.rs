//! RSTI framework: Request, Style, Tone, Intent.

use super::cues::matched;
use super::{Detection, ScaffoldContext};
use crate::parameters::OutputFormat;
use crate::use_case::UseCase;

/// Named genres and media that carry style conventions
pub const STYLE_CUES: &[&str] = &[
    "style",
    "voice",
    "blog",
    "post",
    "email",
    "letter",
    "essay",
    "story",
    "article",
    "newsletter",
];

/// Explicit tone words
pub const TONE_CUES: &[&str] = &[
    "tone",
    "casual",
    "formal",
    "friendly",
    "professional",
    "playful",
    "engaging",
    "persuasive",
];

/// Phrases that reveal the purpose behind the request
pub const INTENT_CUES: &[&str] = &[
    "persuade",
    "convince",
    "inform",
    "inspire",
    "entertain",
    "readers",
    "audience",
    "so that",
];

/// Applicable when any style, tone or intent cue is present.
pub(crate) fn detect(lower: &str, _raw: &str) -> Detection {
    let mut detection = Detection::from_signals(vec![
        ("style cue", matched(lower, STYLE_CUES)),
        ("tone cue", matched(lower, TONE_CUES)),
        ("intent cue", matched(lower, INTENT_CUES)),
    ]);
    detection.applicable = !detection.fired.is_empty();
    detection
}

fn intent_line(use_case: UseCase) -> &'static str {
    match use_case {
        UseCase::Marketing => "move the reader toward one clear call to action",
        UseCase::Technical => "help the reader apply the material correctly",
        UseCase::Creative => "leave the reader with a vivid, memorable impression",
        UseCase::Analysis => "support every conclusion with the evidence behind it",
        UseCase::General => "leave the reader better informed than before",
    }
}

pub(crate) fn scaffold(ctx: &ScaffoldContext<'_>) -> String {
    let style = match ctx.params.output_format {
        OutputFormat::Article => "a well-edited long-form piece: strong hook, smooth transitions, varied sentence length",
        OutputFormat::List => "skimmable writing: parallel phrasing and one idea per item",
        OutputFormat::Code => "clean technical prose: short sentences and consistent terminology",
        OutputFormat::Email => "a good email: get to the point in the first two lines",
        OutputFormat::Summary => "a crisp brief: lead with the conclusion, cut filler",
    };
    let lines = [
        "- Request: Restate the core request to yourself in one sentence and answer exactly that.".to_string(),
        format!("- Style: Follow the conventions of {}.", style),
        format!(
            "- Tone: Keep the voice {} ({}).",
            ctx.params.tone.phrasing(),
            ctx.params.tone
        ),
        format!(
            "- Intent: Every paragraph should {}.",
            intent_line(ctx.use_case)
        ),
    ];
    lines.join("\n")
}
