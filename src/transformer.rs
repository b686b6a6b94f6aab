//! Prompt synthesis from detected frameworks and user parameters.
//!
//! Composition order is fixed: use-case framing, then one scaffold block per
//! applicable framework in detector order, then the parameter-driven closing
//! block. An empty framework set still yields framing plus closing.

use crate::error::{EnhancerError, Result};
use crate::frameworks::{self, FrameworkCandidate, FrameworkId, ScaffoldContext};
use crate::parameters::PromptParameters;
use crate::use_case::UseCase;
use serde::{Deserialize, Serialize};

/// Heading of the closing block.
pub const CLOSING_HEADING: &str = "## Output Requirements";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Framing,
    Scaffold,
    Closing,
}

/// One block of the composed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSection {
    pub kind: SectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<FrameworkId>,
    /// Empty for the framing block.
    pub heading: String,
    pub body: String,
}

impl PromptSection {
    pub fn text(&self) -> String {
        if self.heading.is_empty() {
            self.body.clone()
        } else {
            format!("{}\n{}", self.heading, self.body)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedPrompt {
    pub final_prompt: String,
    /// Applicable candidates, in detector order.
    pub frameworks_applied: Vec<FrameworkId>,
    pub use_case: UseCase,
    pub source_input: String,
    /// How `final_prompt` was assembled, block by block.
    pub sections: Vec<PromptSection>,
}

/// String-labelled entry point: parses `use_case` and delegates to [`transform`].
///
/// # Errors
/// `EnhancerError::Validation` for an unrecognized use-case label, blank input
/// or out-of-range parameters.
pub fn transform_prompt(
    input: &str,
    candidates: &[FrameworkCandidate],
    params: &PromptParameters,
    use_case: &str,
) -> Result<EnhancedPrompt> {
    let use_case: UseCase = use_case.parse()?;
    transform(input, candidates, params, use_case)
}

/// Synthesize the enhanced prompt.
pub fn transform(
    input: &str,
    candidates: &[FrameworkCandidate],
    params: &PromptParameters,
    use_case: UseCase,
) -> Result<EnhancedPrompt> {
    let request = input.trim();
    if request.is_empty() {
        return Err(EnhancerError::validation("input must not be blank"));
    }
    params.validate()?;

    let frameworks_applied: Vec<FrameworkId> = candidates
        .iter()
        .filter(|c| c.applicable)
        .map(|c| c.framework)
        .collect();

    let ctx = ScaffoldContext {
        input: request,
        params,
        use_case,
    };

    let mut sections = Vec::with_capacity(frameworks_applied.len() + 2);
    sections.push(PromptSection {
        kind: SectionKind::Framing,
        framework: None,
        heading: String::new(),
        body: format!("{}\n\nRequest: \"{}\"", use_case.framing(), request),
    });
    for &id in &frameworks_applied {
        sections.push(PromptSection {
            kind: SectionKind::Scaffold,
            framework: Some(id),
            heading: id.heading(),
            body: frameworks::scaffold(id, &ctx),
        });
    }
    sections.push(PromptSection {
        kind: SectionKind::Closing,
        framework: None,
        heading: CLOSING_HEADING.to_string(),
        body: closing_block(params),
    });

    let final_prompt = sections
        .iter()
        .map(PromptSection::text)
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(EnhancedPrompt {
        final_prompt,
        frameworks_applied,
        use_case,
        source_input: input.to_string(),
        sections,
    })
}

fn closing_block(params: &PromptParameters) -> String {
    [
        format!("- Format: {}", params.output_format.shape_instruction(params.word_count)),
        format!("- Length: Aim for approximately {} words.", params.word_count),
        format!(
            "- Tone: Use a {} tone that is {}.",
            params.tone,
            params.tone.phrasing()
        ),
        format!("- Audience: {}", params.audience_level.register()),
    ]
    .join("\n")
}
