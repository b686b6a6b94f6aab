//! User-chosen parameters that modulate the wording of an enhanced prompt.
//!
//! `PromptParameters` is the fully validated form the transformer consumes.
//! `RawPromptParameters` is what arrives over the wire, with every field optional.

use crate::deserializers::{de_option_label, de_option_u32_forgiving};
use crate::error::{EnhancerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound for the requested length of the generated output.
pub const MAX_WORD_COUNT: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceLevel {
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    Professional,
    Friendly,
    Authoritative,
    Playful,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Article,
    List,
    Code,
    Email,
    Summary,
}

impl AudienceLevel {
    pub const ALL: [AudienceLevel; 3] = [
        AudienceLevel::Beginner,
        AudienceLevel::Intermediate,
        AudienceLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceLevel::Beginner => "beginner",
            AudienceLevel::Intermediate => "intermediate",
            AudienceLevel::Expert => "expert",
        }
    }

    /// Vocabulary and complexity register for this audience.
    pub fn register(&self) -> &'static str {
        match self {
            AudienceLevel::Beginner => {
                "Write for beginners: use plain language, define any jargon, and explain each idea step by step."
            }
            AudienceLevel::Intermediate => {
                "Write for an intermediate audience: assume working familiarity with the basics and focus on practical depth."
            }
            AudienceLevel::Expert => {
                "Write for experts: use precise domain terminology, skip introductory material, and go deep on nuance."
            }
        }
    }
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Casual,
        Tone::Professional,
        Tone::Friendly,
        Tone::Authoritative,
        Tone::Playful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Authoritative => "authoritative",
            Tone::Playful => "playful",
        }
    }

    /// Phrasing register for this tone.
    pub fn phrasing(&self) -> &'static str {
        match self {
            Tone::Casual => "relaxed and conversational, as if talking to a friend",
            Tone::Professional => "polished, clear and businesslike",
            Tone::Friendly => "warm, approachable and encouraging",
            Tone::Authoritative => "confident, decisive and backed by evidence",
            Tone::Playful => "light-hearted and witty without losing substance",
        }
    }
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Article,
        OutputFormat::List,
        OutputFormat::Code,
        OutputFormat::Email,
        OutputFormat::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Article => "article",
            OutputFormat::List => "list",
            OutputFormat::Code => "code",
            OutputFormat::Email => "email",
            OutputFormat::Summary => "summary",
        }
    }

    /// Instruction describing the requested output shape.
    pub fn shape_instruction(&self, word_count: u32) -> String {
        match self {
            OutputFormat::Article => format!(
                "Write an article of approximately {} words with a title, an introduction, clearly headed sections and a conclusion.",
                word_count
            ),
            OutputFormat::List => format!(
                "Produce a bulleted list of approximately {} words in total, one distinct point per bullet.",
                word_count
            ),
            OutputFormat::Code => format!(
                "Produce working code in fenced code blocks, with approximately {} words of accompanying explanation.",
                word_count
            ),
            OutputFormat::Email => format!(
                "Write an email of approximately {} words with a subject line, greeting, body and sign-off.",
                word_count
            ),
            OutputFormat::Summary => format!(
                "Write a summary of approximately {} words that leads with the key takeaway.",
                word_count
            ),
        }
    }
}

macro_rules! label_impls {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = EnhancerError;

            fn from_str(s: &str) -> Result<Self> {
                let lower = s.trim().to_lowercase();
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == lower)
                    .ok_or_else(|| {
                        let valid: Vec<&str> = <$ty>::ALL.iter().map(|v| v.as_str()).collect();
                        EnhancerError::validation(format!(
                            "unknown {} '{}'; expected one of: {}",
                            $what,
                            s,
                            valid.join(", ")
                        ))
                    })
            }
        }
    };
}

label_impls!(AudienceLevel, "audienceLevel");
label_impls!(Tone, "tone");
label_impls!(OutputFormat, "outputFormat");

/// Fully populated parameters for one transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptParameters {
    pub audience_level: AudienceLevel,
    pub tone: Tone,
    pub output_format: OutputFormat,
    pub word_count: u32,
}

impl Default for PromptParameters {
    fn default() -> Self {
        Self {
            audience_level: AudienceLevel::Intermediate,
            tone: Tone::Professional,
            output_format: OutputFormat::Article,
            word_count: 800,
        }
    }
}

impl PromptParameters {
    /// Check the numeric constraints that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.word_count == 0 {
            return Err(EnhancerError::validation("wordCount must be positive"));
        }
        if self.word_count > MAX_WORD_COUNT {
            return Err(EnhancerError::validation(format!(
                "wordCount {} exceeds the maximum of {}",
                self.word_count, MAX_WORD_COUNT
            )));
        }
        Ok(())
    }
}

/// Wire form of [`PromptParameters`]; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPromptParameters {
    #[serde(default, deserialize_with = "de_option_label")]
    pub audience_level: Option<String>,
    #[serde(default, deserialize_with = "de_option_label")]
    pub tone: Option<String>,
    #[serde(default, deserialize_with = "de_option_label")]
    pub output_format: Option<String>,
    #[serde(default, deserialize_with = "de_option_u32_forgiving")]
    pub word_count: Option<u32>,
}

impl TryFrom<RawPromptParameters> for PromptParameters {
    type Error = EnhancerError;

    fn try_from(raw: RawPromptParameters) -> Result<Self> {
        let mut missing = Vec::new();
        if raw.audience_level.is_none() {
            missing.push("audienceLevel");
        }
        if raw.tone.is_none() {
            missing.push("tone");
        }
        if raw.output_format.is_none() {
            missing.push("outputFormat");
        }
        if raw.word_count.is_none() {
            missing.push("wordCount");
        }
        if !missing.is_empty() {
            return Err(EnhancerError::validation(format!(
                "missing required parameter fields: {}",
                missing.join(", ")
            )));
        }

        let params = PromptParameters {
            audience_level: raw.audience_level.unwrap_or_default().parse()?,
            tone: raw.tone.unwrap_or_default().parse()?,
            output_format: raw.output_format.unwrap_or_default().parse()?,
            word_count: raw.word_count.unwrap_or_default(),
        };
        params.validate()?;
        Ok(params)
    }
}

impl From<PromptParameters> for RawPromptParameters {
    fn from(params: PromptParameters) -> Self {
        Self {
            audience_level: Some(params.audience_level.to_string()),
            tone: Some(params.tone.to_string()),
            output_format: Some(params.output_format.to_string()),
            word_count: Some(params.word_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawPromptParameters {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_raw_parameters_convert() {
        let params = PromptParameters::try_from(raw(
            r#"{"audienceLevel":"Expert","tone":"casual","outputFormat":"list","wordCount":"250"}"#,
        ))
        .unwrap();
        assert_eq!(params.audience_level, AudienceLevel::Expert);
        assert_eq!(params.tone, Tone::Casual);
        assert_eq!(params.output_format, OutputFormat::List);
        assert_eq!(params.word_count, 250);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = PromptParameters::try_from(raw(r#"{"tone":"casual"}"#)).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, EnhancerError::Validation { .. }));
        assert!(msg.contains("audienceLevel"));
        assert!(msg.contains("outputFormat"));
        assert!(msg.contains("wordCount"));
        assert!(!msg.contains("tone,"));
    }

    #[test]
    fn test_unknown_label_lists_valid_values() {
        let err = "sarcastic".parse::<Tone>().unwrap_err().to_string();
        assert!(err.contains("sarcastic"));
        assert!(err.contains("professional"));
    }

    #[test]
    fn test_word_count_bounds() {
        let mut params = PromptParameters::default();
        assert!(params.validate().is_ok());
        params.word_count = 0;
        assert!(params.validate().is_err());
        params.word_count = MAX_WORD_COUNT + 1;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(PromptParameters::default()).unwrap();
        assert_eq!(json["audienceLevel"], "intermediate");
        assert_eq!(json["outputFormat"], "article");
        assert_eq!(json["wordCount"], 800);
    }

    #[test]
    fn test_shape_instruction_embeds_word_count() {
        let text = OutputFormat::Article.shape_instruction(800);
        assert!(text.contains("article"));
        assert!(text.contains("800 words"));
    }
}
