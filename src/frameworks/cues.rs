//! Surface cues shared by the framework predicates.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s+\S").expect("numbered-line regex should compile"));

static BULLET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[-*•]\s+\S").expect("bullet-line regex should compile"));

/// Keywords from `keywords` that occur in `lower` (already lower-cased).
pub(crate) fn matched<'a>(lower: &str, keywords: &[&'a str]) -> Vec<&'a str> {
    keywords
        .iter()
        .copied()
        .filter(|k| lower.contains(k))
        .collect()
}

/// Number of sentences, counting terminal punctuation followed by more text.
pub(crate) fn sentence_count(s: &str) -> usize {
    let mut count = 0;
    let mut has_text = false;
    for ch in s.chars() {
        if ch == '.' || ch == '!' || ch == '?' {
            if has_text {
                count += 1;
                has_text = false;
            }
        } else if !ch.is_whitespace() {
            has_text = true;
        }
    }
    if has_text {
        count += 1;
    }
    count
}

/// Explicit list or code structure in the raw input.
pub(crate) fn structural_cues(s: &str) -> Vec<&'static str> {
    let mut out = Vec::new();
    if NUMBERED_LINE.is_match(s) {
        out.push("numbered list");
    }
    if BULLET_LINE.is_match(s) {
        out.push("bulleted list");
    }
    if s.contains("```") {
        out.push("code fence");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_count() {
        assert_eq!(sentence_count(""), 0);
        assert_eq!(sentence_count("   "), 0);
        assert_eq!(sentence_count("One sentence"), 1);
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(sentence_count("Wait... really?"), 2);
    }

    #[test]
    fn test_structural_cues() {
        assert_eq!(structural_cues("1. first\n2. second"), vec!["numbered list"]);
        assert_eq!(structural_cues("- milk\n- eggs"), vec!["bulleted list"]);
        assert_eq!(structural_cues("fix ```let x = 1;```"), vec!["code fence"]);
        assert!(structural_cues("plain request").is_empty());
    }

    #[test]
    fn test_matched_preserves_keyword_order() {
        assert_eq!(matched("tone and style", &["style", "tone", "voice"]), vec!["style", "tone"]);
    }
}
