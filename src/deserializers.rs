//! Custom deserializers for flexible parameter parsing in prompt-enhancer.
//!
//! The web form and CLI callers send parameters in whatever shape their widgets
//! produce; these helpers accept the common variants while the strict typing
//! happens afterwards in [`crate::parameters`].

use serde::{Deserialize, Deserializer};

/// Length presets accepted in place of a numeric word count.
pub const WORD_COUNT_PRESETS: &[(&str, u32)] = &[("short", 300), ("medium", 800), ("long", 1500)];

/// Deserializes a word count with support for numbers, numeric strings and presets.
///
/// # Accepted Formats
///
/// * **Numeric**: `800`, `800.0` (rounded)
/// * **String numeric**: `"800"`
/// * **String presets** (case-insensitive): `"short"` → 300, `"medium"` → 800, `"long"` → 1500
///
/// Null and empty strings deserialize to `None` so that the caller's
/// missing-field validation reports them.
///
/// # Errors
///
/// Returns an error if the value is negative, non-finite, too large for `u32`,
/// or a string that is neither numeric nor a known preset.
pub fn de_option_u32_forgiving<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(v) = opt else { return Ok(None) };
    let val = match v {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u as f64
            } else if let Some(i) = n.as_i64() {
                i as f64
            } else if let Some(f) = n.as_f64() {
                f
            } else {
                return Err(D::Error::custom("invalid numeric for word count"));
            }
        }
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            let lower = s.to_lowercase();
            if let Some((_, words)) = WORD_COUNT_PRESETS.iter().find(|(name, _)| *name == lower) {
                return Ok(Some(*words));
            }
            s.parse::<f64>().map_err(|_| {
                D::Error::custom(format!(
                    "Invalid word count '{}'. Use a positive number or one of: short, medium, long",
                    s
                ))
            })?
        }
        other => {
            return Err(D::Error::custom(format!(
                "invalid type for word count: {}",
                other
            )));
        }
    };

    let rounded = val.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > u32::MAX as f64 {
        return Err(D::Error::custom(format!(
            "word count {} is out of range",
            val
        )));
    }
    Ok(Some(rounded as u32))
}

/// Deserializes an optional label, trimming whitespace and treating empty
/// strings as absent.
pub fn de_option_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
