//! Custom deserializers for model-authored fields.
//!
//! The model writes free text, so numbers arrive in whatever shape it chose.

use serde::{Deserialize, Deserializer};

/// Deserializes an insanity rating with support for several numeric shapes.
///
/// # Accepted Formats
///
/// * **Integer**: `7` → 7
/// * **Fractional**: `6.5` → 7 (rounded half away from zero)
/// * **String numeric**: `"8"` → 8, `" 4.4 "` → 4
///
/// Out-of-range values are kept; the display mappings bucket them.
///
/// # Errors
///
/// Returns an error for null, booleans, arrays, objects, non-numeric
/// strings and non-finite numbers.
pub fn de_rating_forgiving<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let v = serde_json::Value::deserialize(deserializer)?;
    let val = match v {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            } else if let Some(f) = n.as_f64() {
                f
            } else {
                return Err(D::Error::custom("invalid numeric for rating"));
            }
        }
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<f64>().map_err(|_| {
                D::Error::custom(format!("Invalid insanityRating '{}': not a number", s))
            })?
        }
        other => {
            return Err(D::Error::custom(format!(
                "invalid type for insanityRating: {}",
                other
            )));
        }
    };

    let rounded = val.round();
    if !rounded.is_finite() {
        return Err(D::Error::custom("non-finite insanityRating"));
    }
    Ok(rounded as i64)
}
