//! Pull the rated-event JSON array out of free-form model text.
//!
//! Models wrap the array in prose or markdown fences, so the text is scanned
//! for balanced `[ ... ]` spans. Brackets inside JSON strings are skipped.

use serde_json::Value;

use crate::error::CompareError;

/// Every top-level `[ ... ]` span in `text`, in order of appearance.
///
/// An array left open at the end of the text (truncated output) is still
/// returned, running to the end, so that it fails as a parse error rather
/// than looking like a reply without any array.
pub fn array_candidates(text: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut depth: u32 = 0;
    let mut start: Option<usize> = None;
    let mut in_string = false;
    let mut escape = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escape {
                escape = false;
                continue;
            }
            match ch {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            // Quotes only open strings inside an array; prose quotes are ignored.
            '"' if depth > 0 => in_string = true,
            '[' => {
                if depth == 0 {
                    start = Some(idx);
                }
                depth += 1;
            }
            ']' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0
                        && let Some(s) = start.take()
                    {
                        candidates.push(&text[s..idx + 1]);
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        candidates.push(&text[s..]);
    }

    candidates
}

/// Parse the first candidate that is a JSON array.
///
/// Fails with `NoJsonArrayFound` when the text holds no `[` at all, and with
/// `JsonParse` (carrying the first candidate's error) when no candidate parses.
/// A lone unterminated `[`, as in `"Ratings [pending"`, is a candidate and so
/// reports `JsonParse`. Both errors reach the caller as the same message.
pub fn extract_json_array(text: &str) -> Result<Vec<Value>, CompareError> {
    let candidates = array_candidates(text);
    if candidates.is_empty() {
        return Err(CompareError::NoJsonArrayFound);
    }

    let mut first_error = None;
    for candidate in candidates {
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Array(items)) => return Ok(items),
            Ok(_) => {}
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(source) => Err(CompareError::JsonParse { source }),
        None => Err(CompareError::NoJsonArrayFound),
    }
}
