//! Recovery of a JSON object from free-form model output.
//!
//! Models asked for "only JSON" still wrap it in prose or code fences now
//! and then. Each `{` in the reply starts a candidate region that runs to
//! its matching `}`; braces inside string literals are ignored. The first
//! candidate that decodes wins. Objects nested in a region that failed to
//! decode are never candidates, and neither is anything after an unclosed `{`.

use na_core::{Error, Result};
use serde_json::{Map, Value};

pub fn parse_json_object(raw: &str) -> Result<Map<String, Value>> {
    let mut first_error = None;
    let mut from = 0;

    while let Some(offset) = raw[from..].find('{') {
        let start = from + offset;
        let Some(end) = matching_brace(raw, start) else {
            break;
        };
        match serde_json::from_str::<Map<String, Value>>(&raw[start..end]) {
            Ok(object) => return Ok(object),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
        from = end;
    }

    match first_error {
        Some(e) => Err(Error::MalformedJson(e.to_string())),
        None => Err(Error::NoJsonFound),
    }
}

/// Byte offset just past the `}` closing the `{` at `start`.
fn matching_brace(raw: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in raw.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}
