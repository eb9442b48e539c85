// src/feed/payload.rs
// Pulls the embedded update object out of a console line and normalizes it to JSON

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ExtractError;

/// Substring identifying a relevant console notification.
pub const UPDATE_MARKER: &str = "[UpdateQueue]";

// The feed prints JS object literals, so keys arrive as bare identifiers
// ahead of a colon.
static BARE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)").unwrap());

/// One decoded update line: the action name plus its untyped field map.
#[derive(Debug, Clone)]
pub struct RawUpdate {
    pub action: String,
    pub fields: Value,
}

/// Tolerant form of [`try_extract`]: any failure is `None`.
pub fn extract(line: &str) -> Option<RawUpdate> {
    try_extract(line).ok()
}

pub fn try_extract(line: &str) -> Result<RawUpdate, ExtractError> {
    let after_marker = line
        .find(UPDATE_MARKER)
        .map(|at| &line[at + UPDATE_MARKER.len()..])
        .ok_or(ExtractError::MissingMarker)?;
    let payload = balanced_object(after_marker)?;
    let normalized = normalize(payload);
    let fields: Value = serde_json::from_str(&normalized)?;
    let action = fields
        .get("action")
        .and_then(Value::as_str)
        .ok_or(ExtractError::MissingAction)?
        .to_string();
    Ok(RawUpdate { action, fields })
}

/// Slice from the first `{` to its matching `}`. Braces inside double-quoted
/// strings do not count toward the balance, and anything after the matching
/// close is left behind. Nested objects are routine in these payloads, so a
/// first-to-last brace grab is not good enough.
fn balanced_object(text: &str) -> Result<&str, ExtractError> {
    let start = text.find('{').ok_or(ExtractError::MissingPayload)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (at, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + at + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    Err(ExtractError::UnbalancedPayload)
}

/// JS object literal to JSON: literal spellings first, then key quoting.
fn normalize(payload: &str) -> String {
    let text = payload
        .replace(": True", ": true")
        .replace(":True", ":true")
        .replace(": False", ": false")
        .replace(":False", ":false")
        .replace(": None", ": null")
        .replace(":None", ":null");
    BARE_KEY.replace_all(&text, "${1}\"${2}\"${3}").into_owned()
}
