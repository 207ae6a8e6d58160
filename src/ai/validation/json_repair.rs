//! JSON Candidate Extraction and Repair
//!
//! Models asked for "only JSON" still wrap it in prose or code fences, put
//! raw line breaks inside string values, or stop mid-object when they hit
//! the token limit. The candidate is located first, then repaired in a
//! single pass if it does not parse as-is.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::types::{PrdError, Result};

static FENCED_JSON: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)```json\s*(.*?)```").ok());

/// Pick the text most likely to hold the JSON payload.
///
/// Order: the first fenced ```json block, else the first balanced top-level
/// `{...}` object, else the whole text.
pub fn json_candidate(text: &str) -> &str {
    if let Some(re) = FENCED_JSON.as_ref()
        && let Some(body) = re.captures(text).and_then(|c| c.get(1))
    {
        return body.as_str().trim();
    }

    if let Some(object) = first_balanced_object(text) {
        return object;
    }

    text
}

/// Extract the JSON candidate from a model reply and parse it, repairing
/// common defects when the plain parse fails.
pub fn extract_json_from_response(content: &str) -> Result<Value> {
    extract_json_with_repair_status(content).map(|(value, _)| value)
}

/// Same as [`extract_json_from_response`], also reporting whether repair was needed
pub fn extract_json_with_repair_status(content: &str) -> Result<(Value, bool)> {
    let candidate = json_candidate(content);
    debug!("JSON candidate is {} of {} bytes", candidate.len(), content.len());
    parse_or_repair(candidate)
}

/// Parse `raw`, falling back to [`repair`] on the whole text, then on the
/// first balanced object, then on everything from the first `{`.
///
/// Returns `(value, was_repaired)`.
pub fn parse_or_repair(raw: &str) -> Result<(Value, bool)> {
    let cleaned = strip_fences(raw.trim().trim_start_matches('\u{feff}'));

    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        return Ok((value, false));
    }

    debug!("Initial JSON parse failed, attempting repair");

    // `{` is ASCII, so the byte offset is a char boundary
    let from_first_brace = cleaned.find('{').map(|i| &cleaned[i..]);
    let attempts = [Some(cleaned), first_balanced_object(cleaned), from_first_brace];

    for attempt in attempts.into_iter().flatten() {
        if let Ok(value) = serde_json::from_str::<Value>(&repair(attempt)) {
            warn!("Model JSON needed repair");
            return Ok((value, true));
        }
    }

    Err(PrdError::Validation(format!(
        "Reply is not valid JSON and could not be repaired: {}...",
        cleaned.chars().take(200).collect::<String>()
    )))
}

/// Drop a leading ```` ```lang ```` line and a trailing fence.
fn strip_fences(s: &str) -> &str {
    let mut s = s;
    if s.starts_with("```") {
        s = s.split_once('\n').map_or("", |(_, rest)| rest);
    }
    s.trim_end().trim_end_matches("```").trim()
}

/// First `{` through its matching `}`, skipping braces inside strings.
fn first_balanced_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in s[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// One pass over `s`:
/// - control characters inside strings are escaped (raw newlines in
///   multi-line answers) or dropped
/// - commas directly before `}`/`]` or at the end of the text are removed
/// - an unterminated string is closed, then every open object/array is
///   closed in nesting order
fn repair(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut open: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in s.char_indices() {
        if in_string {
            if escape {
                escape = false;
                out.push(ch);
                continue;
            }
            match ch {
                '\\' => {
                    escape = true;
                    out.push(ch);
                }
                '"' => {
                    in_string = false;
                    out.push(ch);
                }
                '\n' => out.push_str("\\n"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {}
                c => out.push(c),
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => open.push('}'),
            '[' => open.push(']'),
            '}' | ']' => {
                open.pop();
            }
            ',' => {
                let rest = s[i + 1..].trim_start();
                if rest.is_empty() || rest.starts_with(['}', ']']) {
                    continue;
                }
            }
            _ => {}
        }
        out.push(ch);
    }

    if escape {
        out.pop();
    }
    if in_string {
        out.push('"');
    }

    let trimmed = out.trim_end().trim_end_matches(',').len();
    out.truncate(trimmed);
    out.extend(open.iter().rev());
    out
}
