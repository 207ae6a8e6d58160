//! Model Output Validation
//!
//! Locates and repairs JSON payloads inside free-text model replies.
//! Fail fast on unusable content, repair on format issues.

mod json_repair;

pub use json_repair::{
    extract_json_from_response, extract_json_with_repair_status, json_candidate, parse_or_repair,
};
