//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed object on stdout:
//! the command's payload on success, the error object on failure.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Format the error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// `details`, when present, is added under the `"details"` key.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str, details: Option<&Value>) -> Result<String> {
    let mut obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    if let (Some(details), Some(map)) = (details, obj.as_object_mut()) {
        map.insert("details".to_string(), details.clone());
    }
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Pretty-print any serializable payload.
///
/// # Errors
///
/// Returns an error if JSON serialization fails (non-finite floats).
pub fn format_value(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}
