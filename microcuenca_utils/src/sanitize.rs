//! Narrow removal of `<script>` blocks from free-text form fields.
//!
//! This is **not** an HTML sanitizer. Only complete `<script ...>...</script>`
//! blocks are removed; any other markup (event handler attributes, unclosed
//! script tags, `javascript:` urls, ...) passes through unchanged. Templates
//! that render these values are expected to escape them.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Matches from `<script` up to the first following `</script>`, ignoring
/// case and spanning newlines.
static SCRIPT_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<script\b(?s:.*?)</script>").unwrap());

/// Sanitizes an arbitrary JSON value. Anything that is not a string
/// (including `null`) yields an empty string.
pub fn sanitize(value: &Value) -> String {
    match value {
        Value::String(s) => sanitize_str(s),
        _ => String::new(),
    }
}

/// Removes all script blocks from `s` and trims surrounding whitespace.
///
/// Removal is repeated until no block is left, so blocks reassembled from the
/// residue of a previous pass are removed as well and the function is
/// idempotent.
pub fn sanitize_str(s: &str) -> String {
    let mut out = SCRIPT_BLOCK_REGEX.replace_all(s, "").into_owned();
    while SCRIPT_BLOCK_REGEX.is_match(&out) {
        out = SCRIPT_BLOCK_REGEX.replace_all(&out, "").into_owned();
    }
    out.trim().to_owned()
}
