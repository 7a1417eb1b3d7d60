use std::sync::LazyLock;

use regex::Regex;

static LEADING_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[[^\]]*\]\s*").expect("annotation pattern is valid"));

/// Normalizes alarm message text into a description.
///
/// A single leading bracketed annotation (such as a severity marker like
/// `[WARN]`) is removed, and the remainder is trimmed.
#[must_use]
pub fn normalize_description(text: &str) -> String {
    LEADING_ANNOTATION.replace(text, "").trim().to_string()
}
