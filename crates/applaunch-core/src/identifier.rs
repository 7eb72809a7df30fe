//! Application identifier grammar
//!
//! Android application ids and iOS bundle ids are dotted reverse-domain
//! strings (`com.example.my-app`). Both platforms share one grammar: every
//! segment starts with a letter, followed by letters, digits, `_` or `-`.

use regex::Regex;
use std::sync::LazyLock;

/// Full-match grammar
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*(\.[A-Za-z][A-Za-z0-9_-]*)*$")
        .expect("Invalid identifier regex")
});

/// Search pattern for a dotted identifier inside a build file line
///
/// At least one dot is required, otherwise the `applicationId` keyword
/// itself would be the first match on the line.
static DOTTED_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9_-]*(\.[A-Za-z][A-Za-z0-9_-]*)+")
        .expect("Invalid identifier search regex")
});

/// Check a candidate against the identifier grammar
pub fn is_valid(candidate: &str) -> bool {
    IDENTIFIER.is_match(candidate)
}

/// Find the first dotted identifier in a line of text
pub fn find_identifier(line: &str) -> Option<&str> {
    DOTTED_IDENTIFIER.find(line).map(|m| m.as_str())
}
