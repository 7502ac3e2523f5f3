//! Full-match pattern checks with a process-wide compiled regex cache.

use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static CACHE: LazyLock<Mutex<HashMap<String, Option<Regex>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Wraps a pattern so it must match the whole text.
#[must_use]
pub fn anchored(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

/// Returns true if `text` matches `pattern` in full.
///
/// A pattern that does not compile never matches. Compiled patterns are
/// cached for the lifetime of the process.
#[must_use]
pub fn full_match(pattern: &str, text: &str) -> bool {
    compiled(pattern).is_some_and(|re| re.is_match(text))
}

/// Returns the cached anchored regex for `pattern`, compiling it on first
/// use. The cache lock is released before the caller matches.
#[must_use]
pub fn compiled(pattern: &str) -> Option<Regex> {
    CACHE
        .lock()
        .entry(pattern.to_string())
        .or_insert_with(|| Regex::new(&anchored(pattern)).ok())
        .clone()
}

/// Returns true if `pattern` compiles once anchored.
#[must_use]
pub fn is_valid(pattern: &str) -> bool {
    Regex::new(&anchored(pattern)).is_ok()
}
