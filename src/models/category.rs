//! Category suggestions
//!
//! Categories are free text on an expense; this is only the list offered to
//! the user when entering one.

/// Suggestions offered when no custom list is configured
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Subscriptions",
    "Other",
];

/// Owned copy of the default suggestion list
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Step through a suggestion list, wrapping at either end
///
/// Returns the suggestion after (or before) `current`. When `current` is not
/// in the list the first (or last) suggestion is returned.
pub fn cycle_suggestion<'a>(suggestions: &'a [String], current: &str, forward: bool) -> Option<&'a str> {
    if suggestions.is_empty() {
        return None;
    }
    let len = suggestions.len();
    let next = match suggestions.iter().position(|s| s == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    Some(suggestions[next].as_str())
}
