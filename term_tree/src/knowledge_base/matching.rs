//! Term comparison helpers.
//!
//! The tree deliberately mixes two notions of "same term":
//! - **Placement** uses case-sensitive lexicographic order (`str::cmp`).
//! - **Lookup equality** ignores case.
//!
//! A term that differs from a stored one only by case is therefore placed as a
//! separate node, while `find` may still resolve it to the stored one.

/// Case-insensitive equality, using full Unicode lowercase mapping.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Split a term into its whitespace-delimited tokens.
pub fn tokens(term: &str) -> impl Iterator<Item = &str> {
    term.split_whitespace()
}

/// Whether `term` is a partial match for `query`.
///
/// Some token of `term` must equal `query` ignoring case, and `term` as a whole
/// must not. Whole-term matches belong to exact lookup.
pub fn is_partial_match(term: &str, query: &str) -> bool {
    !eq_ignore_case(term, query) && tokens(term).any(|token| eq_ignore_case(token, query))
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
