//! Subsequence-based approximate matching for trigger prefixes.

/// Case-insensitive ordered subsequence containment.
///
/// Walks `pattern` and `text` in parallel, advancing the pattern pointer only
/// on a character match and the text pointer always; matches iff the whole
/// pattern is consumed. There is no scoring: no contiguous-run bonus and no
/// gap penalty. Ties among matches are broken by the repository's ranking
/// policy, not by match quality.
pub fn is_subsequence_match(pattern: &str, text: &str) -> bool {
    let mut pattern_chars = pattern.chars().flat_map(char::to_lowercase).peekable();

    for c in text.chars().flat_map(char::to_lowercase) {
        match pattern_chars.peek() {
            Some(&p) if p == c => {
                pattern_chars.next();
            }
            Some(_) => {}
            None => return true,
        }
    }

    pattern_chars.peek().is_none()
}
