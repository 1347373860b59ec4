//! Character-aware offset helpers.
//!
//! Offsets handed around the crate are byte offsets into the source, but the
//! windows the matcher reasons about ("the next 100 characters") are counted
//! in `char`s. These helpers convert between the two without ever landing
//! inside a multi-byte code point.

/// Byte offset reached by advancing `n` chars from `from`, clamped to the end.
///
/// `from` must lie on a char boundary.
///
/// # Examples
/// ```
/// use regelrecht_anchor::text::advance_chars;
///
/// assert_eq!(advance_chars("Artículo 5", 0, 5), 6); // 'í' is two bytes
/// assert_eq!(advance_chars("abc", 1, 10), 3);
/// ```
#[must_use]
pub fn advance_chars(text: &str, from: usize, n: usize) -> usize {
    debug_assert!(text.is_char_boundary(from), "offset must be a char boundary");
    match text[from..].char_indices().nth(n) {
        Some((offset, _)) => from + offset,
        None => text.len(),
    }
}

/// The first `n` chars of `text`.
#[must_use]
pub fn char_prefix(text: &str, n: usize) -> &str {
    &text[..advance_chars(text, 0, n)]
}

/// Number of chars in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Single-line excerpt of at most `n` chars, used as `Match::content`.
#[must_use]
pub fn excerpt(text: &str, n: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    char_prefix(&collapsed, n).to_string()
}

/// Number of `\n` in `text`.
#[must_use]
pub fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_chars_ascii() {
        assert_eq!(advance_chars("hello world", 0, 5), 5);
        assert_eq!(advance_chars("hello world", 6, 5), 11);
        assert_eq!(advance_chars("hello", 0, 0), 0);
    }

    #[test]
    fn test_advance_chars_multibyte() {
        // ‘ and ’ are three bytes each
        let text = "‘data’ means";
        let end = advance_chars(text, 0, 6);
        assert_eq!(&text[..end], "‘data’");
    }

    #[test]
    fn test_advance_chars_clamps() {
        assert_eq!(advance_chars("Anhang", 2, 100), 6);
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("Verordnung", 4), "Vero");
        assert_eq!(char_prefix("ÄÖÜ", 2), "ÄÖ");
        assert_eq!(char_prefix("", 3), "");
    }

    #[test]
    fn test_excerpt_collapses_whitespace() {
        assert_eq!(excerpt("  This Regulation\n  lays down rules ", 20), "This Regulation lays");
    }

    #[test]
    fn test_count_newlines() {
        assert_eq!(count_newlines("a\nb\nc"), 2);
        assert_eq!(count_newlines("no breaks"), 0);
    }
}
