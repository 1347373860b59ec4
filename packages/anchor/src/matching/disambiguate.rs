//! Acceptance rules that reject spurious anchor candidates.
//!
//! Small integers and Roman numerals recur throughout legal text as list
//! markers and cross-references, so each entity type is confirmed with its
//! own signal:
//!
//! - recitals and definitions: their content follows the anchor
//! - articles: the captured number equals the article number exactly
//! - annexes and chapters: the captured numeral equals, ignoring case
//! - footnotes: an official-journal keyword appears right after the marker

use regex::Regex;

use crate::error::{AnchorError, Result};
use crate::text::{advance_chars, char_prefix};
use crate::types::EntityType;

/// Text following an anchor, at most `chars` long.
///
/// The window never extends past `limit`, the start of the next occurrence
/// of the same anchor: text that belongs to a later marker must not confirm
/// an earlier one.
#[must_use]
pub fn context_window(text: &str, from: usize, chars: usize, limit: Option<usize>) -> &str {
    let end = advance_chars(text, from, chars);
    let end = limit.map_or(end, |limit| end.min(limit.max(from)));
    &text[from..end]
}

/// Whether the first `prefix_chars` of `content` occur in `window`.
///
/// Whitespace runs are collapsed on both sides so line wrapping in the raw
/// text does not matter. Empty content is always accepted.
#[must_use]
pub fn content_follows_anchor(window: &str, content: &str, prefix_chars: usize) -> bool {
    let content = collapse_whitespace(content);
    let prefix = char_prefix(&content, prefix_chars);
    if prefix.is_empty() {
        return true;
    }
    collapse_whitespace(window).contains(prefix)
}

/// Whether a captured article number is exactly `expected`.
///
/// # Examples
/// ```
/// use regelrecht_anchor::matching::number_equals;
///
/// assert!(number_equals("15", 15));
/// assert!(!number_equals("150", 15));
/// ```
#[must_use]
pub fn number_equals(captured: &str, expected: u32) -> bool {
    captured.trim().parse::<u32>() == Ok(expected)
}

/// Whether a captured Roman numeral equals `expected`, ignoring case.
#[must_use]
pub fn numeral_equals(captured: &str, expected: &str) -> bool {
    let expected = expected.trim();
    !expected.is_empty() && captured.trim().eq_ignore_ascii_case(expected)
}

/// Case-insensitive keyword set confirming footnote markers.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    regex: Option<Regex>,
}

impl KeywordSet {
    /// Compile the keywords into a single alternation.
    ///
    /// Keywords match on word boundaries where they start or end with a word
    /// character, so "OJ" does not fire inside "project".
    pub fn new(keywords: &[String]) -> Result<Self> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| {
                let starts_word = keyword.chars().next().is_some_and(char::is_alphanumeric);
                let ends_word = keyword.chars().last().is_some_and(char::is_alphanumeric);
                format!(
                    "{}{}{}",
                    if starts_word { r"\b" } else { "" },
                    regex::escape(keyword),
                    if ends_word { r"\b" } else { "" }
                )
            })
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }

        let pattern = format!("(?i)(?:{})", alternatives.join("|"));
        let regex = Regex::new(&pattern).map_err(|source| AnchorError::InvalidPattern {
            entity: EntityType::Footnote,
            language: "keyword".to_string(),
            source,
        })?;
        Ok(Self { regex: Some(regex) })
    }

    /// Whether `window` mentions any keyword. An empty set matches nothing.
    #[must_use]
    pub fn context_has_keyword(&self, window: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(window))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
