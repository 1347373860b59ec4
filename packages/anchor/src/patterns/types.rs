//! Types for the pattern table.

use std::fmt;

use regex::Regex;

use crate::error::{AnchorError, Result};
use crate::types::EntityType;

/// Official-journal languages with heading patterns in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    French,
    German,
    Dutch,
    Spanish,
    Italian,
    Portuguese,
}

impl Language {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::French => "French",
            Self::German => "German",
            Self::Dutch => "Dutch",
            Self::Spanish => "Spanish",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled heading pattern for one entity type in one language.
///
/// The regex must have exactly one capture group holding the identifier
/// (article number, Roman numeral).
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub entity: EntityType,
    pub language: Language,
    regex: Regex,
}

impl PatternSpec {
    /// Compile a new pattern.
    ///
    /// # Errors
    /// `AnchorError::InvalidPattern` if the regex does not compile.
    pub fn new(entity: EntityType, language: Language, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| AnchorError::InvalidPattern {
            entity,
            language: language.to_string(),
            source,
        })?;
        Ok(Self {
            entity,
            language,
            regex,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// All occurrences of the pattern in document order.
    pub fn candidates<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Candidate<'t>> + 't {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let identifier = caps.get(1)?;
            Some(Candidate {
                start: whole.start(),
                end: whole.end(),
                identifier: identifier.as_str(),
            })
        })
    }
}

/// One occurrence of a heading pattern in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'t> {
    pub start: usize,
    pub end: usize,
    /// Captured identifier, e.g. "15" or "iv".
    pub identifier: &'t str,
}
