//! Configuration constants and tunables for the anchor engine.
//!
//! Every window the matcher and segment builder use is a named constant here
//! and a field of [`MatchConfig`], so the visual behaviour can be tuned from a
//! YAML file without touching the matching control flow.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnchorError, Result};
use crate::types::EntityType;

/// Characters of recital content that must follow the `(N)` anchor.
pub const RECITAL_PREFIX_CHARS: usize = 50;

/// How far past an anchor the content prefix may start, in chars.
pub const LOOKAHEAD_CHARS: usize = 100;

/// Maximum article content length counted towards the article span.
pub const ARTICLE_EXCERPT_BUDGET: usize = 500;

/// Fixed allowance added to the article span for the heading itself.
pub const ARTICLE_END_PADDING: usize = 20;

/// Span of an annex match, counted from the anchor.
pub const ANNEX_WINDOW_CHARS: usize = 200;

/// Context window searched for footnote keywords, counted from the anchor.
pub const FOOTNOTE_CONTEXT_CHARS: usize = 100;

/// Keywords that mark a numbered parenthesis as a genuine footnote.
pub const FOOTNOTE_KEYWORDS: [&str; 4] = ["OJ", "ABl.", "Regulation", "Directive"];

/// Default highlight width for every entity type.
///
/// Long entities are only partly highlighted.
pub const DEFAULT_HIGHLIGHT_CHARS: usize = 100;

/// Length of the excerpt stored in `Match::content`.
pub const EXCERPT_CHARS: usize = 80;

/// Pixels subtracted from the scroll target so the anchor is not flush with
/// the top of the viewport.
pub const SCROLL_OFFSET_PX: f64 = 100.0;

/// Highlight width per entity type, in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightWidths {
    pub recital: usize,
    pub article: usize,
    pub annex: usize,
    pub footnote: usize,
    pub chapter: usize,
    pub definition: usize,
}

impl HighlightWidths {
    /// Same width for every entity type.
    #[must_use]
    pub fn uniform(width: usize) -> Self {
        Self {
            recital: width,
            article: width,
            annex: width,
            footnote: width,
            chapter: width,
            definition: width,
        }
    }

    /// Width for the given entity type.
    #[must_use]
    pub fn get(&self, entity: EntityType) -> usize {
        match entity {
            EntityType::Recital => self.recital,
            EntityType::Article => self.article,
            EntityType::Annex => self.annex,
            EntityType::Footnote => self.footnote,
            EntityType::Chapter => self.chapter,
            EntityType::Definition => self.definition,
        }
    }
}

impl Default for HighlightWidths {
    fn default() -> Self {
        Self::uniform(DEFAULT_HIGHLIGHT_CHARS)
    }
}

/// Tunable windows and keywords for matching and highlighting.
///
/// # Examples
/// ```
/// use regelrecht_anchor::config::MatchConfig;
///
/// let config = MatchConfig::from_yaml_str("annex_window_chars: 300\n").unwrap();
/// assert_eq!(config.annex_window_chars, 300);
/// assert_eq!(config.recital_prefix_chars, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub recital_prefix_chars: usize,
    pub lookahead_chars: usize,
    pub article_excerpt_budget: usize,
    pub article_end_padding: usize,
    pub annex_window_chars: usize,
    pub footnote_context_chars: usize,
    pub footnote_keywords: Vec<String>,
    pub excerpt_chars: usize,
    pub highlight: HighlightWidths,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            recital_prefix_chars: RECITAL_PREFIX_CHARS,
            lookahead_chars: LOOKAHEAD_CHARS,
            article_excerpt_budget: ARTICLE_EXCERPT_BUDGET,
            article_end_padding: ARTICLE_END_PADDING,
            annex_window_chars: ANNEX_WINDOW_CHARS,
            footnote_context_chars: FOOTNOTE_CONTEXT_CHARS,
            footnote_keywords: FOOTNOTE_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
            excerpt_chars: EXCERPT_CHARS,
            highlight: HighlightWidths::default(),
        }
    }
}

impl MatchConfig {
    /// Parse and validate a YAML configuration. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check that every window is usable.
    ///
    /// # Returns
    /// * `Ok(())` if valid
    /// * `Err(AnchorError::InvalidConfig)` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        let windows = [
            ("recital_prefix_chars", self.recital_prefix_chars),
            ("lookahead_chars", self.lookahead_chars),
            ("annex_window_chars", self.annex_window_chars),
            ("footnote_context_chars", self.footnote_context_chars),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(AnchorError::InvalidConfig(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        for entity in EntityType::ALL {
            if self.highlight.get(entity) == 0 {
                return Err(AnchorError::InvalidConfig(format!(
                    "highlight width for {entity} must be greater than zero"
                )));
            }
        }

        if self.footnote_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(AnchorError::InvalidConfig(
                "footnote_keywords must not contain empty keywords".to_string(),
            ));
        }

        Ok(())
    }
}
