//! Core data types for the anchor engine.
//!
//! The input side (`ParsedContent`, `StructureAnalysis`) mirrors the JSON the
//! upstream regulation parser produces, so field names are camelCase on the
//! wire. The output side (`Match`, `Segment`) is recomputed on every analysis
//! pass and never persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnchorError;

/// Kinds of structural element that can be anchored in regulation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Numbered preambular paragraph, "(N) ...".
    Recital,

    /// Numbered operative provision.
    Article,

    /// Appendix identified by a Roman numeral.
    Annex,

    /// Marker-referenced citation, usually to the Official Journal.
    Footnote,

    /// Chapter heading identified by a Roman numeral.
    Chapter,

    /// Quoted term defined in a definitions article.
    Definition,
}

impl EntityType {
    /// All entity types, in the order matches are discovered.
    pub const ALL: [EntityType; 6] = [
        Self::Recital,
        Self::Article,
        Self::Annex,
        Self::Footnote,
        Self::Chapter,
        Self::Definition,
    ];

    /// Get the string value used on the wire and in the CLI.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recital => "recital",
            Self::Article => "article",
            Self::Annex => "annex",
            Self::Footnote => "footnote",
            Self::Chapter => "chapter",
            Self::Definition => "definition",
        }
    }

    /// Whether entities of this type are identified by an integer.
    #[must_use]
    pub fn is_numbered(&self) -> bool {
        matches!(self, Self::Recital | Self::Article)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = AnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recital" => Ok(Self::Recital),
            "article" => Ok(Self::Article),
            "annex" => Ok(Self::Annex),
            "footnote" => Ok(Self::Footnote),
            "chapter" => Ok(Self::Chapter),
            "definition" => Ok(Self::Definition),
            _ => Err(AnchorError::UnknownEntityType(s.to_string())),
        }
    }
}

/// Identifier of an entity within its type.
///
/// Recitals and articles are numbered; annexes and chapters carry a Roman
/// numeral, footnotes a marker and definitions their term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityNumber {
    Number(u32),
    Label(String),
}

impl EntityNumber {
    /// Interpret a raw identifier for the given entity type.
    ///
    /// Numbered types parse the value as an integer when possible; anything
    /// else is kept as a label.
    ///
    /// # Examples
    /// ```
    /// use regelrecht_anchor::types::{EntityNumber, EntityType};
    ///
    /// assert_eq!(EntityNumber::for_entity(EntityType::Article, "15"), EntityNumber::Number(15));
    /// assert_eq!(
    ///     EntityNumber::for_entity(EntityType::Annex, "IV"),
    ///     EntityNumber::Label("IV".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn for_entity(entity: EntityType, raw: &str) -> Self {
        let raw = raw.trim();
        if entity.is_numbered() {
            if let Ok(n) = raw.parse::<u32>() {
                return Self::Number(n);
            }
        }
        Self::Label(raw.to_string())
    }
}

impl fmt::Display for EntityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<u32> for EntityNumber {
    fn from(n: u32) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for EntityNumber {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for EntityNumber {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

/// A numbered preambular paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recital {
    pub recital_number: u32,
    #[serde(default)]
    pub content: String,
}

impl Recital {
    #[must_use]
    pub fn new(recital_number: u32, content: impl Into<String>) -> Self {
        Self {
            recital_number,
            content: content.into(),
        }
    }
}

/// An operative provision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub article_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Article {
    #[must_use]
    pub fn new(article_number: u32, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            article_number,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// An appendix to the regulation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annex {
    #[serde(default)]
    pub annex_number: u32,
    pub roman_numeral: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Annex {
    #[must_use]
    pub fn new(annex_number: u32, roman_numeral: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            annex_number,
            roman_numeral: roman_numeral.into(),
            title: title.into(),
            content: String::new(),
        }
    }

    /// Set the annex body.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// A footnote referenced by a marker such as `1` or `*`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footnote {
    pub marker: String,
    #[serde(default)]
    pub content: String,
}

impl Footnote {
    #[must_use]
    pub fn new(marker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            content: content.into(),
        }
    }
}

/// A defined term and its meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub term: String,
    #[serde(default)]
    pub definition: String,
}

impl Definition {
    #[must_use]
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// A chapter heading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub roman_numeral: String,
    #[serde(default)]
    pub title: String,
}

impl Chapter {
    #[must_use]
    pub fn new(roman_numeral: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            roman_numeral: roman_numeral.into(),
            title: title.into(),
        }
    }
}

/// Structural model of a regulation, produced by the upstream parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedContent {
    pub recitals: Vec<Recital>,
    pub articles: Vec<Article>,
    pub annexes: Vec<Annex>,
    pub footnotes: Vec<Footnote>,
    pub definitions: Vec<Definition>,
    pub chapters: Vec<Chapter>,
}

impl ParsedContent {
    /// Number of entities of the given type.
    #[must_use]
    pub fn count(&self, entity: EntityType) -> usize {
        match entity {
            EntityType::Recital => self.recitals.len(),
            EntityType::Article => self.articles.len(),
            EntityType::Annex => self.annexes.len(),
            EntityType::Footnote => self.footnotes.len(),
            EntityType::Chapter => self.chapters.len(),
            EntityType::Definition => self.definitions.len(),
        }
    }

    /// True when the model holds no entities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        EntityType::ALL.iter().all(|e| self.count(*e) == 0)
    }
}

/// Layout metadata detected by the upstream parser.
///
/// Passed through for display; the matcher does not read it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructureAnalysis {
    pub detected_language: Option<String>,
    pub table_format: Option<String>,
    pub footnote_format: Option<String>,
    pub adoption_line_index: Option<usize>,
    pub first_article_index: Option<usize>,
    pub first_annex_index: Option<usize>,
}

/// Located span of a structural entity in the source text.
///
/// Offsets are UTF-8 byte offsets into the source, always on char boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub number: EntityNumber,
    pub start_index: usize,
    pub end_index: usize,
    /// Short excerpt of the entity's own content.
    pub content: String,
}

impl Match {
    #[must_use]
    pub fn new(
        entity_type: EntityType,
        number: impl Into<EntityNumber>,
        start_index: usize,
        end_index: usize,
        content: impl Into<String>,
    ) -> Self {
        debug_assert!(start_index <= end_index, "match start must be <= end");
        Self {
            entity_type,
            number: number.into(),
            start_index,
            end_index,
            content: content.into(),
        }
    }

    /// Whether this match anchors the given entity.
    #[must_use]
    pub fn is_entity(&self, entity_type: EntityType, number: &EntityNumber) -> bool {
        self.entity_type == entity_type && &self.number == number
    }

    /// Whether the two spans share at least one byte.
    #[must_use]
    pub fn overlaps(&self, other: &Match) -> bool {
        self.start_index < other.end_index && other.start_index < self.end_index
    }
}

/// A contiguous slice of the source text, plain or highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Match>,
}

impl Segment {
    /// Plain segment covering `source[start..end]`.
    #[must_use]
    pub fn plain(source: &str, start: usize, end: usize) -> Self {
        Self {
            text: source[start..end].to_string(),
            start,
            end,
            anchor: None,
        }
    }

    /// Highlighted segment covering `source[start..end]` for `anchor`.
    #[must_use]
    pub fn highlighted(source: &str, start: usize, end: usize, anchor: Match) -> Self {
        Self {
            text: source[start..end].to_string(),
            start,
            end,
            anchor: Some(anchor),
        }
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.anchor.is_some()
    }
}
