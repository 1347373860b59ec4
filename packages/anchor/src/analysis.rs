//! One-call analysis of a regulation: matches, segments, and summary counts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matching::AnchorMatcher;
use crate::segments::SegmentBuilder;
use crate::types::{
    EntityNumber, EntityType, Match, ParsedContent, Segment, StructureAnalysis,
};

/// Entity counts taken straight from the structural model.
///
/// Independent of matching, so "0 detected" can be shown even when no
/// anchor was found at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub recitals: usize,
    pub articles: usize,
    pub annexes: usize,
    pub footnotes: usize,
    pub definitions: usize,
    pub chapters: usize,
}

impl Stats {
    #[must_use]
    pub fn from_content(content: &ParsedContent) -> Self {
        Self {
            recitals: content.recitals.len(),
            articles: content.articles.len(),
            annexes: content.annexes.len(),
            footnotes: content.footnotes.len(),
            definitions: content.definitions.len(),
            chapters: content.chapters.len(),
        }
    }
}

/// How many entities of one type were anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityCoverage {
    #[serde(rename = "type")]
    pub entity: EntityType,
    pub expected: usize,
    pub detected: usize,
}

impl EntityCoverage {
    /// Entities present in the model but not found in the text.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.expected.saturating_sub(self.detected)
    }
}

/// Result of analysing one regulation text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAnalysis {
    pub matches: Vec<Match>,
    pub segments: Vec<Segment>,
    pub stats: Stats,
    pub coverage: Vec<EntityCoverage>,
    pub structure: StructureAnalysis,
}

impl DocumentAnalysis {
    /// Match for an entity, if it was anchored.
    #[must_use]
    pub fn find_match(&self, entity: EntityType, number: &EntityNumber) -> Option<&Match> {
        self.matches.iter().find(|m| m.is_entity(entity, number))
    }

    /// Entity types with at least one unanchored entity.
    pub fn incomplete(&self) -> impl Iterator<Item = &EntityCoverage> {
        self.coverage.iter().filter(|c| c.missing() > 0)
    }
}

/// Structural model plus optional layout metadata, as read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ParsedDocument {
    #[serde(flatten)]
    pub content: ParsedContent,
    #[serde(default)]
    pub structure: StructureAnalysis,
}

impl ParsedDocument {
    /// Load a parsed document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Anchor every entity and partition the text for rendering.
///
/// A pure function of its inputs: identical inputs give identical output.
#[must_use]
pub fn analyze_document(
    matcher: &AnchorMatcher,
    text: &str,
    content: &ParsedContent,
    structure: &StructureAnalysis,
) -> DocumentAnalysis {
    let matches = matcher.find_all(text, content);
    let segments = SegmentBuilder::new(matcher.config().highlight).build(text, &matches);

    let coverage: Vec<EntityCoverage> = EntityType::ALL
        .iter()
        .map(|&entity| EntityCoverage {
            entity,
            expected: content.count(entity),
            detected: matches.iter().filter(|m| m.entity_type == entity).count(),
        })
        .collect();

    for gap in coverage.iter().filter(|c| c.missing() > 0) {
        tracing::debug!(
            entity = %gap.entity,
            expected = gap.expected,
            detected = gap.detected,
            "entities without anchor"
        );
    }

    DocumentAnalysis {
        matches,
        segments,
        stats: Stats::from_content(content),
        coverage,
        structure: structure.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::types::{Annex, Article, Recital};

    fn matcher() -> AnchorMatcher {
        AnchorMatcher::new(MatchConfig::default()).unwrap()
    }

    #[test]
    fn test_stats_from_content() {
        let content = ParsedContent {
            recitals: vec![Recital::new(1, "a"), Recital::new(2, "b")],
            annexes: vec![Annex::new(1, "I", "")],
            ..ParsedContent::default()
        };
        let stats = Stats::from_content(&content);

        assert_eq!(stats.recitals, 2);
        assert_eq!(stats.annexes, 1);
        assert_eq!(stats.articles, 0);
    }

    #[test]
    fn test_analyze_reports_coverage() {
        let text = "Article 1\nSubject matter\nThis Regulation lays down rules.";
        let content = ParsedContent {
            articles: vec![
                Article::new(1, "Subject matter", "This Regulation lays down rules."),
                Article::new(2, "Scope", ""),
            ],
            ..ParsedContent::default()
        };

        let analysis = analyze_document(&matcher(), text, &content, &StructureAnalysis::default());
        let articles = analysis
            .coverage
            .iter()
            .find(|c| c.entity == EntityType::Article)
            .unwrap();

        assert_eq!(articles.expected, 2);
        assert_eq!(articles.detected, 1);
        assert_eq!(analysis.incomplete().count(), 1);
        assert_eq!(analysis.stats.articles, 2);
        assert!(analysis
            .find_match(EntityType::Article, &EntityNumber::Number(1))
            .is_some());
    }

    #[test]
    fn test_analyze_passes_structure_through() {
        let structure = StructureAnalysis {
            detected_language: Some("de".to_string()),
            first_article_index: Some(12),
            ..StructureAnalysis::default()
        };
        let analysis = analyze_document(&matcher(), "text", &ParsedContent::default(), &structure);
        assert_eq!(analysis.structure, structure);
    }

    #[test]
    fn test_parsed_document_with_structure() {
        let json = r#"{
            "articles": [{"articleNumber": 1, "title": "Subject matter"}],
            "structure": {"detectedLanguage": "en", "firstArticleIndex": 3}
        }"#;
        let doc: ParsedDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.content.articles.len(), 1);
        assert_eq!(doc.structure.detected_language.as_deref(), Some("en"));
        assert_eq!(doc.structure.first_article_index, Some(3));
    }

    #[test]
    fn test_parsed_document_without_structure() {
        let doc: ParsedDocument = serde_json::from_str(r#"{"recitals": []}"#).unwrap();
        assert!(doc.content.is_empty());
        assert_eq!(doc.structure, StructureAnalysis::default());
    }
}
