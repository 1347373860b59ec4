//! End-to-end tests for anchoring and segmentation.
//!
//! Uses fixture data from an excerpt of Regulation (EU) 2016/679 (GDPR).

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use regelrecht_anchor::analysis::ParsedDocument;
use regelrecht_anchor::types::{
    Annex, Article, EntityNumber, EntityType, Footnote, Match, ParsedContent, Recital, Segment,
    StructureAnalysis,
};
use regelrecht_anchor::{
    analyze_document, AnchorMatcher, DocumentAnalysis, MatchConfig, SegmentBuilder,
    SelectionCoordinator,
};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("gdpr")
        .join(name)
}

fn matcher() -> AnchorMatcher {
    AnchorMatcher::new(MatchConfig::default()).expect("default config is valid")
}

/// Run the analysis on the GDPR fixtures.
fn analyze_gdpr() -> (String, DocumentAnalysis) {
    let text = load_fixture("regulation.txt");
    let document = ParsedDocument::load(&fixture_path("parsed.json")).expect("Failed to parse JSON");
    let analysis = analyze_document(&matcher(), &text, &document.content, &document.structure);
    (text, analysis)
}

fn concat(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

fn assert_non_overlapping(matches: &[Match]) {
    for pair in matches.windows(2) {
        assert!(
            pair[0].end_index <= pair[1].start_index,
            "{} {} overlaps {} {}",
            pair[0].entity_type,
            pair[0].number,
            pair[1].entity_type,
            pair[1].number
        );
    }
}

#[test]
fn test_gdpr_all_entities_anchored() {
    let (_, analysis) = analyze_gdpr();

    assert_eq!(analysis.matches.len(), 11);
    assert_eq!(analysis.incomplete().count(), 0);
    assert_eq!(analysis.stats.recitals, 3);
    assert_eq!(analysis.stats.definitions, 2);
    assert_eq!(analysis.structure.detected_language.as_deref(), Some("en"));
}

#[test]
fn test_gdpr_anchor_positions() {
    let (text, analysis) = analyze_gdpr();
    let start_of = |entity: EntityType, number: EntityNumber| {
        analysis
            .find_match(entity, &number)
            .unwrap_or_else(|| panic!("{entity} {number} not anchored"))
            .start_index
    };

    assert_eq!(
        start_of(EntityType::Recital, 1.into()),
        text.find("(1) The protection").unwrap()
    );
    assert_eq!(
        start_of(EntityType::Footnote, "1".into()),
        text.find("(1) OJ L 281").unwrap()
    );
    assert_eq!(start_of(EntityType::Chapter, "I".into()), text.find("CHAPTER I").unwrap());
    assert_eq!(
        start_of(EntityType::Article, 4.into()),
        text.find("Article 4\n").unwrap()
    );
    assert_eq!(
        start_of(EntityType::Article, 40.into()),
        text.find("Article 40").unwrap()
    );
    assert_eq!(start_of(EntityType::Annex, "I".into()), text.find("ANNEX I").unwrap());
    assert_eq!(
        start_of(EntityType::Definition, "processing".into()),
        text.find("‘processing’").unwrap()
    );
}

#[test]
fn test_gdpr_definitions_inside_article_kept() {
    let (text, analysis) = analyze_gdpr();
    let article = analysis
        .find_match(EntityType::Article, &4.into())
        .unwrap();
    let definition = analysis
        .find_match(EntityType::Definition, &"personal data".into())
        .unwrap();

    // The article content spans both definitions; its span ends where they begin
    assert_eq!(article.end_index, definition.start_index);
    assert_eq!(definition.start_index, text.find("‘personal data’").unwrap());

    let definitions = analysis
        .coverage
        .iter()
        .find(|c| c.entity == EntityType::Definition)
        .unwrap();
    assert_eq!(definitions.detected, 2);

    let mut coordinator = SelectionCoordinator::new();
    coordinator.select_entity(EntityType::Definition, "processing");
    assert!(coordinator
        .scroll_target(&text, &analysis.matches, 5000.0)
        .is_some());
}

#[test]
fn test_short_recital_highlight_keeps_full_width() {
    let text = format!("(1) Short recital.\n{}", "x".repeat(200));
    let content = ParsedContent {
        recitals: vec![Recital::new(1, "Short recital.")],
        ..ParsedContent::default()
    };

    let analysis = analyze_document(&matcher(), &text, &content, &StructureAnalysis::default());

    assert!(analysis.segments[0].is_highlighted());
    assert_eq!(analysis.segments[0].text.chars().count(), 100);
    assert_eq!(concat(&analysis.segments), text);
}

#[test]
fn test_gdpr_matches_sorted_and_disjoint() {
    let (_, analysis) = analyze_gdpr();

    assert!(analysis
        .matches
        .windows(2)
        .all(|pair| pair[0].start_index <= pair[1].start_index));
    assert_non_overlapping(&analysis.matches);
}

#[test]
fn test_gdpr_segments_round_trip() {
    let (text, analysis) = analyze_gdpr();

    assert_eq!(concat(&analysis.segments), text);
    assert_eq!(
        analysis.segments.iter().filter(|s| s.is_highlighted()).count(),
        analysis.matches.len()
    );
    for pair in analysis.segments.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn test_gdpr_select_and_scroll() {
    let (text, analysis) = analyze_gdpr();
    let annex_segment = analysis
        .segments
        .iter()
        .find(|s| s.text.starts_with("ANNEX I"))
        .unwrap();

    let mut coordinator = SelectionCoordinator::new();
    assert!(coordinator.select_segment(annex_segment));
    assert!(coordinator.is_selected(EntityType::Annex, &"I".into()));

    let scroll = coordinator
        .scroll_target(&text, &analysis.matches, 5000.0)
        .unwrap();
    assert!(scroll > 0.0 && scroll < 5000.0);
}

#[test]
fn test_scenario_article_and_recital() {
    let text = "Article 1\nSubject matter\n...(1) some recital text...";
    let content = ParsedContent {
        articles: vec![Article::new(1, "Subject matter", "")],
        recitals: vec![Recital::new(1, "some recital text...")],
        ..ParsedContent::default()
    };

    let analysis = analyze_document(&matcher(), text, &content, &StructureAnalysis::default());

    let kinds: Vec<_> = analysis.matches.iter().map(|m| m.entity_type).collect();
    assert_eq!(kinds, vec![EntityType::Article, EntityType::Recital]);

    let segments = &analysis.segments;
    assert_eq!(segments.len(), 3);
    assert!(segments[0].is_highlighted());
    assert!(segments[0].text.starts_with("Article 1"));
    assert!(!segments[1].is_highlighted());
    assert!(segments[2].is_highlighted());
    assert!(segments[2].text.starts_with("(1) some recital text"));
    assert_eq!(concat(segments), text);
}

#[test]
fn test_round_trip_with_empty_content() {
    let text = "REGULATION (EU) 2024/1689\n\nWhereas:\n(1) Text.";
    let analysis = analyze_document(
        &matcher(),
        text,
        &ParsedContent::default(),
        &StructureAnalysis::default(),
    );

    assert!(analysis.matches.is_empty());
    assert_eq!(analysis.segments.len(), 1);
    assert_eq!(concat(&analysis.segments), text);
}

#[test]
fn test_analysis_is_deterministic() {
    let (text, first) = analyze_gdpr();
    let document = ParsedDocument::load(&fixture_path("parsed.json")).unwrap();
    let second = analyze_document(&matcher(), &text, &document.content, &document.structure);

    assert_eq!(first, second);
}

#[test]
fn test_footnote_disambiguation() {
    let text = "(1) Some list item. Later: (1) OJ L 123, 1.1.2020.";
    let content = ParsedContent {
        footnotes: vec![Footnote::new("1", "OJ L 123, 1.1.2020.")],
        ..ParsedContent::default()
    };

    let matches = matcher().find_all(text, &content);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start_index, 27);
}

#[test]
fn test_article_number_exactness() {
    let text = "Article 150\nFinal provisions\n\nArticle 15\nRight of access";
    let content = ParsedContent {
        articles: vec![Article::new(15, "Right of access", "")],
        ..ParsedContent::default()
    };

    let matches = matcher().find_all(text, &content);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start_index, text.find("Article 15\n").unwrap());
}

#[test]
fn test_missing_annex_tolerated() {
    let text = "Article 1\nScope\n\nANNEX I\nList of authorities";
    let present = ParsedContent {
        articles: vec![Article::new(1, "Scope", "")],
        annexes: vec![Annex::new(1, "I", "List of authorities")],
        ..ParsedContent::default()
    };
    let mut with_missing = present.clone();
    with_missing
        .annexes
        .push(Annex::new(2, "II", "Not in this text"));

    let structure = StructureAnalysis::default();
    let baseline = analyze_document(&matcher(), text, &present, &structure);
    let analysis = analyze_document(&matcher(), text, &with_missing, &structure);

    assert_eq!(analysis.matches, baseline.matches);
    assert_eq!(analysis.segments, baseline.segments);
    assert_eq!(analysis.stats.annexes, 2);
}

#[test]
fn test_multibyte_text() {
    let text = "Artikel 1\nGegenstand und Ziele\n\nDiese Verordnung enthält Vorschriften über Maßnahmen.\n\nANHANG II\nÜbersicht der Verarbeitungstätigkeiten für Behörden und Einrichtungen";
    let content = ParsedContent {
        articles: vec![Article::new(1, "Gegenstand und Ziele", "")],
        annexes: vec![Annex::new(2, "II", "Übersicht der Verarbeitungstätigkeiten")],
        ..ParsedContent::default()
    };

    let analysis = analyze_document(&matcher(), text, &content, &StructureAnalysis::default());

    assert_eq!(analysis.matches.len(), 2);
    assert_eq!(analysis.matches[1].start_index, text.find("ANHANG II").unwrap());
    assert_eq!(concat(&analysis.segments), text);
    for segment in &analysis.segments {
        assert!(text.is_char_boundary(segment.start));
        assert!(text.is_char_boundary(segment.end));
    }
}

#[test]
fn test_segment_builder_accepts_external_matches() {
    let text = "a".repeat(400);
    let matches = vec![
        Match::new(EntityType::Annex, "I", 0, 200, ""),
        Match::new(EntityType::Footnote, "1", 150, 250, ""),
        Match::new(EntityType::Article, 2, 300, 320, ""),
    ];

    let segments = SegmentBuilder::default().build(&text, &matches);

    assert_eq!(concat(&segments), text);
    assert!(segments.windows(2).all(|pair| pair[0].end == pair[1].start));
}
