//! RegelRecht Anchor - Locate and highlight the structure of EU regulation text.
//!
//! Given the raw text of a regulation and its already-parsed structure
//! (recitals, articles, annexes, footnotes, chapters, definitions), this crate
//! finds where each entity starts in the raw text and splits the text into
//! plain and highlighted segments a reader can click to navigate.
//!
//! # Example
//!
//! ```
//! use regelrecht_anchor::{analyze_document, AnchorMatcher, MatchConfig};
//! use regelrecht_anchor::types::{Article, ParsedContent, Recital, StructureAnalysis};
//!
//! let text = "Article 1\nSubject matter\n...(1) some recital text...";
//! let content = ParsedContent {
//!     articles: vec![Article::new(1, "Subject matter", "")],
//!     recitals: vec![Recital::new(1, "some recital text...")],
//!     ..ParsedContent::default()
//! };
//!
//! let matcher = AnchorMatcher::new(MatchConfig::default()).unwrap();
//! let analysis = analyze_document(&matcher, text, &content, &StructureAnalysis::default());
//!
//! assert_eq!(analysis.matches.len(), 2);
//! let rebuilt: String = analysis.segments.iter().map(|s| s.text.as_str()).collect();
//! assert_eq!(rebuilt, text);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Named windows and the tunable `MatchConfig`
//! - [`types`]: Input model, `Match` and `Segment`
//! - [`error`]: Error types and Result alias
//! - [`text`]: Char-aware offset helpers
//! - [`patterns`]: Heading patterns keyed by entity type and language
//! - [`matching`]: Anchor matcher and per-type disambiguation
//! - [`segments`]: Partition of the text into segments
//! - [`selection`]: Selection state and scroll targets
//! - [`analysis`]: One-call analysis and summary counts
//! - [`cli`]: Command-line interface

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod patterns;
pub mod segments;
pub mod selection;
pub mod text;
pub mod types;

// Re-export main functions
pub use analysis::{analyze_document, DocumentAnalysis, Stats};

// Re-export commonly used items
pub use config::MatchConfig;
pub use error::{AnchorError, Result};
pub use matching::AnchorMatcher;
pub use segments::SegmentBuilder;
pub use selection::{SelectionCoordinator, SelectionState};
pub use types::{EntityNumber, EntityType, Match, ParsedContent, Segment};
