//! Pattern table for locating structural headings in regulation text.
//!
//! Keyword patterns ("Article 5", "ANHANG II") are declared once per
//! `(EntityType, Language)` pair and iterated in registration order, which is
//! the matching priority. Marker patterns ("(3) ", "‘term’") depend on the
//! entity being searched for and are built on demand.

mod config;
mod registry;
mod types;

pub use config::{create_eu_regulation_patterns, parenthesized_marker, quoted_term};
pub use registry::PatternRegistry;
pub use types::{Candidate, Language, PatternSpec};
