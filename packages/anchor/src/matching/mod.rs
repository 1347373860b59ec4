//! Anchor matching for structural entities.
//!
//! [`AnchorMatcher`] finds candidates with the pattern table and confirms
//! them with an acceptance rule specific to each entity type.

mod disambiguate;
mod matcher;

pub use disambiguate::{
    content_follows_anchor, context_window, number_equals, numeral_equals, KeywordSet,
};
pub use matcher::{AnchorMatcher, Anchorable};
