//! Partitioning of the source text into plain and highlighted segments.

use crate::config::HighlightWidths;
use crate::text::advance_chars;
use crate::types::{Match, Segment};

/// Turns accepted matches into a gapless, overlap-free partition of the text.
///
/// Concatenating the `text` of the produced segments always reproduces the
/// source exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentBuilder {
    widths: HighlightWidths,
}

impl SegmentBuilder {
    #[must_use]
    pub fn new(widths: HighlightWidths) -> Self {
        Self { widths }
    }

    /// Build the segment list for `text`.
    ///
    /// Each highlight covers the first `width` chars from the match start,
    /// with `width` the per-type highlight width, regardless of how long the
    /// entity really is. When that window would reach the next entity, the
    /// highlight stops at the end of its own span instead. Matches are walked
    /// in ascending start order (stable); a match starting inside an earlier
    /// highlight is truncated to begin where that highlight ends, or dropped
    /// when nothing remains.
    #[must_use]
    pub fn build(&self, text: &str, matches: &[Match]) -> Vec<Segment> {
        let mut ordered: Vec<&Match> = matches.iter().collect();
        ordered.sort_by_key(|m| m.start_index);

        let mut segments = Vec::with_capacity(ordered.len() * 2 + 1);
        let mut last_end = 0;

        for (i, m) in ordered.iter().enumerate() {
            let (start, end) = (m.start_index, m.end_index.min(text.len()));
            if start > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
                tracing::warn!(
                    entity = %m.entity_type,
                    number = %m.number,
                    start,
                    "match outside source text, not highlighted"
                );
                continue;
            }

            let mut highlight_end = advance_chars(text, start, self.widths.get(m.entity_type));
            let next_entity = ordered[i + 1..]
                .iter()
                .map(|next| next.start_index)
                .find(|&next_start| next_start >= end);
            if next_entity.is_some_and(|next_start| next_start < highlight_end) {
                highlight_end = end;
            }

            let highlight_start = start.max(last_end);
            if highlight_end <= highlight_start {
                tracing::trace!(entity = %m.entity_type, number = %m.number, "highlight absorbed");
                continue;
            }

            if highlight_start > last_end {
                segments.push(Segment::plain(text, last_end, highlight_start));
            }
            segments.push(Segment::highlighted(
                text,
                highlight_start,
                highlight_end,
                (*m).clone(),
            ));
            last_end = highlight_end;
        }

        if last_end < text.len() {
            segments.push(Segment::plain(text, last_end, text.len()));
        }

        segments
    }
}
