//! Selection state and scroll-target computation.
//!
//! The coordinator owns the single `SelectionState`. It starts `Idle`, moves
//! to `Selected` on a click or an external "navigate to" request, and a new
//! selection always replaces the previous one. There is no way back to
//! `Idle`.

use serde::Serialize;

use crate::config::SCROLL_OFFSET_PX;
use crate::text::count_newlines;
use crate::types::{EntityNumber, EntityType, Match, Segment};

/// Currently highlighted entity, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SelectionState {
    #[default]
    Idle,
    Selected {
        #[serde(rename = "type")]
        entity_type: EntityType,
        number: EntityNumber,
    },
}

impl SelectionState {
    #[must_use]
    pub fn is_selected(&self, entity_type: EntityType, number: &EntityNumber) -> bool {
        match self {
            Self::Idle => false,
            Self::Selected {
                entity_type: selected_type,
                number: selected_number,
            } => *selected_type == entity_type && selected_number == number,
        }
    }
}

/// Maps user selection of an entity to an approximate scroll position.
#[derive(Debug, Clone, Default)]
pub struct SelectionCoordinator {
    state: SelectionState,
}

impl SelectionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Select an entity, e.g. from a side-panel list row.
    pub fn select_entity(&mut self, entity_type: EntityType, number: impl Into<EntityNumber>) {
        let number = number.into();
        tracing::debug!(entity = %entity_type, number = %number, "entity selected");
        self.state = SelectionState::Selected {
            entity_type,
            number,
        };
    }

    /// Select the entity behind a clicked segment.
    ///
    /// Returns `false` and leaves the state untouched for plain segments.
    pub fn select_segment(&mut self, segment: &Segment) -> bool {
        match &segment.anchor {
            Some(anchor) => {
                self.select_entity(anchor.entity_type, anchor.number.clone());
                true
            }
            None => false,
        }
    }

    /// Whether the given entity is the current selection.
    #[must_use]
    pub fn is_selected(&self, entity_type: EntityType, number: &EntityNumber) -> bool {
        self.state.is_selected(entity_type, number)
    }

    /// The match of the selected entity, if it was anchored.
    #[must_use]
    pub fn selected_match<'m>(&self, matches: &'m [Match]) -> Option<&'m Match> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Selected {
                entity_type,
                number,
            } => matches.iter().find(|m| m.is_entity(*entity_type, number)),
        }
    }

    /// Scroll position for the selected entity, in pixels.
    ///
    /// `None` when nothing is selected or the selected entity has no match.
    #[must_use]
    pub fn scroll_target(&self, text: &str, matches: &[Match], scroll_height: f64) -> Option<f64> {
        let selected = self.selected_match(matches)?;
        Some(approximate_scroll_offset(
            text,
            selected.start_index,
            scroll_height,
        ))
    }
}

/// Approximate scroll offset of byte `index` in a rendered `text`.
///
/// Assumes every line has the same rendered height, so the offset is the
/// fraction of newlines before `index` times the scroll height, minus
/// [`SCROLL_OFFSET_PX`]. This is a heuristic, not a layout measurement:
/// wrapped long lines make it undershoot. Clamped at zero; text without
/// newlines always yields zero.
///
/// # Examples
/// ```
/// use regelrecht_anchor::selection::approximate_scroll_offset;
///
/// let text = "a\nb\nc\nd\n";
/// assert_eq!(approximate_scroll_offset(text, 4, 1000.0), 400.0);
/// ```
#[must_use]
pub fn approximate_scroll_offset(text: &str, index: usize, scroll_height: f64) -> f64 {
    let total = count_newlines(text);
    if total == 0 {
        return 0.0;
    }
    let index = index.min(text.len());
    let before = text.as_bytes()[..index].iter().filter(|b| **b == b'\n').count();

    let target = (before as f64 / total as f64) * scroll_height - SCROLL_OFFSET_PX;
    target.max(0.0)
}
