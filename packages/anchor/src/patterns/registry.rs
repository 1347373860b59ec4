//! Pattern registry keyed by entity type and language.

use std::collections::HashMap;

use super::types::{Language, PatternSpec};
use crate::types::EntityType;

/// Registry of heading patterns.
///
/// Patterns are kept in registration order; that order is the matching
/// priority within an entity type.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    specs: Vec<PatternSpec>,
    index: HashMap<(EntityType, Language), usize>,
}

impl PatternRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern.
    ///
    /// Re-registering an `(entity, language)` pair replaces the pattern but
    /// keeps its original priority.
    pub fn register(&mut self, spec: PatternSpec) {
        let key = (spec.entity, spec.language);
        if let Some(&slot) = self.index.get(&key) {
            self.specs[slot] = spec;
        } else {
            self.index.insert(key, self.specs.len());
            self.specs.push(spec);
        }
    }

    /// Get the pattern for an entity type in a language.
    #[must_use]
    pub fn get(&self, entity: EntityType, language: Language) -> Option<&PatternSpec> {
        self.index.get(&(entity, language)).map(|&slot| &self.specs[slot])
    }

    /// Patterns for an entity type, highest priority first.
    pub fn patterns_for(&self, entity: EntityType) -> impl Iterator<Item = &PatternSpec> {
        self.specs.iter().filter(move |spec| spec.entity == entity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
