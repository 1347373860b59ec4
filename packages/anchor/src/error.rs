//! Error types for the anchor engine.
//!
//! Matching an individual entity never fails: a missing anchor is an absent
//! `Match`, not an error. `AnchorError` covers the fallible edges around the
//! engine (pattern compilation, configuration, and loading inputs from disk).

use thiserror::Error;

use crate::types::{EntityNumber, EntityType};

/// Main error type for the anchor library.
#[derive(Debug, Error)]
pub enum AnchorError {
    /// A pattern in the pattern table failed to compile.
    #[error("Invalid {language} pattern for {entity}: {source}")]
    InvalidPattern {
        entity: EntityType,
        language: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Entity type name not recognised.
    #[error("Unknown entity type: '{0}'. Expected one of recital, article, annex, footnote, chapter, definition")]
    UnknownEntityType(String),

    /// The requested entity has no anchor in the source text.
    #[error("No anchor found for {entity} {number}")]
    EntityNotFound {
        entity: EntityType,
        number: EntityNumber,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for anchor operations.
pub type Result<T> = std::result::Result<T, AnchorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnchorError::UnknownEntityType("paragraph".to_string());
        assert!(err.to_string().contains("paragraph"));
        assert!(err.to_string().contains("recital"));
    }

    #[test]
    fn test_entity_not_found_display() {
        let err = AnchorError::EntityNotFound {
            entity: EntityType::Annex,
            number: EntityNumber::Label("IV".to_string()),
        };
        assert_eq!(err.to_string(), "No anchor found for annex IV");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = AnchorError::InvalidPattern {
            entity: EntityType::Article,
            language: "English".to_string(),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("Invalid English pattern for article:"));
    }
}
