//! Pattern table for EU regulation text.

use regex::Regex;

use super::registry::PatternRegistry;
use super::types::{Language, PatternSpec};
use crate::error::Result;
use crate::types::EntityType;

/// Roman numeral capture shared by annex and chapter headings.
const ROMAN: &str = r"((?i:[ivxlcdm]+))";

/// Create the pattern registry for EU regulation headings.
///
/// Priority within each entity type follows registration order:
///
/// ```text
/// article   English "Article 5", French "Article 1er", German "Artikel 5",
///           Spanish "Artículo 5", Italian "Articolo 5", Portuguese "Artigo 5"
/// annex     ANNEX, ANHANG, ANNEXE, ANEXO, ALLEGATO, BIJLAGE
/// chapter   CHAPTER, KAPITEL, CHAPITRE, CAPÍTULO, CAPO, HOOFDSTUK
/// ```
///
/// Annex and chapter keywords are upper-case only: that is how the headings
/// are typeset, while cross-references ("see Annex II") are not.
///
/// # Errors
/// Only if a table entry fails to compile.
pub fn create_eu_regulation_patterns() -> Result<PatternRegistry> {
    let mut registry = PatternRegistry::new();

    let articles = [
        (Language::English, r"\bArticle\s+(\d+)\b"),
        (Language::French, r"\bArticle\s+(\d+)er\b"),
        // Also covers Dutch "Artikel"
        (Language::German, r"\bArtikel\s+(\d+)\b"),
        (Language::Spanish, r"\bArtículo\s+(\d+)\b"),
        (Language::Italian, r"\bArticolo\s+(\d+)\b"),
        (Language::Portuguese, r"\bArtigo\s+(\d+)\b"),
    ];
    for (language, pattern) in articles {
        registry.register(PatternSpec::new(EntityType::Article, language, pattern)?);
    }

    let annexes = [
        (Language::English, "ANNEX"),
        (Language::German, "ANHANG"),
        (Language::French, "ANNEXE"),
        // Also covers Portuguese "ANEXO"
        (Language::Spanish, "ANEXO"),
        (Language::Italian, "ALLEGATO"),
        (Language::Dutch, "BIJLAGE"),
    ];
    for (language, keyword) in annexes {
        let pattern = format!(r"\b{keyword}\s+{ROMAN}\b");
        registry.register(PatternSpec::new(EntityType::Annex, language, &pattern)?);
    }

    let chapters = [
        (Language::English, "CHAPTER"),
        (Language::German, "KAPITEL"),
        (Language::French, "CHAPITRE"),
        (Language::Spanish, "CAPÍTULO"),
        (Language::Italian, "CAPO"),
        (Language::Dutch, "HOOFDSTUK"),
    ];
    for (language, keyword) in chapters {
        let pattern = format!(r"\b{keyword}\s+{ROMAN}\b");
        registry.register(PatternSpec::new(EntityType::Chapter, language, &pattern)?);
    }

    Ok(registry)
}

/// Pattern for a parenthesised marker followed by whitespace, e.g. `(3) `.
///
/// The marker is escaped, so `*` becomes `\*`.
///
/// # Examples
/// ```
/// use regelrecht_anchor::patterns::parenthesized_marker;
///
/// let re = parenthesized_marker("*").unwrap();
/// assert!(re.is_match("(*) OJ L 1"));
/// assert!(!re.is_match("(**) OJ L 1"));
/// ```
pub fn parenthesized_marker(marker: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"\({}\)\s", regex::escape(marker)))
}

/// Pattern for a term in any of the quote styles used across language versions.
///
/// # Examples
/// ```
/// use regelrecht_anchor::patterns::quoted_term;
///
/// let re = quoted_term("personal data").unwrap();
/// assert!(re.is_match("(1) ‘personal data’ means"));
/// assert!(re.is_match("„personal data“ bezeichnet"));
/// assert!(!re.is_match("personal data means"));
/// ```
pub fn quoted_term(term: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"[‘'"“«„]{}[’'"”»“]"#,
        regex::escape(term)
    ))
}
