//! Anchor matcher that locates structural entities in the source text.

use std::collections::HashSet;

use regex::Regex;

use super::disambiguate::{
    content_follows_anchor, context_window, number_equals, numeral_equals, KeywordSet,
};
use crate::config::MatchConfig;
use crate::error::Result;
use crate::patterns::{
    create_eu_regulation_patterns, parenthesized_marker, quoted_term, PatternRegistry,
};
use crate::text::{advance_chars, char_len, excerpt};
use crate::types::{
    Annex, Article, Chapter, Definition, EntityNumber, EntityType, Footnote, Match,
    ParsedContent, Recital,
};

/// A structural entity that can be anchored in the source text.
pub trait Anchorable {
    /// Entity type of every value of `Self`.
    const ENTITY: EntityType;

    /// Identifier of this entity within its type.
    fn number(&self) -> EntityNumber;

    /// Locate the entity, or `None` when no plausible anchor exists.
    fn locate(&self, matcher: &AnchorMatcher, text: &str) -> Option<Match>;
}

impl Anchorable for Recital {
    const ENTITY: EntityType = EntityType::Recital;

    fn number(&self) -> EntityNumber {
        EntityNumber::Number(self.recital_number)
    }

    fn locate(&self, matcher: &AnchorMatcher, text: &str) -> Option<Match> {
        matcher.find_recital(text, self)
    }
}

impl Anchorable for Article {
    const ENTITY: EntityType = EntityType::Article;

    fn number(&self) -> EntityNumber {
        EntityNumber::Number(self.article_number)
    }

    fn locate(&self, matcher: &AnchorMatcher, text: &str) -> Option<Match> {
        matcher.find_article(text, self)
    }
}

impl Anchorable for Annex {
    const ENTITY: EntityType = EntityType::Annex;

    fn number(&self) -> EntityNumber {
        EntityNumber::Label(self.roman_numeral.trim().to_string())
    }

    fn locate(&self, matcher: &AnchorMatcher, text: &str) -> Option<Match> {
        matcher.find_annex(text, self)
    }
}

impl Anchorable for Footnote {
    const ENTITY: EntityType = EntityType::Footnote;

    fn number(&self) -> EntityNumber {
        EntityNumber::Label(self.marker.trim().to_string())
    }

    fn locate(&self, matcher: &AnchorMatcher, text: &str) -> Option<Match> {
        matcher.find_footnote(text, self)
    }
}

impl Anchorable for Chapter {
    const ENTITY: EntityType = EntityType::Chapter;

    fn number(&self) -> EntityNumber {
        EntityNumber::Label(self.roman_numeral.trim().to_string())
    }

    fn locate(&self, matcher: &AnchorMatcher, text: &str) -> Option<Match> {
        matcher.find_chapter(text, self)
    }
}

impl Anchorable for Definition {
    const ENTITY: EntityType = EntityType::Definition;

    fn number(&self) -> EntityNumber {
        EntityNumber::Label(self.term.trim().to_string())
    }

    fn locate(&self, matcher: &AnchorMatcher, text: &str) -> Option<Match> {
        matcher.find_definition(text, self)
    }
}

/// Locates the first plausible occurrence of each structural entity.
///
/// The matcher is immutable once built and can be reused for every
/// recomputation; matching itself never fails, an entity without a plausible
/// anchor simply yields `None`.
#[derive(Debug, Clone)]
pub struct AnchorMatcher {
    config: MatchConfig,
    patterns: PatternRegistry,
    keywords: KeywordSet,
}

impl AnchorMatcher {
    /// Create a matcher with the EU regulation pattern table.
    pub fn new(config: MatchConfig) -> Result<Self> {
        let patterns = create_eu_regulation_patterns()?;
        Self::with_patterns(config, patterns)
    }

    /// Create a matcher with a custom pattern table.
    pub fn with_patterns(config: MatchConfig, patterns: PatternRegistry) -> Result<Self> {
        config.validate()?;
        let keywords = KeywordSet::new(&config.footnote_keywords)?;
        Ok(Self {
            config,
            patterns,
            keywords,
        })
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    /// Locate every entity in `content`.
    ///
    /// The result is sorted by `start_index` (ties keep discovery order),
    /// holds at most one match per `(type, number)`, and is pairwise
    /// non-overlapping: a span reaching into the next match is cut back to
    /// where that match starts. Every anchored entity is kept.
    pub fn find_all(&self, text: &str, content: &ParsedContent) -> Vec<Match> {
        let mut seen = HashSet::new();
        let mut matches = Vec::new();

        self.collect(text, &content.recitals, &mut seen, &mut matches);
        self.collect(text, &content.articles, &mut seen, &mut matches);
        self.collect(text, &content.annexes, &mut seen, &mut matches);
        self.collect(text, &content.footnotes, &mut seen, &mut matches);
        self.collect(text, &content.chapters, &mut seen, &mut matches);
        self.collect(text, &content.definitions, &mut seen, &mut matches);

        matches.sort_by_key(|m| m.start_index);
        let matches = trim_overlaps(matches);

        tracing::debug!(
            matched = matches.len(),
            recitals = content.recitals.len(),
            articles = content.articles.len(),
            annexes = content.annexes.len(),
            footnotes = content.footnotes.len(),
            "anchored entities"
        );

        matches
    }

    fn collect<A: Anchorable>(
        &self,
        text: &str,
        entities: &[A],
        seen: &mut HashSet<(EntityType, EntityNumber)>,
        matches: &mut Vec<Match>,
    ) {
        for entity in entities {
            let key = (A::ENTITY, entity.number());
            if seen.contains(&key) {
                tracing::debug!(entity = %key.0, number = %key.1, "duplicate entity, skipping");
                continue;
            }
            if let Some(found) = entity.locate(self, text) {
                seen.insert(key);
                matches.push(found);
            }
        }
    }

    /// Locate a recital by its `(N)` marker followed by its content.
    pub fn find_recital(&self, text: &str, recital: &Recital) -> Option<Match> {
        let number = recital.recital_number;
        let marker = marker_regex(EntityType::Recital, &number.to_string(), parenthesized_marker)?;
        let window_chars = self.config.lookahead_chars + self.config.recital_prefix_chars;

        let found = first_confirmed(&marker, text, |_, end, limit| {
            let window = context_window(text, end, window_chars, limit);
            content_follows_anchor(window, &recital.content, self.config.recital_prefix_chars)
        });

        let Some((start, end)) = found else {
            tracing::debug!(recital = number, "no anchor with matching content");
            return None;
        };

        let span_end = advance_chars(text, end, char_len(recital.content.trim()));
        Some(Match::new(
            EntityType::Recital,
            number,
            start,
            span_end,
            excerpt(&recital.content, self.config.excerpt_chars),
        ))
    }

    /// Locate an article heading whose number matches exactly.
    ///
    /// Languages are tried in pattern priority, occurrences in document order.
    /// The span end is a fixed-budget approximation of the article length,
    /// not its true boundary.
    pub fn find_article(&self, text: &str, article: &Article) -> Option<Match> {
        let number = article.article_number;

        for spec in self.patterns.patterns_for(EntityType::Article) {
            let Some(candidate) = spec
                .candidates(text)
                .find(|c| number_equals(c.identifier, number))
            else {
                continue;
            };

            tracing::trace!(article = number, language = %spec.language, start = candidate.start, "article anchor");
            let budget = char_len(&article.content).min(self.config.article_excerpt_budget)
                + self.config.article_end_padding;
            let end = advance_chars(text, candidate.start, budget);
            return Some(Match::new(
                EntityType::Article,
                number,
                candidate.start,
                end,
                excerpt(label_or_content(&article.title, &article.content), self.config.excerpt_chars),
            ));
        }

        tracing::debug!(article = number, "no article heading found");
        None
    }

    /// Locate an annex heading whose Roman numeral matches.
    pub fn find_annex(&self, text: &str, annex: &Annex) -> Option<Match> {
        let numeral = annex.roman_numeral.trim();
        let (start, _) = self.find_numbered_heading(text, EntityType::Annex, numeral)?;

        let end = advance_chars(text, start, self.config.annex_window_chars);
        Some(Match::new(
            EntityType::Annex,
            numeral,
            start,
            end,
            excerpt(label_or_content(&annex.title, &annex.content), self.config.excerpt_chars),
        ))
    }

    /// Locate a chapter heading whose Roman numeral matches.
    pub fn find_chapter(&self, text: &str, chapter: &Chapter) -> Option<Match> {
        let numeral = chapter.roman_numeral.trim();
        let (start, heading_end) = self.find_numbered_heading(text, EntityType::Chapter, numeral)?;

        // Heading, line break, title
        let end = advance_chars(text, heading_end, char_len(chapter.title.trim()) + 1);
        Some(Match::new(
            EntityType::Chapter,
            numeral,
            start,
            end,
            excerpt(&chapter.title, self.config.excerpt_chars),
        ))
    }

    /// Locate a footnote marker followed by an official-journal keyword.
    ///
    /// Numbered parentheses are everywhere in list-formatted legal text, so
    /// the marker alone is never enough.
    pub fn find_footnote(&self, text: &str, footnote: &Footnote) -> Option<Match> {
        let marker = footnote.marker.trim();
        if marker.is_empty() {
            return None;
        }
        let pattern = marker_regex(EntityType::Footnote, marker, parenthesized_marker)?;
        let window_chars = self.config.footnote_context_chars;

        let found = first_confirmed(&pattern, text, |start, _, limit| {
            let window = context_window(text, start, window_chars, limit);
            self.keywords.context_has_keyword(window)
        });

        let Some((start, anchor_end)) = found else {
            tracing::debug!(marker, "no footnote marker with journal context");
            return None;
        };

        // Without content the keyword window stands in for the footnote body
        let content_chars = char_len(footnote.content.trim());
        let end = if content_chars == 0 {
            advance_chars(text, start, window_chars)
        } else {
            advance_chars(text, anchor_end, content_chars)
        };
        Some(Match::new(
            EntityType::Footnote,
            marker,
            start,
            end,
            excerpt(&footnote.content, self.config.excerpt_chars),
        ))
    }

    /// Locate a quoted defined term, confirmed by its definition when given.
    pub fn find_definition(&self, text: &str, definition: &Definition) -> Option<Match> {
        let term = definition.term.trim();
        if term.is_empty() {
            return None;
        }
        let pattern = marker_regex(EntityType::Definition, term, quoted_term)?;
        let window_chars = self.config.lookahead_chars + self.config.recital_prefix_chars;

        let found = first_confirmed(&pattern, text, |_, end, limit| {
            let window = context_window(text, end, window_chars, limit);
            content_follows_anchor(window, &definition.definition, self.config.recital_prefix_chars)
        });

        let Some((start, end)) = found else {
            tracing::debug!(term, "no quoted term followed by its definition");
            return None;
        };

        let span_end = advance_chars(text, end, char_len(definition.definition.trim()));
        Some(Match::new(
            EntityType::Definition,
            term,
            start,
            span_end,
            excerpt(label_or_content(&definition.definition, term), self.config.excerpt_chars),
        ))
    }

    /// First heading of `entity` whose numeral equals `numeral`, as
    /// `(start, heading_end)`.
    fn find_numbered_heading(
        &self,
        text: &str,
        entity: EntityType,
        numeral: &str,
    ) -> Option<(usize, usize)> {
        let found = self.patterns.patterns_for(entity).find_map(|spec| {
            spec.candidates(text)
                .find(|c| numeral_equals(c.identifier, numeral))
                .map(|c| (c.start, c.end))
        });

        if found.is_none() {
            tracing::debug!(entity = %entity, numeral, "no heading found");
        }
        found
    }
}

/// Build a per-entity marker pattern, logging instead of failing.
fn marker_regex(
    entity: EntityType,
    marker: &str,
    build: fn(&str) -> std::result::Result<Regex, regex::Error>,
) -> Option<Regex> {
    match build(marker) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(entity = %entity, marker, error = %e, "could not build marker pattern");
            None
        }
    }
}

/// First occurrence of `pattern` accepted by `confirm`, as `(start, end)`.
///
/// `confirm` receives the occurrence's span and the start of the next
/// occurrence, which bounds its context window.
fn first_confirmed(
    pattern: &Regex,
    text: &str,
    confirm: impl Fn(usize, usize, Option<usize>) -> bool,
) -> Option<(usize, usize)> {
    let occurrences: Vec<(usize, usize)> =
        pattern.find_iter(text).map(|m| (m.start(), m.end())).collect();

    occurrences.iter().enumerate().find_map(|(i, &(start, end))| {
        let next = occurrences.get(i + 1).map(|&(next_start, _)| next_start);
        if confirm(start, end, next) {
            Some((start, end))
        } else {
            tracing::trace!(start, "anchor candidate rejected");
            None
        }
    })
}

/// Cut each span back so it ends no later than the next match starts.
///
/// Expects `matches` sorted by `start_index`. No match is dropped; an entity
/// nested in a longer span (a definition inside its article) keeps its own
/// anchor and the enclosing span ends where it begins.
fn trim_overlaps(mut matches: Vec<Match>) -> Vec<Match> {
    for i in 1..matches.len() {
        let next_start = matches[i].start_index;
        let previous = &mut matches[i - 1];
        if previous.end_index > next_start {
            tracing::debug!(
                entity = %previous.entity_type,
                number = %previous.number,
                end = previous.end_index,
                next_start,
                "span trimmed at next anchor"
            );
            previous.end_index = next_start;
        }
    }
    matches
}

fn label_or_content<'a>(label: &'a str, content: &'a str) -> &'a str {
    if label.trim().is_empty() {
        content
    } else {
        label
    }
}
