//! Command-line interface for inspecting anchor results.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::analysis::{analyze_document, DocumentAnalysis, ParsedDocument};
use crate::config::MatchConfig;
use crate::error::{AnchorError, Result};
use crate::matching::AnchorMatcher;
use crate::selection::SelectionCoordinator;
use crate::types::{EntityNumber, EntityType};

/// Default scroll height used by `locate`, in pixels.
const DEFAULT_SCROLL_HEIGHT: f64 = 10_000.0;

/// RegelRecht Anchor - Locate and highlight the structure of EU regulation text.
#[derive(Parser)]
#[command(name = "regelrecht-anchor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Anchor every parsed entity in the regulation text.
    Analyze {
        /// Raw regulation text file
        text: PathBuf,

        /// Parsed content JSON (recitals, articles, annexes, ...)
        #[arg(short, long)]
        content: PathBuf,

        /// YAML file overriding match windows and keywords
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Locate one entity and compute its approximate scroll position.
    Locate {
        /// Raw regulation text file
        text: PathBuf,

        /// Parsed content JSON (recitals, articles, annexes, ...)
        #[arg(short, long)]
        content: PathBuf,

        /// Entity type (recital, article, annex, footnote, chapter, definition)
        #[arg(short, long)]
        entity: String,

        /// Entity number, numeral, marker or term
        #[arg(short, long)]
        number: String,

        /// Total scrollable height of the rendered text, in pixels
        #[arg(long, default_value_t = DEFAULT_SCROLL_HEIGHT)]
        scroll_height: f64,

        /// YAML file overriding match windows and keywords
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            text,
            content,
            config,
            json,
        } => analyze_command(&text, &content, config.as_deref(), json),
        Commands::Locate {
            text,
            content,
            entity,
            number,
            scroll_height,
            config,
        } => locate_command(
            &text,
            &content,
            &entity,
            &number,
            scroll_height,
            config.as_deref(),
        ),
    }
}

/// Read the text, the parsed document and the configuration, then analyze.
fn load_and_analyze(
    text_path: &Path,
    content_path: &Path,
    config_path: Option<&Path>,
) -> Result<(String, DocumentAnalysis)> {
    let config = match config_path {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    let matcher = AnchorMatcher::new(config)?;

    let text = std::fs::read_to_string(text_path)?;
    let document = ParsedDocument::load(content_path)?;

    let analysis = analyze_document(&matcher, &text, &document.content, &document.structure);
    Ok((text, analysis))
}

/// Execute the analyze command.
fn analyze_command(
    text_path: &Path,
    content_path: &Path,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let (_, analysis) = load_and_analyze(text_path, content_path, config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!(
        "{} {}",
        style("Analyzed").bold(),
        style(text_path.display()).cyan()
    );
    if let Some(language) = &analysis.structure.detected_language {
        println!("  Language: {}", style(language).green());
    }
    println!();

    for coverage in analysis.coverage.iter().filter(|c| c.expected > 0) {
        let line = format!(
            "  {:<12} {} of {} detected",
            coverage.entity.as_str(),
            coverage.detected,
            coverage.expected
        );
        if coverage.missing() > 0 {
            println!("{}", style(line).yellow());
        } else {
            println!("{line}");
        }
    }

    println!();
    println!("{}", style("Matches:").bold());
    for m in &analysis.matches {
        println!(
            "  {} {} {}",
            style(m.entity_type.as_str()).cyan(),
            style(&m.number).bold(),
            style(format!("[{}..{}]", m.start_index, m.end_index)).dim()
        );
        if !m.content.is_empty() {
            println!("{}", textwrap::indent(&textwrap::fill(&m.content, 72), "      "));
        }
    }

    let highlighted = analysis.segments.iter().filter(|s| s.is_highlighted()).count();
    println!();
    println!(
        "{} {} segments, {} highlighted",
        style("Rendered:").green().bold(),
        analysis.segments.len(),
        highlighted
    );

    Ok(())
}

/// Execute the locate command.
fn locate_command(
    text_path: &Path,
    content_path: &Path,
    entity: &str,
    number: &str,
    scroll_height: f64,
    config_path: Option<&Path>,
) -> Result<()> {
    // Validate inputs before reading any file
    let entity: EntityType = entity.parse()?;
    let number = EntityNumber::for_entity(entity, number);

    let (text, analysis) = load_and_analyze(text_path, content_path, config_path)?;

    let mut coordinator = SelectionCoordinator::new();
    coordinator.select_entity(entity, number.clone());

    let Some(found) = coordinator.selected_match(&analysis.matches) else {
        return Err(AnchorError::EntityNotFound { entity, number });
    };
    let scroll = coordinator
        .scroll_target(&text, &analysis.matches, scroll_height)
        .unwrap_or_default();

    println!(
        "{} {} {} at bytes {}..{}",
        style("Found").green().bold(),
        style(entity.as_str()).cyan(),
        style(&number).bold(),
        found.start_index,
        found.end_index
    );
    println!("  Scroll target: {scroll:.0}px of {scroll_height:.0}px");
    if !found.content.is_empty() {
        println!("{}", textwrap::indent(&textwrap::fill(&found.content, 72), "  "));
    }

    Ok(())
}
