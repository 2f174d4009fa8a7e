use std::{io::Read, num::NonZeroUsize, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::instrument;
use wikireq::{Engine, ExtractionResult, Options, Prefix, SourceDocument};

use super::terminal::{Colorize, width};

/// Parse a prefix from a string, normalizing to uppercase.
///
/// This is a CLI boundary function that accepts lowercase input and
/// normalizes it before validating.
fn parse_prefix(s: &str) -> Result<Prefix, String> {
    let uppercase = s.to_uppercase();
    uppercase.parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, Parser)]
#[command(about = "Extract requirement records from wiki table markup")]
pub struct Extract {
    /// Path to the markup file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Page identifier recorded on each extracted record
    #[arg(long, value_name = "ID", default_value = "")]
    page_id: String,

    /// Page title echoed into the result
    #[arg(long, value_name = "TITLE", default_value = "")]
    title: String,

    /// Requirement identifier prefix to recognize (e.g. REQ)
    #[arg(long, value_name = "PREFIX", value_parser = parse_prefix)]
    prefix: Option<Prefix>,

    /// Rows per section
    #[arg(long, value_name = "N", default_value_t = Options::DEFAULT_SECTION_BATCH)]
    batch_size: NonZeroUsize,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and summary
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Extract {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let raw_markup = self.read_markup()?;

        let document = SourceDocument::new(self.page_id.clone(), self.title.clone(), raw_markup);
        let options = Options::new(self.prefix.clone(), self.batch_size);
        let result = Engine::new(options).extract(&document);

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Table => self.output_table(&result),
        }

        Ok(())
    }

    fn read_markup(&self) -> anyhow::Result<String> {
        match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read markup from stdin")?;
                Ok(buffer)
            }
        }
    }

    fn output_table(&self, result: &ExtractionResult) {
        if result.records().is_empty() {
            if !self.quiet {
                println!("No requirements found.");
                if result.skipped_rows() > 0 {
                    println!(
                        "{}",
                        format!("({} rows skipped)", result.skipped_rows()).warning()
                    );
                }
            }
            return;
        }

        if !self.quiet {
            let summary = format!("Extracted {} requirements", result.records().len());
            if result.skipped_rows() > 0 {
                println!(
                    "{} {}",
                    summary.success(),
                    format!("({} rows skipped)", result.skipped_rows()).warning()
                );
            } else {
                println!("{}", summary.success());
            }
            println!();
            println!("{:<12} {:<5} {:>4}  CONTENT", "ID", "TYPE", "SEC");
            println!("{}", "─".repeat(70).dim());
        }

        // Fixed columns take 25 characters; clamp the content to what is
        // left of the terminal, if its width is known.
        let max_content = width()
            .map(|w| usize::from(w).saturating_sub(25))
            .filter(|available| *available >= 20);

        for record in result.records() {
            let id = record
                .id
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string);
            println!(
                "{:<12} {:<5} {:>4}  {}",
                id,
                record.req_type,
                record.section,
                clamp(record.content.as_str(), max_content)
            );
        }
    }
}

/// Truncates `text` to `max` characters, marking the cut with an ellipsis.
fn clamp(text: &str, max: Option<usize>) -> String {
    let Some(max) = max else {
        return text.to_string();
    };

    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
