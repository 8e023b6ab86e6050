//! rw-youtube CLI - expand `::youtube` directives in a markdown file.
//!
//! Reads the input file, replaces each directive with an embed for the
//! chosen output format, and writes the result to stdout. Directives that
//! fail are left as source in the output, reported on stderr as
//! `path:line: youtube: message`, and make the command exit with status 1.

mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use rw_youtube::{Config, Diagnostic, DirectiveProcessor, EmbedSettings, OutputFormat, register};
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;

/// Expand `YouTube` embed directives in a markdown file.
#[derive(Parser)]
#[command(name = "rw-youtube", version, about)]
struct Cli {
    /// Markdown file to process.
    input: PathBuf,

    /// Output format: html, latex, or text.
    #[arg(short, long, default_value = "html")]
    format: OutputFormat,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long, env = "RW_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn execute(&self, output: &Output) -> Result<(), CliError> {
        let config = Config::load_or_discover(self.config.as_deref())?;
        let (expanded, diagnostics) = self.expand(&config.settings())?;

        // Failed directives stay as source, so the document is still written.
        output.document(&expanded)?;

        if !diagnostics.is_empty() {
            for diagnostic in &diagnostics {
                output.warning(&format!(
                    "{}:{}: {}: {}",
                    self.input.display(),
                    diagnostic.line,
                    diagnostic.directive,
                    diagnostic.error
                ));
            }
            return Err(CliError::Directives {
                count: diagnostics.len(),
            });
        }
        Ok(())
    }

    /// Expand directives in the input file.
    fn expand(&self, settings: &EmbedSettings) -> Result<(String, Vec<Diagnostic>), CliError> {
        let source = std::fs::read_to_string(&self.input).map_err(|source| CliError::Read {
            path: self.input.clone(),
            source,
        })?;

        let mut processor = DirectiveProcessor::with_settings(self.format, settings.clone());
        register(&mut processor);
        let expanded = processor.process(&source);
        tracing::info!(
            input = %self.input.display(),
            format = %processor.format(),
            failed = processor.diagnostics().len(),
            "Expanded directives"
        );
        Ok((expanded, processor.diagnostics().to_vec()))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
