//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Quickcalc - everyday finance, fitness, betting, gardening and math calculators.
#[derive(Parser, Debug)]
#[command(name = "quickcalc", version, about)]
pub struct AppConfig {
    /// Output format.
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Json,
        env = "QUICKCALC_FORMAT",
        global = true
    )]
    pub format: OutputFormat,

    /// Log calculator internals to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List available calculators.
    List {
        /// Only show one category (finance, fitness, betting, gardening, math).
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a calculator's description and default input.
    Describe {
        /// Calculator slug or alias, e.g. `loan` or `mortgage`.
        slug: String,
    },

    /// Run one calculator. Input JSON comes from --input, --file, or stdin.
    Run {
        /// Calculator slug or alias.
        slug: String,

        /// Input as inline JSON.
        #[arg(short, long, conflicts_with = "file")]
        input: Option<String>,

        /// Read input JSON from a file.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Run a JSON array of `{"calculator": ..., "input": {...}}` requests.
    Batch {
        /// Path to the batch file.
        path: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Machine-readable JSON
    Json,
    /// Aligned key/value text
    Pretty,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Default tracing filter when RUST_LOG is unset.
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
