//! # Quickcalc CLI
//!
//! Runs any calc_core calculator from JSON:
//!
//! ```text
//! quickcalc list --category finance
//! quickcalc describe loan
//! quickcalc run loan --input '{"price": 25000, "annual_rate_pct": 6.5, "term_months": 60}'
//! echo '{"bill": 84, "people": 3}' | quickcalc run tip --format pretty
//! quickcalc batch requests.json
//! ```

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use calc_cli::{app, config};

fn main() -> Result<ExitCode> {
    let config = config::AppConfig::parse();

    // RUST_LOG wins; otherwise warn, or debug with --verbose
    let filter = EnvFilter::builder()
        .with_default_directive(config.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    app::run(&config)
}
