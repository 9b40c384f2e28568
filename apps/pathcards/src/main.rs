//! # pathcards - Mechanism Cards from Pathway Graphs
//!
//! The main binary for the pathcards extraction engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                apps/pathcards (THE BINARY)              │
//! │                                                         │
//! │   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐   │
//! │   │    CLI      │   │   Config    │   │   Logging   │   │
//! │   │   (clap)    │   │   (toml)    │   │  (tracing)  │   │
//! │   └──────┬──────┘   └──────┬──────┘   └─────────────┘   │
//! │          └────────┬────────┘                            │
//! │                   ▼                                     │
//! │          ┌─────────────────┐                            │
//! │          │ pathcards-core  │                            │
//! │          │  (THE LOGIC)    │                            │
//! │          └─────────────────┘                            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! pathcards status -m model.json
//! pathcards extract -m model.json -o cards.json --sif network.sif
//! pathcards extract -m model.json -o cards.json -a binding -a expression
//! pathcards patterns --json-mode
//! ```

use clap::Parser;
use pathcards::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // PATHCARDS_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PATHCARDS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pathcards=info".into());

    // Logs go to stderr so stdout stays clean for --json-mode.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!("pathcards v{}", env!("CARGO_PKG_VERSION"));
    println!("Deterministic • Grounded • Reproducible");
    println!();
}
