//! # Scriptorium - Static Corpus-Site Builder
//!
//! The main binary for the Scriptorium build pipeline.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                apps/scriptorium (THE BINARY)               │
//! │                                                            │
//! │  ┌──────────┐   ┌──────────┐   ┌────────────────────────┐  │
//! │  │   CLI    │   │  Loader  │   │  Renderer (pages, fs)  │  │
//! │  │  (clap)  │   │ (serde)  │   │                        │  │
//! │  └────┬─────┘   └────┬─────┘   └───────────┬────────────┘  │
//! │       │              │                     │               │
//! │       └──────────────┼─────────────────────┘               │
//! │                      ▼                                     │
//! │            ┌──────────────────┐                            │
//! │            │ scriptorium-core │                            │
//! │            │   (THE ENGINE)   │                            │
//! │            └──────────────────┘                            │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Build the site, cleaning stale pages first
//! scriptorium build --clean
//!
//! # Validate data only, failing on errors
//! scriptorium check --strict
//!
//! # Dataset overview
//! scriptorium stats
//! ```

use clap::Parser;
use scriptorium::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — SCRIPTORIUM_LOG_FORMAT=json enables
    // machine-parseable output.
    let log_format =
        std::env::var("SCRIPTORIUM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scriptorium=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments and execute
    let cli = cli::Cli::parse();
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
