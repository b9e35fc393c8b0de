//! # Recograph
//!
//! The main binary for the category/product recommendation graph.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive session
//! recograph
//!
//! # Preload a database, then go interactive
//! recograph --database products.txt
//!
//! # Machine-readable listings
//! recograph --database products.txt --json
//! ```
//!
//! The session speaks a line protocol on stdin/stdout (`load database`,
//! `add`, `remove`, `nodes`, `edges`, `recommend`, `export`, `quit`);
//! user-facing errors and operational logging go to stderr.

use clap::Parser;
use recograph::repl::Repl;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Recograph - interactive recommendation graph.
///
/// Maintains a typed graph of categories and products with automatically
/// derived inverse relationships, and answers bracketed set-algebra
/// recommendation queries over it.
#[derive(Parser, Debug)]
#[command(name = "recograph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Load a database file before entering the interactive loop
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Emit nodes/edges/recommend listings as JSON arrays
    #[arg(long)]
    json: bool,
}

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — RECOGRAPH_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("RECOGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "recograph=info".into());

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

    let cli = Cli::parse();

    let mut repl = Repl::new(cli.json);
    if let Some(path) = cli.database.as_deref() {
        repl.load_database(path);
    }

    if let Err(e) = repl.run() {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
