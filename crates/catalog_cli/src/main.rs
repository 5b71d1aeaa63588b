//! Catalog CLI
//!
//! Runs the catalog HTTP server and offers read-only maintenance tools.
//!
//! # Commands
//!
//! - `serve` - Serve the catalog over HTTP until Ctrl-C
//! - `inspect` - Display collection counts and id state
//! - `verify` - Check category invariants
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog server and tools.
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(global = true, short, long, default_value = "db.json")]
    db: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the catalog over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,

        /// Static token protected routes require
        #[arg(long, env = "CATALOG_TOKEN")]
        token: Option<String>,

        /// Username accepted by POST /auth
        #[arg(long, env = "CATALOG_USERNAME")]
        username: Option<String>,

        /// Password accepted by POST /auth
        #[arg(long, env = "CATALOG_PASSWORD")]
        password: Option<String>,

        /// Assign category ids as count + 1
        #[arg(long)]
        legacy_ids: bool,

        /// Skip fsync after each write
        #[arg(long)]
        no_sync: bool,
    },

    /// Display collection counts and id state
    Inspect {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Report the next id under count + 1 assignment
        #[arg(long)]
        legacy_ids: bool,
    },

    /// Check category invariants
    Verify,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve {
            bind,
            token,
            username,
            password,
            legacy_ids,
            no_sync,
        } => {
            // Older deployments set VALID_TOKEN.
            let token = token.or_else(|| std::env::var("VALID_TOKEN").ok());
            let options = commands::serve::ServeOptions {
                bind,
                token,
                credentials: username.zip(password),
                legacy_ids,
                sync_on_write: !no_sync,
            };
            commands::serve::run(&cli.db, options)?;
        }
        Commands::Inspect { format, legacy_ids } => {
            commands::inspect::run(&cli.db, format, legacy_ids)?;
        }
        Commands::Verify => {
            if !commands::verify::run(&cli.db)? {
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("Catalog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Catalog Core v{}", catalog_core::VERSION);
        }
    }

    Ok(())
}
