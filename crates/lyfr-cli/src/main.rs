//! Lyfr CLI
//!
//! Command-line reader and administration tool for Lyfr books.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Lyfr — markdown book reader
#[derive(Parser, Debug)]
#[command(name = "lyfr")]
#[command(about = "Serve, read, and track progress through a markdown book", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "LYFR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the book over HTTP
    Serve {
        /// Listen address, e.g. 127.0.0.1:4040
        #[arg(long)]
        listen: Option<String>,
    },
    /// Print a chapter to stdout
    Read {
        /// Chapter slug
        slug: String,
    },
    /// Print the navigation tree with completion marks
    Toc,
    /// Show or change completion state
    Progress {
        #[command(subcommand)]
        action: Option<ProgressAction>,
    },
    /// Mirror a running Lyfr server into the offline shell cache
    Sync {
        /// Server origin, e.g. http://127.0.0.1:4040 (defaults to the
        /// configured listen address)
        #[arg(long)]
        origin: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ProgressAction {
    /// Summarize completion (the default)
    Show,
    /// Flip completion for one chapter
    Toggle {
        /// Chapter slug
        slug: String,
    },
    /// Clear all completion state
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Serve { listen } => commands::serve::run(&config, listen).await,
        Command::Read { slug } => commands::read::run(&config, &slug).await,
        Command::Toc => commands::toc::run(&config),
        Command::Progress { action } => commands::progress::run(&config, action),
        Command::Sync { origin } => commands::sync::run(&config, origin).await,
    }
}
