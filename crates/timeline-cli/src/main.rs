//! Podcast timeline CLI
//!
//! # Usage
//!
//! ```bash
//! podcast-timeline timeline [--search TERM] [--json]
//! podcast-timeline year 1977
//! podcast-timeline stats
//! podcast-timeline admin add-episode --file draft.json
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/podcast-timeline/config.toml)
//! 3. Environment variables (TIMELINE_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use timeline_cli::{
    handle_admin, init_logging, load_settings, show_stats, show_timeline, show_year, Cli,
    Commands, TimelineApp,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(
        cli.config.as_deref(),
        cli.data.as_deref(),
        cli.log_level.as_deref(),
    )?;
    init_logging(&settings)?;

    let app = TimelineApp::open(&settings).await?;

    match cli.command {
        Commands::Timeline { search, json } => {
            show_timeline(&app, search.as_deref(), json).await?;
        }
        Commands::Year { year, search } => {
            show_year(&app, year, search.as_deref()).await?;
        }
        Commands::Stats => {
            show_stats(&app).await?;
        }
        Commands::Admin { command } => {
            handle_admin(&app, command).await?;
        }
    }

    Ok(())
}
