//! CLI argument parsing for the podcast timeline.
//!
//! CLI flags override every other config source.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Podcast timeline
///
/// Browse podcast episodes on a chronological timeline and manage the
/// episode and advertisement collections.
#[derive(Parser, Debug)]
#[command(name = "podcast-timeline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/podcast-timeline/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override the JSON data file
    #[arg(long, global = true)]
    pub data: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the timeline grouped by year
    Timeline {
        /// Only episodes matching this term
        #[arg(short, long)]
        search: Option<String>,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open a year point: the episode itself, or the year detail chooser
    Year {
        year: i32,

        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show episode count and years of history
    Stats,

    /// Manage episodes and advertisements
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

/// Admin subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommands {
    /// Create an episode from a JSON draft
    AddEpisode {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace an episode with a JSON draft
    UpdateEpisode {
        id: String,

        #[arg(short, long)]
        file: PathBuf,
    },

    DeleteEpisode {
        id: String,
    },

    ListEpisodes,

    /// Create an advertisement from a JSON draft
    AddAd {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace an advertisement with a JSON draft
    UpdateAd {
        id: String,

        #[arg(short, long)]
        file: PathBuf,
    },

    DeleteAd {
        id: String,
    },

    /// List advertisements, newest first
    ListAds,
}
