//! Podcast timeline CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (timeline, year, stats, admin)

pub mod cli;
pub mod commands;

pub use cli::{AdminCommands, Cli, Commands};
pub use commands::{
    handle_admin, init_logging, load_settings, render_activation, render_stats, render_view,
    show_stats, show_timeline, show_year, TimelineApp,
};
