//! # timeline-types
//!
//! Shared domain types for the podcast timeline.
//!
//! This crate defines the records exchanged with the data service:
//! - Episodes: podcast episodes anchored to a historical date
//! - Timeline events: sub-events nested inside an episode
//! - Advertisements: user-submitted ad images for the gallery
//! - Drafts: admin form submissions, validated before they reach the store
//! - Settings: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timeline_types::Episode;
//!
//! let date = NaiveDate::from_ymd_opt(1977, 9, 11).unwrap();
//! let episode = Episode::new("ep-1", "Atari 2600", date);
//! assert_eq!(episode.year, 1977);
//! ```

pub mod advertisement;
pub mod config;
pub mod draft;
pub mod episode;
pub mod error;

pub use advertisement::Advertisement;
pub use config::Settings;
pub use draft::{AdvertisementDraft, EpisodeDraft, TimelineEventDraft};
pub use episode::{parse_date, Episode, TimelineEvent, MAX_EVENT_DESCRIPTION_CHARS};
pub use error::TimelineError;
