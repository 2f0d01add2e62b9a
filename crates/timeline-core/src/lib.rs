//! Timeline aggregation library for the podcast timeline.
//!
//! Provides:
//! - Event flattening: episodes and their nested events as one sequence
//! - Year grouping: chronologically ordered year groups
//! - Search: free-text episode filter applied before flattening
//! - Interaction state: year activation, hover tooltips, image viewer
//! - Episode feed: fetch status, stale-response handling, notifications

pub mod config;
pub mod event_key;
pub mod feed;
pub mod flatten;
pub mod grouping;
pub mod hover;
pub mod notify;
pub mod search;
pub mod selection;
pub mod tooltip;
pub mod view;
pub mod viewer;

pub use config::TimelineConfig;
pub use event_key::EventKey;
pub use feed::{EpisodeFeed, FeedError, FetchStatus, FetchTicket};
pub use flatten::{flatten_episodes, DataQualityWarning, FlattenedEvent, Flattened};
pub use grouping::{group_by_year, timeline_groups, YearGroup};
pub use hover::{HoverController, HoverState, PointerPosition};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use search::{episode_matches, filter_episodes};
pub use selection::{activate, Activation, Selection, SelectionController, SelectionError, YearDetail};
pub use tooltip::{Tooltip, TooltipEntry};
pub use view::{build_view, resolve_image, TimelineStats, TimelineView};
pub use viewer::ImageViewer;
