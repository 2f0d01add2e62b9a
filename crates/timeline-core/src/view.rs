//! Timeline view state and stats.

use chrono::Datelike;
use serde::Serialize;

use timeline_types::Episode;

use crate::feed::FetchStatus;
use crate::flatten::FlattenedEvent;
use crate::grouping::{timeline_groups, YearGroup};
use crate::search::filter_episodes;

/// Pick the image for an event: its own, then the owning episode's cover,
/// then the placeholder.
pub fn resolve_image<'a>(event: &FlattenedEvent<'a>, placeholder: &'a str) -> &'a str {
    event
        .image_url
        .or_else(|| {
            event
                .episode
                .cover_image_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
        })
        .unwrap_or(placeholder)
}

/// What the timeline page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimelineView<'a> {
    /// First fetch still in flight
    Loading,
    /// The first fetch failed; nothing to show
    Unavailable { message: String },
    /// The collection is empty
    Empty,
    /// The search term matched nothing
    NoResults { term: String },
    /// Groups to render; `stale` when a later refresh failed
    Ready {
        groups: Vec<YearGroup<'a>>,
        stale: bool,
    },
}

/// Derive the view from fetch state, the cached episodes and a search term.
///
/// `has_loaded` is whether any fetch has ever succeeded. Once it has, the
/// cached episodes are shown even while a refresh is loading or after it
/// failed.
pub fn build_view<'a>(
    status: &FetchStatus,
    has_loaded: bool,
    episodes: &'a [Episode],
    term: &str,
) -> TimelineView<'a> {
    if !has_loaded {
        return match status {
            FetchStatus::Failed(message) => TimelineView::Unavailable {
                message: message.clone(),
            },
            _ => TimelineView::Loading,
        };
    }

    // Groups can be empty even for a non-empty collection when every date
    // is unreadable.
    let groups = timeline_groups(filter_episodes(episodes, term));
    if groups.is_empty() {
        let term = term.trim();
        return if term.is_empty() {
            TimelineView::Empty
        } else {
            TimelineView::NoResults {
                term: term.to_string(),
            }
        };
    }

    TimelineView::Ready {
        groups,
        stale: matches!(status, FetchStatus::Failed(_)),
    }
}

/// Header numbers for the timeline page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimelineStats {
    pub episode_count: usize,

    /// Last year minus first year over the episode collection
    pub years_of_history: i32,
}

impl TimelineStats {
    /// Years come from each episode's parsed date; undated episodes are
    /// counted but do not widen the span.
    pub fn from_episodes(episodes: &[Episode]) -> Self {
        let years = episodes
            .iter()
            .filter_map(|e| e.parsed_date().map(|d| d.year()));
        let span = match (years.clone().min(), years.max()) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        };

        Self {
            episode_count: episodes.len(),
            years_of_history: span,
        }
    }
}
