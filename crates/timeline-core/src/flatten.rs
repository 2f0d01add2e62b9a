//! Event flattening.
//!
//! Expands each episode into one primary event (the episode itself) plus one
//! secondary event per nested timeline event. Every event takes its year
//! from its own date, so a nested event can land in a different year than
//! its episode.
//!
//! Records with a missing or unparseable date are left out and reported as
//! data-quality warnings; one bad record never empties the timeline.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::warn;

use timeline_types::Episode;

use crate::event_key::EventKey;

/// One point on the timeline, borrowed from its owning episode.
#[derive(Debug, Clone, Serialize)]
pub struct FlattenedEvent<'a> {
    /// Key unique across the flattened set
    pub key: EventKey,

    pub date: NaiveDate,

    /// Year of `date`
    pub year: i32,

    pub title: &'a str,

    pub description: Option<&'a str>,

    /// Event image, or the episode cover for primary events
    pub image_url: Option<&'a str>,

    /// True for the episode itself, false for a nested event
    pub is_primary: bool,

    /// Display-only marker; never affects ordering
    pub date_is_approximate: bool,

    /// The owning episode
    #[serde(skip)]
    pub episode: &'a Episode,
}

/// A record left out of the timeline because its date could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQualityWarning {
    pub episode_id: String,

    /// None when the episode's own date is bad
    pub event_id: Option<String>,

    pub raw_date: String,
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event_id {
            Some(event_id) => write!(
                f,
                "episode {} event {}: unreadable date {:?}",
                self.episode_id, event_id, self.raw_date
            ),
            None => write!(
                f,
                "episode {}: unreadable date {:?}",
                self.episode_id, self.raw_date
            ),
        }
    }
}

/// Output of [`flatten_episodes`].
#[derive(Debug, Clone, Default)]
pub struct Flattened<'a> {
    /// Events in no particular order; grouping sorts them
    pub events: Vec<FlattenedEvent<'a>>,

    pub warnings: Vec<DataQualityWarning>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Flatten episodes into timeline events.
///
/// Produces `episodes + nested events` entries minus the ones whose date is
/// unreadable. A bad episode date drops only the episode's own entry; its
/// valid nested events are still emitted.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use timeline_core::flatten_episodes;
/// use timeline_types::{Episode, TimelineEvent};
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let episodes = vec![Episode::new("b", "O Crash de 1983", d(1983, 12, 1))
///     .with_timeline_events(vec![TimelineEvent::new("1", d(1977, 6, 1), "Arcade Boom")])];
///
/// let flat = flatten_episodes(&episodes);
/// assert_eq!(flat.events.len(), 2);
/// assert!(flat.events.iter().any(|e| !e.is_primary && e.year == 1977));
/// ```
pub fn flatten_episodes<'a, I>(episodes: I) -> Flattened<'a>
where
    I: IntoIterator<Item = &'a Episode>,
{
    let mut out = Flattened::default();

    for episode in episodes {
        match episode.parsed_date() {
            Some(date) => {
                if date.year() != episode.year {
                    warn!(
                        episode_id = %episode.id,
                        stored_year = episode.year,
                        date_year = date.year(),
                        "Episode year disagrees with its historical date; using the date"
                    );
                }
                out.events.push(FlattenedEvent {
                    key: EventKey::episode(&episode.id),
                    date,
                    year: date.year(),
                    title: &episode.title,
                    description: non_blank(&episode.description),
                    image_url: non_blank(&episode.cover_image_url),
                    is_primary: true,
                    date_is_approximate: episode.date_is_approximate,
                    episode,
                });
            }
            None => {
                warn!(
                    episode_id = %episode.id,
                    raw_date = %episode.historical_date,
                    "Skipping episode with unreadable historical date"
                );
                out.warnings.push(DataQualityWarning {
                    episode_id: episode.id.clone(),
                    event_id: None,
                    raw_date: episode.historical_date.clone(),
                });
            }
        }

        for nested in &episode.timeline_events {
            let Some(date) = nested.parsed_date() else {
                warn!(
                    episode_id = %episode.id,
                    event_id = %nested.id,
                    raw_date = %nested.date,
                    "Skipping timeline event with unreadable date"
                );
                out.warnings.push(DataQualityWarning {
                    episode_id: episode.id.clone(),
                    event_id: Some(nested.id.clone()),
                    raw_date: nested.date.clone(),
                });
                continue;
            };

            out.events.push(FlattenedEvent {
                key: EventKey::nested(&episode.id, &nested.id),
                date,
                year: date.year(),
                title: &nested.title,
                description: non_blank(&nested.description),
                image_url: non_blank(&nested.image_url),
                is_primary: false,
                date_is_approximate: nested.date_is_approximate,
                episode,
            });
        }
    }

    out
}
