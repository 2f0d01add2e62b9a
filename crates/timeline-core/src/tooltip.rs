//! Hover tooltip content.
//!
//! Mirrors the year detail split (episodes, then historical events) with
//! shortened descriptions.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::TimelineConfig;
use crate::flatten::FlattenedEvent;
use crate::grouping::YearGroup;
use crate::view::resolve_image;

/// Cut `text` to at most `max_chars` characters, ending with an ellipsis
/// when something was removed.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// One line of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipEntry {
    pub key: String,
    pub title: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub image_url: String,
    /// Title of the owning episode ("De: ...")
    pub episode_title: String,
    pub date_is_approximate: bool,
}

impl TooltipEntry {
    fn from_event(event: &FlattenedEvent<'_>, config: &TimelineConfig) -> Self {
        Self {
            key: event.key.to_string(),
            title: event.title.to_string(),
            date: event.date,
            description: event
                .description
                .map(|d| truncate(d, config.tooltip_description_chars)),
            image_url: resolve_image(event, &config.placeholder_image_url).to_string(),
            episode_title: event.episode.title.clone(),
            date_is_approximate: event.date_is_approximate,
        }
    }
}

/// Tooltip shown while a year point is hovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub year: i32,
    pub episodes: Vec<TooltipEntry>,
    pub historical_events: Vec<TooltipEntry>,
    pub has_approximate_date: bool,
}

impl Tooltip {
    pub fn for_group(group: &YearGroup<'_>, config: &TimelineConfig) -> Self {
        Self {
            year: group.year,
            episodes: group
                .episodes()
                .map(|e| TooltipEntry::from_event(e, config))
                .collect(),
            historical_events: group
                .historical_events()
                .map(|e| TooltipEntry::from_event(e, config))
                .collect(),
            has_approximate_date: group.has_approximate_date(),
        }
    }

    pub fn len(&self) -> usize {
        self.episodes.len() + self.historical_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
