//! Episode and nested timeline event records.
//!
//! Episodes are anchored to a historical date and may carry an ordered list
//! of nested timeline events, each with its own date. Dates travel as ISO
//! `YYYY-MM-DD` text exactly as the data service delivers them, so a
//! malformed record can still be loaded and reported instead of failing the
//! whole collection.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Longest description accepted on a nested timeline event.
pub const MAX_EVENT_DESCRIPTION_CHARS: usize = 120;

/// Parse a calendar date as delivered by the data service.
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps (the date part is
/// kept). Returns None for blank or malformed input.
///
/// # Example
/// ```
/// use timeline_types::parse_date;
///
/// assert!(parse_date("1983-12-01").is_some());
/// assert!(parse_date("1983-12-01T10:00:00Z").is_some());
/// assert!(parse_date("sometime in 1983").is_none());
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

/// Read a missing or null date as blank text so the record still loads.
fn blank_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A sub-event nested inside an episode.
///
/// The id is only unique within the owning episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Identifier, unique within the parent episode
    pub id: String,

    /// Calendar date of the event (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "blank_if_null")]
    pub date: String,

    /// Event title
    pub title: String,

    /// Short description (at most 120 characters)
    #[serde(default)]
    pub description: Option<String>,

    /// Opaque image URL
    #[serde(default)]
    pub image_url: Option<String>,

    /// Marks the date as approximate (display only)
    #[serde(default)]
    pub date_is_approximate: bool,
}

impl TimelineEvent {
    /// Create a nested event for the given date.
    pub fn new(id: impl Into<String>, date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.format("%Y-%m-%d").to_string(),
            title: title.into(),
            description: None,
            image_url: None,
            date_is_approximate: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_approximate_date(mut self, approximate: bool) -> Self {
        self.date_is_approximate = approximate;
        self
    }

    /// Parsed date, or None when the stored text is malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// A podcast episode.
///
/// `year` is derived from `historical_date` when the episode is created
/// through [`Episode::new`] or a validated draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique identifier
    pub id: String,

    /// Episode title
    pub title: String,

    /// Optional long description
    #[serde(default)]
    pub description: Option<String>,

    /// Canonical historical date (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "blank_if_null")]
    pub historical_date: String,

    /// Year component of the historical date; timeline placement always
    /// uses the parsed date
    #[serde(default)]
    pub year: i32,

    /// Opaque cover image URL
    #[serde(default)]
    pub cover_image_url: Option<String>,

    /// External listen link
    #[serde(default)]
    pub listen_url: Option<String>,

    /// Nested timeline events, in author order
    #[serde(default)]
    pub timeline_events: Vec<TimelineEvent>,

    /// Marks the historical date as approximate (display only)
    #[serde(default)]
    pub date_is_approximate: bool,

    /// When the record was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Episode {
    /// Create an episode anchored to the given historical date.
    pub fn new(id: impl Into<String>, title: impl Into<String>, historical_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            historical_date: historical_date.format("%Y-%m-%d").to_string(),
            year: historical_date.year(),
            cover_image_url: None,
            listen_url: None,
            timeline_events: Vec::new(),
            date_is_approximate: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }

    pub fn with_listen_url(mut self, url: impl Into<String>) -> Self {
        self.listen_url = Some(url.into());
        self
    }

    pub fn with_timeline_events(mut self, events: Vec<TimelineEvent>) -> Self {
        self.timeline_events = events;
        self
    }

    pub fn with_approximate_date(mut self, approximate: bool) -> Self {
        self.date_is_approximate = approximate;
        self
    }

    /// Parsed historical date, or None when the stored text is malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.historical_date)
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_episode_year_derived_from_date() {
        let episode = Episode::new("ep-1", "O Crash de 1983", date(1983, 12, 1));
        assert_eq!(episode.year, 1983);
        assert_eq!(episode.historical_date, "1983-12-01");
        assert_eq!(episode.parsed_date(), Some(date(1983, 12, 1)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("1983-13-01"), None);
        assert_eq!(parse_date(" 1983-02-03 "), Some(date(1983, 2, 3)));
    }

    #[test]
    fn test_episode_minimal_json_uses_defaults() {
        // Shape returned by the data service before nested events existed
        let json = r#"{
            "id": "1",
            "title": "O Nascimento dos Arcades",
            "historical_date": "1972-11-29",
            "year": 1972
        }"#;

        let episode: Episode = serde_json::from_str(json).unwrap();

        assert!(episode.timeline_events.is_empty());
        assert!(episode.description.is_none());
        assert!(!episode.date_is_approximate);
    }

    #[test]
    fn test_missing_or_null_dates_load_as_blank() {
        let json = r#"{
            "id": "b",
            "title": "Sem data",
            "timeline_events": [
                { "id": "1", "date": null, "title": "Arcade Boom" }
            ]
        }"#;

        let episode: Episode = serde_json::from_str(json).unwrap();

        assert_eq!(episode.historical_date, "");
        assert_eq!(episode.year, 0);
        assert!(episode.parsed_date().is_none());
        assert_eq!(episode.timeline_events[0].date, "");
        assert!(episode.timeline_events[0].parsed_date().is_none());
    }

    #[test]
    fn test_episode_with_nested_events() {
        let episode = Episode::new("ep-2", "O Crash de 1983", date(1983, 12, 1))
            .with_description("A grande crise da industria")
            .with_timeline_events(vec![TimelineEvent::new(
                "ev-1",
                date(1977, 6, 1),
                "Arcade Boom",
            )
            .with_approximate_date(true)]);

        let bytes = episode.to_bytes().unwrap();
        let decoded = Episode::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.timeline_events.len(), 1);
        assert!(decoded.timeline_events[0].date_is_approximate);
        assert_eq!(decoded.timeline_events[0].parsed_date(), Some(date(1977, 6, 1)));
    }
}
