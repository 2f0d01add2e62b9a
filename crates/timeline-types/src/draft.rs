//! Admin form submissions.
//!
//! Drafts are what the admin area sends before anything touches the store.
//! Validation turns them into full records or rejects them with an
//! `InvalidInput` error naming the offending field.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::advertisement::Advertisement;
use crate::episode::{parse_date, Episode, TimelineEvent, MAX_EVENT_DESCRIPTION_CHARS};
use crate::error::TimelineError;

fn required(field: &str, value: &str) -> Result<(), TimelineError> {
    if value.trim().is_empty() {
        return Err(TimelineError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A nested event as submitted from the admin form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineEventDraft {
    /// Existing id when editing; assigned on save otherwise
    #[serde(default)]
    pub id: Option<String>,

    pub date: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub date_is_approximate: bool,
}

impl TimelineEventDraft {
    fn validate(&self, position: usize) -> Result<(), TimelineError> {
        let label = format!("timeline_events[{position}]");
        required(&format!("{label}.title"), &self.title)?;
        if parse_date(&self.date).is_none() {
            return Err(TimelineError::InvalidInput(format!(
                "{label}.date must be YYYY-MM-DD, got {:?}",
                self.date
            )));
        }
        if let Some(description) = &self.description {
            let len = description.chars().count();
            if len > MAX_EVENT_DESCRIPTION_CHARS {
                return Err(TimelineError::InvalidInput(format!(
                    "{label}.description must be at most {MAX_EVENT_DESCRIPTION_CHARS} characters, got {len}"
                )));
            }
        }
        Ok(())
    }

    fn into_event(self) -> TimelineEvent {
        let date = parse_date(&self.date)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or(self.date);

        TimelineEvent {
            id: non_blank(self.id).unwrap_or_else(|| ulid::Ulid::new().to_string()),
            date,
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            image_url: non_blank(self.image_url),
            date_is_approximate: self.date_is_approximate,
        }
    }
}

/// An episode as submitted from the admin form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeDraft {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub listen_url: Option<String>,

    /// New cover; when editing, None keeps the current one
    #[serde(default)]
    pub cover_image_url: Option<String>,

    pub historical_date: String,

    /// Optional explicit year; must agree with `historical_date`
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub timeline_events: Vec<TimelineEventDraft>,

    #[serde(default)]
    pub date_is_approximate: bool,
}

impl EpisodeDraft {
    /// Check every field and return the parsed historical date.
    pub fn validate(&self) -> Result<NaiveDate, TimelineError> {
        required("title", &self.title)?;

        let date = parse_date(&self.historical_date).ok_or_else(|| {
            TimelineError::InvalidInput(format!(
                "historical_date must be YYYY-MM-DD, got {:?}",
                self.historical_date
            ))
        })?;

        if let Some(year) = self.year {
            if year != date.year() {
                return Err(TimelineError::InvalidInput(format!(
                    "year {year} does not match historical_date {}",
                    self.historical_date
                )));
            }
        }

        let mut seen = HashSet::new();
        for (position, event) in self.timeline_events.iter().enumerate() {
            event.validate(position)?;
            if let Some(id) = event.id.as_deref().filter(|id| !id.trim().is_empty()) {
                if !seen.insert(id) {
                    return Err(TimelineError::InvalidInput(format!(
                        "duplicate timeline event id {id:?}"
                    )));
                }
            }
        }

        Ok(date)
    }

    /// Validate and build a new episode with the given id.
    pub fn into_episode(self, id: impl Into<String>) -> Result<Episode, TimelineError> {
        let date = self.validate()?;

        let mut episode = Episode::new(id, self.title.trim(), date);
        episode.description = non_blank(self.description);
        episode.listen_url = non_blank(self.listen_url);
        episode.cover_image_url = non_blank(self.cover_image_url);
        episode.date_is_approximate = self.date_is_approximate;
        episode.timeline_events = self
            .timeline_events
            .into_iter()
            .map(TimelineEventDraft::into_event)
            .collect();

        Ok(episode)
    }

    /// Validate and apply this draft over an existing episode.
    ///
    /// Keeps the id, creation time and (when no new cover is given) the
    /// current cover image.
    pub fn apply_to(self, existing: &Episode) -> Result<Episode, TimelineError> {
        let keep_cover = existing.cover_image_url.clone();
        let mut updated = self.into_episode(existing.id.clone())?;

        if updated.cover_image_url.is_none() {
            updated.cover_image_url = keep_cover;
        }
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();

        Ok(updated)
    }
}

/// An advertisement as submitted from the gallery admin form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvertisementDraft {
    pub description: String,

    pub system: String,

    pub submitted_by: String,

    /// Required on create; when editing, None keeps the current image
    #[serde(default)]
    pub image_url: Option<String>,
}

impl AdvertisementDraft {
    fn validate_fields(&self) -> Result<(), TimelineError> {
        required("submitted_by", &self.submitted_by)?;
        required("description", &self.description)?;
        required("system", &self.system)
    }

    /// Validate and build a new advertisement with the given id.
    pub fn into_advertisement(self, id: impl Into<String>) -> Result<Advertisement, TimelineError> {
        self.validate_fields()?;
        let image_url = non_blank(self.image_url)
            .ok_or_else(|| TimelineError::InvalidInput("image_url is required".to_string()))?;

        Ok(Advertisement::new(
            id,
            self.description.trim(),
            self.system.trim(),
            self.submitted_by.trim(),
            image_url,
        ))
    }

    /// Validate and apply this draft over an existing advertisement.
    pub fn apply_to(self, existing: &Advertisement) -> Result<Advertisement, TimelineError> {
        self.validate_fields()?;

        Ok(Advertisement {
            id: existing.id.clone(),
            description: self.description.trim().to_string(),
            system: self.system.trim().to_string(),
            submitted_by: self.submitted_by.trim().to_string(),
            image_url: non_blank(self.image_url).unwrap_or_else(|| existing.image_url.clone()),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EpisodeDraft {
        EpisodeDraft {
            title: "A Revolucao do Atari 2600".to_string(),
            historical_date: "1977-09-11".to_string(),
            ..Default::default()
        }
    }

    fn event_draft(date: &str, title: &str) -> TimelineEventDraft {
        TimelineEventDraft {
            date: date.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft_derives_year() {
        let episode = draft().into_episode("ep-1").unwrap();
        assert_eq!(episode.year, 1977);
        assert_eq!(episode.id, "ep-1");
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut d = draft();
        d.title = "   ".to_string();
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut d = draft();
        d.historical_date = "11/09/1977".to_string();
        assert!(matches!(d.validate(), Err(TimelineError::InvalidInput(_))));
    }

    #[test]
    fn test_mismatched_year_rejected() {
        let mut d = draft();
        d.year = Some(1978);
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_nested_description_limit() {
        let mut d = draft();
        let mut ev = event_draft("1977-01-01", "Arcade Boom");
        ev.description = Some("x".repeat(MAX_EVENT_DESCRIPTION_CHARS));
        d.timeline_events = vec![ev.clone()];
        assert!(d.validate().is_ok());

        ev.description = Some("x".repeat(MAX_EVENT_DESCRIPTION_CHARS + 1));
        d.timeline_events = vec![ev];
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("timeline_events[0].description"));
    }

    #[test]
    fn test_nested_event_missing_date_rejected() {
        let mut d = draft();
        d.timeline_events = vec![event_draft("", "Nimatron")];
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("timeline_events[0].date"));
    }

    #[test]
    fn test_duplicate_nested_ids_rejected() {
        let mut d = draft();
        let mut a = event_draft("1977-01-01", "A");
        a.id = Some("same".to_string());
        let mut b = event_draft("1978-01-01", "B");
        b.id = Some("same".to_string());
        d.timeline_events = vec![a, b];
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_nested_ids_assigned_when_missing() {
        let mut d = draft();
        d.timeline_events = vec![
            event_draft("1977-01-01", "A"),
            event_draft("1978-01-01", "B"),
        ];
        let episode = d.into_episode("ep-1").unwrap();
        assert_eq!(episode.timeline_events.len(), 2);
        assert!(!episode.timeline_events[0].id.is_empty());
        assert_ne!(episode.timeline_events[0].id, episode.timeline_events[1].id);
    }

    #[test]
    fn test_apply_keeps_cover_and_created_at() {
        let existing = draft()
            .into_episode("ep-1")
            .unwrap()
            .with_cover_image("https://cdn.example.com/atari.jpg");

        let mut edit = draft();
        edit.title = "Atari 2600".to_string();
        let updated = edit.apply_to(&existing).unwrap();

        assert_eq!(updated.id, "ep-1");
        assert_eq!(updated.title, "Atari 2600");
        assert_eq!(
            updated.cover_image_url.as_deref(),
            Some("https://cdn.example.com/atari.jpg")
        );
        assert_eq!(updated.created_at, existing.created_at);
    }

    #[test]
    fn test_advertisement_requires_image_on_create() {
        let d = AdvertisementDraft {
            description: "Sapo Xule".to_string(),
            system: "Master System".to_string(),
            submitted_by: "Pablo".to_string(),
            image_url: None,
        };
        let err = d.into_advertisement("ad-1").unwrap_err();
        assert!(err.to_string().contains("image_url"));
    }

    #[test]
    fn test_advertisement_update_keeps_image() {
        let existing = Advertisement::new("ad-1", "Old", "NES", "Ana", "https://img/old.jpg");
        let d = AdvertisementDraft {
            description: "New".to_string(),
            system: "NES".to_string(),
            submitted_by: "Ana".to_string(),
            image_url: None,
        };
        let updated = d.apply_to(&existing).unwrap();
        assert_eq!(updated.image_url, "https://img/old.jpg");
        assert_eq!(updated.description, "New");
    }

    #[test]
    fn test_advertisement_missing_system_rejected() {
        let d = AdvertisementDraft {
            description: "Sapo Xule".to_string(),
            system: String::new(),
            submitted_by: "Pablo".to_string(),
            image_url: Some("https://img/a.jpg".to_string()),
        };
        let err = d.into_advertisement("ad-1").unwrap_err();
        assert!(err.to_string().contains("system"));
    }
}
