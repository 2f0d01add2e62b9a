//! End-to-end test infrastructure for the podcast timeline.
//!
//! Provides a shared TestHarness and fixtures for E2E tests covering the
//! store -> feed -> grouping -> interaction pipeline.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use timeline_core::{EpisodeFeed, RecordingNotifier};
use timeline_store::{EpisodeStore, JsonFileStore, StoreError};
use timeline_types::{Episode, EpisodeDraft, TimelineEventDraft};

/// Shared test harness for E2E tests.
///
/// Owns a temp dir holding the JSON data file, the opened store and a
/// recording notifier.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    pub data_path: PathBuf,
    pub store: Arc<JsonFileStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    pub async fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().join("timeline.json");
        let store = Arc::new(
            JsonFileStore::open(&data_path)
                .await
                .expect("Failed to open test store"),
        );

        Self {
            _temp_dir: temp_dir,
            data_path,
            store,
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    /// A feed over the harness store, not yet loaded.
    pub fn feed(&self) -> EpisodeFeed {
        EpisodeFeed::new(self.store.clone(), self.notifier.clone())
    }

    /// Store each draft, returning the created episodes.
    pub async fn seed(&self, drafts: Vec<EpisodeDraft>) -> Vec<Episode> {
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(
                self.store
                    .create_episode(draft)
                    .await
                    .expect("Failed to seed episode"),
            );
        }
        created
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// Draft for an episode with no nested events.
pub fn episode_draft(title: &str, historical_date: &str) -> EpisodeDraft {
    EpisodeDraft {
        title: title.to_string(),
        historical_date: historical_date.to_string(),
        ..Default::default()
    }
}

pub fn event_draft(title: &str, date: &str) -> TimelineEventDraft {
    TimelineEventDraft {
        title: title.to_string(),
        date: date.to_string(),
        ..Default::default()
    }
}

/// Episodes A (1977, "Atari 2600") and B (1983, with a nested 1977
/// "Arcade Boom" event).
pub fn atari_and_crash() -> Vec<EpisodeDraft> {
    vec![
        EpisodeDraft {
            description: Some("Como o Atari 2600 levou os videogames para a sala".to_string()),
            ..episode_draft("Atari 2600", "1977-09-11")
        },
        EpisodeDraft {
            description: Some("A quebra da indústria de videogames".to_string()),
            cover_image_url: Some("https://img/crash.jpg".to_string()),
            timeline_events: vec![event_draft("Arcade Boom", "1977-06-01")],
            ..episode_draft("O Crash de 1983", "1983-12-01")
        },
    ]
}

/// Episode store wrapper that can be switched into failing reads.
pub struct FlakyStore<S> {
    inner: S,
    failing: AtomicBool,
}

impl<S> FlakyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("service offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: EpisodeStore> EpisodeStore for FlakyStore<S> {
    async fn list_episodes(&self) -> Result<Vec<Episode>, StoreError> {
        self.check()?;
        self.inner.list_episodes().await
    }

    async fn create_episode(&self, draft: EpisodeDraft) -> Result<Episode, StoreError> {
        self.check()?;
        self.inner.create_episode(draft).await
    }

    async fn update_episode(&self, id: &str, draft: EpisodeDraft) -> Result<Episode, StoreError> {
        self.check()?;
        self.inner.update_episode(id, draft).await
    }

    async fn delete_episode(&self, id: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete_episode(id).await
    }
}
