//! Episode feed.
//!
//! Caches the episode collection fetched from the store and tracks the fetch
//! status. Each fetch gets a ticket; a response is applied only when its
//! ticket is newer than the last applied one, so a slow early fetch can never
//! overwrite a later result. A failed fetch keeps the last good collection.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use timeline_store::{EpisodeStore, StoreError};
use timeline_types::{Episode, EpisodeDraft};

use crate::notify::{Notification, Notifier};
use crate::view::{build_view, TimelineStats, TimelineView};

/// Errors surfaced by feed operations
#[derive(Error, Debug)]
pub enum FeedError {
    /// A store write failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The collection could not be fetched
    #[error("Episodes unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum FetchStatus {
    Loading,
    Failed(String),
    Succeeded,
}

/// Identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// Chronological by parsed date (undated first), then id.
fn compare_episodes(a: &Episode, b: &Episode) -> Ordering {
    a.parsed_date()
        .cmp(&b.parsed_date())
        .then_with(|| a.id.cmp(&b.id))
}

/// Cached, status-tracking view of the episode store.
pub struct EpisodeFeed {
    store: Arc<dyn EpisodeStore>,
    notifier: Arc<dyn Notifier>,

    /// Sorted by parsed date, then id
    episodes: Vec<Episode>,

    status: FetchStatus,
    has_loaded: bool,
    next_ticket: u64,
    applied_ticket: Option<FetchTicket>,
}

impl EpisodeFeed {
    pub fn new(store: Arc<dyn EpisodeStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            episodes: Vec::new(),
            status: FetchStatus::Loading,
            has_loaded: false,
            next_ticket: 0,
            applied_ticket: None,
        }
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Whether any fetch has succeeded.
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    /// Mark a fetch as started and return its ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_ticket += 1;
        self.status = FetchStatus::Loading;
        FetchTicket(self.next_ticket)
    }

    /// Apply a fetch response. Returns false when the response is stale.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Episode>, StoreError>,
    ) -> bool {
        if self.applied_ticket.is_some_and(|applied| ticket <= applied) {
            debug!(ticket = ticket.0, "Discarding stale fetch response");
            return false;
        }
        self.applied_ticket = Some(ticket);

        match result {
            Ok(mut episodes) => {
                episodes.sort_by(compare_episodes);
                debug!(ticket = ticket.0, episodes = episodes.len(), "Fetch applied");
                self.episodes = episodes;
                self.status = FetchStatus::Succeeded;
                self.has_loaded = true;
            }
            Err(e) => {
                warn!(
                    ticket = ticket.0,
                    retained = self.episodes.len(),
                    error = %e,
                    "Fetch failed, keeping last known episodes"
                );
                self.status = FetchStatus::Failed(e.to_string());
                self.notifier.notify(Notification::error(
                    "Failed to load episodes",
                    e.to_string(),
                ));
            }
        }
        true
    }

    /// Fetch the collection from the store.
    pub async fn refresh(&mut self) -> Result<(), FeedError> {
        let ticket = self.begin_fetch();
        let result = self.store.list_episodes().await;
        self.complete(ticket, result);

        match &self.status {
            FetchStatus::Failed(message) => Err(FeedError::Unavailable(message.clone())),
            _ => Ok(()),
        }
    }

    pub async fn add(&mut self, draft: EpisodeDraft) -> Result<Episode, FeedError> {
        match self.store.create_episode(draft).await {
            Ok(episode) => {
                info!(episode_id = %episode.id, "Episode created");
                self.upsert(episode.clone());
                self.notifier.notify(Notification::success(
                    "Episode created",
                    format!("\"{}\" was added to the timeline", episode.title),
                ));
                Ok(episode)
            }
            Err(e) => Err(self.write_failed("Failed to create episode", e)),
        }
    }

    pub async fn update(&mut self, id: &str, draft: EpisodeDraft) -> Result<Episode, FeedError> {
        match self.store.update_episode(id, draft).await {
            Ok(episode) => {
                info!(episode_id = %episode.id, "Episode updated");
                self.upsert(episode.clone());
                self.notifier.notify(Notification::success(
                    "Episode updated",
                    format!("\"{}\" was saved", episode.title),
                ));
                Ok(episode)
            }
            Err(e) => Err(self.write_failed("Failed to update episode", e)),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), FeedError> {
        match self.store.delete_episode(id).await {
            Ok(()) => {
                info!(episode_id = %id, "Episode deleted");
                self.episodes.retain(|e| e.id != id);
                self.notifier
                    .notify(Notification::success("Episode deleted", format!("{id} was removed")));
                Ok(())
            }
            Err(e) => Err(self.write_failed("Failed to delete episode", e)),
        }
    }

    fn upsert(&mut self, episode: Episode) {
        match self.episodes.iter_mut().find(|e| e.id == episode.id) {
            Some(existing) => *existing = episode,
            None => self.episodes.push(episode),
        }
        self.episodes.sort_by(compare_episodes);
    }

    fn write_failed(&self, title: &str, err: StoreError) -> FeedError {
        warn!(error = %err, "{title}");
        self.notifier.notify(Notification::error(title, err.to_string()));
        FeedError::Store(err)
    }

    /// Timeline view of the cached collection for a search term.
    pub fn view(&self, term: &str) -> TimelineView<'_> {
        build_view(&self.status, self.has_loaded, &self.episodes, term)
    }

    pub fn stats(&self) -> TimelineStats {
        TimelineStats::from_episodes(&self.episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use timeline_store::InMemoryStore;

    use crate::notify::{NotificationLevel, RecordingNotifier};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Store that can be switched into failing every call.
    struct FlakyStore {
        inner: InMemoryStore,
        failing: AtomicBool,
    }

    impl FlakyStore {
        fn new(episodes: Vec<Episode>) -> Self {
            Self {
                inner: InMemoryStore::with_episodes(episodes),
                failing: AtomicBool::new(false),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, AtomicOrdering::SeqCst);
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.failing.load(AtomicOrdering::SeqCst) {
                return Err(StoreError::Unavailable("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl EpisodeStore for FlakyStore {
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

    fn sample() -> Vec<Episode> {
        vec![
            Episode::new("b", "O Crash de 1983", d(1983, 12, 1)),
            Episode::new("a", "Atari 2600", d(1977, 9, 11)),
        ]
    }

    fn feed_with(store: Arc<FlakyStore>) -> (EpisodeFeed, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (EpisodeFeed::new(store, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_refresh_sorts_by_year() {
        let store = Arc::new(FlakyStore::new(sample()));
        let (mut feed, _) = feed_with(store);

        assert!(matches!(feed.view(""), TimelineView::Loading));
        feed.refresh().await.unwrap();

        assert_eq!(feed.status(), &FetchStatus::Succeeded);
        let ids: Vec<&str> = feed.episodes().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(feed.stats().years_of_history, 6);
    }

    #[tokio::test]
    async fn test_failure_retains_last_known_good() {
        let store = Arc::new(FlakyStore::new(sample()));
        let (mut feed, notifier) = feed_with(store.clone());
        feed.refresh().await.unwrap();

        store.set_failing(true);
        let err = feed.refresh().await.unwrap_err();
        assert!(matches!(err, FeedError::Unavailable(_)));

        assert_eq!(feed.episodes().len(), 2);
        assert!(matches!(feed.status(), FetchStatus::Failed(_)));
        match feed.view("") {
            TimelineView::Ready { groups, stale } => {
                assert!(stale);
                assert_eq!(groups.len(), 2);
            }
            other => panic!("expected stale Ready, got {other:?}"),
        }

        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_first_fetch_failure_is_unavailable() {
        let store = Arc::new(FlakyStore::new(sample()));
        store.set_failing(true);
        let (mut feed, _) = feed_with(store);

        assert!(feed.refresh().await.is_err());
        assert!(matches!(feed.view(""), TimelineView::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_order_follows_date_not_stored_year() {
        let mut drifted = Episode::new("a", "Atari 2600", d(1977, 9, 11));
        drifted.year = 2020;
        let store = Arc::new(FlakyStore::new(vec![
            drifted,
            Episode::new("b", "O Crash de 1983", d(1983, 12, 1)),
        ]));
        let (mut feed, _) = feed_with(store);
        feed.refresh().await.unwrap();

        let ids: Vec<&str> = feed.episodes().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let store = Arc::new(FlakyStore::new(Vec::new()));
        let (mut feed, _) = feed_with(store);

        let older = feed.begin_fetch();
        let newer = feed.begin_fetch();

        assert!(feed.complete(newer, Ok(sample())));
        assert!(!feed.complete(older, Ok(Vec::new())));
        assert_eq!(feed.episodes().len(), 2);

        // A stale failure is dropped too
        assert!(!feed.complete(older, Err(StoreError::Unavailable("late".into()))));
        assert_eq!(feed.status(), &FetchStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_writes_update_cache_and_notify() {
        let store = Arc::new(FlakyStore::new(sample()));
        let (mut feed, notifier) = feed_with(store);
        feed.refresh().await.unwrap();

        let created = feed
            .add(EpisodeDraft {
                title: "A Era Dourada do NES".to_string(),
                historical_date: "1985-10-18".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(feed.episodes().last().unwrap().id, created.id);

        feed.update(
            "a",
            EpisodeDraft {
                title: "Atari VCS".to_string(),
                historical_date: "1990-01-01".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        // Moved to the end by its new year
        assert_eq!(feed.episodes().last().unwrap().title, "Atari VCS");

        feed.delete("b").await.unwrap();
        assert_eq!(feed.episodes().len(), 2);

        let levels: Vec<NotificationLevel> = notifier.drain().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NotificationLevel::Success; 3]);
    }

    #[tokio::test]
    async fn test_failed_write_notifies_error() {
        let store = Arc::new(FlakyStore::new(sample()));
        let (mut feed, notifier) = feed_with(store);
        feed.refresh().await.unwrap();

        let result = feed.delete("missing").await;
        assert!(matches!(result, Err(FeedError::Store(StoreError::NotFound(_)))));
        assert_eq!(feed.episodes().len(), 2);

        let notes = notifier.drain();
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].title, "Failed to delete episode");
    }
}
