//! In-memory store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use timeline_types::{Advertisement, AdvertisementDraft, Episode, EpisodeDraft};

use crate::dataset::Dataset;
use crate::error::StoreError;
use crate::store::{AdvertisementStore, EpisodeStore};

/// Store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<Dataset>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with episodes.
    pub fn with_episodes(episodes: Vec<Episode>) -> Self {
        Self {
            data: RwLock::new(Dataset::new(episodes, Vec::new())),
        }
    }

    pub fn with_dataset(data: Dataset) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }
}

#[async_trait]
impl EpisodeStore for InMemoryStore {
    async fn list_episodes(&self) -> Result<Vec<Episode>, StoreError> {
        Ok(self.data.read().await.episodes.clone())
    }

    async fn create_episode(&self, draft: EpisodeDraft) -> Result<Episode, StoreError> {
        self.data.write().await.insert_episode(draft)
    }

    async fn update_episode(&self, id: &str, draft: EpisodeDraft) -> Result<Episode, StoreError> {
        self.data.write().await.replace_episode(id, draft)
    }

    async fn delete_episode(&self, id: &str) -> Result<(), StoreError> {
        self.data.write().await.remove_episode(id)
    }
}

#[async_trait]
impl AdvertisementStore for InMemoryStore {
    async fn list_advertisements(&self) -> Result<Vec<Advertisement>, StoreError> {
        Ok(self.data.read().await.advertisements_newest_first())
    }

    async fn create_advertisement(
        &self,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, StoreError> {
        self.data.write().await.insert_advertisement(draft)
    }

    async fn update_advertisement(
        &self,
        id: &str,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, StoreError> {
        self.data.write().await.replace_advertisement(id, draft)
    }

    async fn delete_advertisement(&self, id: &str) -> Result<(), StoreError> {
        self.data.write().await.remove_advertisement(id)
    }
}
