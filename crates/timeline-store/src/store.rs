//! The data service contract.
//!
//! Reads return records in no guaranteed order; callers sort. Writes take
//! whole drafts, including the nested timeline event list.

use async_trait::async_trait;

use timeline_types::{Advertisement, AdvertisementDraft, Episode, EpisodeDraft};

use crate::error::StoreError;

/// Episode CRUD.
#[async_trait]
pub trait EpisodeStore: Send + Sync {
    /// Fetch every episode.
    async fn list_episodes(&self) -> Result<Vec<Episode>, StoreError>;

    /// Validate a draft and store it under a fresh id.
    async fn create_episode(&self, draft: EpisodeDraft) -> Result<Episode, StoreError>;

    /// Validate a draft and replace the episode with the given id.
    async fn update_episode(&self, id: &str, draft: EpisodeDraft) -> Result<Episode, StoreError>;

    /// Remove the episode with the given id.
    async fn delete_episode(&self, id: &str) -> Result<(), StoreError>;
}

/// Advertisement CRUD for the gallery.
#[async_trait]
pub trait AdvertisementStore: Send + Sync {
    /// Fetch every advertisement, newest first.
    async fn list_advertisements(&self) -> Result<Vec<Advertisement>, StoreError>;

    async fn create_advertisement(
        &self,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, StoreError>;

    async fn update_advertisement(
        &self,
        id: &str,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, StoreError>;

    async fn delete_advertisement(&self, id: &str) -> Result<(), StoreError>;
}
