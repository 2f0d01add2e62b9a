//! JSON-file store.
//!
//! The whole dataset is loaded on open and rewritten after every change.
//! Rewrites go through a temp file and a rename so a crash never leaves a
//! half-written document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use timeline_types::{Advertisement, AdvertisementDraft, Episode, EpisodeDraft};

use crate::dataset::Dataset;
use crate::error::StoreError;
use crate::store::{AdvertisementStore, EpisodeStore};

/// Store backed by a single JSON document on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<Dataset>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts an empty dataset.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Dataset::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "Data file missing, starting empty");
                Dataset::default()
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            path = ?path,
            episodes = data.episodes.len(),
            advertisements = data.advertisements.len(),
            "Opened JSON store"
        );

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, data: &Dataset) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = ?self.path, "Persisted dataset");
        Ok(())
    }

    /// Apply a change to a copy, persist it, then publish it.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Dataset) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.data.write().await;
        let mut next = guard.clone();
        let out = change(&mut next)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl EpisodeStore for JsonFileStore {
    async fn list_episodes(&self) -> Result<Vec<Episode>, StoreError> {
        Ok(self.data.read().await.episodes.clone())
    }

    async fn create_episode(&self, draft: EpisodeDraft) -> Result<Episode, StoreError> {
        self.mutate(|data| data.insert_episode(draft)).await
    }

    async fn update_episode(&self, id: &str, draft: EpisodeDraft) -> Result<Episode, StoreError> {
        self.mutate(|data| data.replace_episode(id, draft)).await
    }

    async fn delete_episode(&self, id: &str) -> Result<(), StoreError> {
        self.mutate(|data| data.remove_episode(id)).await
    }
}

#[async_trait]
impl AdvertisementStore for JsonFileStore {
    async fn list_advertisements(&self) -> Result<Vec<Advertisement>, StoreError> {
        Ok(self.data.read().await.advertisements_newest_first())
    }

    async fn create_advertisement(
        &self,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, StoreError> {
        self.mutate(|data| data.insert_advertisement(draft)).await
    }

    async fn update_advertisement(
        &self,
        id: &str,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, StoreError> {
        self.mutate(|data| data.replace_advertisement(id, draft))
            .await
    }

    async fn delete_advertisement(&self, id: &str) -> Result<(), StoreError> {
        self.mutate(|data| data.remove_advertisement(id)).await
    }
}
