//! The document both stores operate on.
//!
//! File format: `{ "episodes": [...], "advertisements": [...] }`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use timeline_types::{Advertisement, AdvertisementDraft, Episode, EpisodeDraft};

use crate::error::StoreError;

/// All records held by a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub episodes: Vec<Episode>,

    #[serde(default)]
    pub advertisements: Vec<Advertisement>,
}

impl Dataset {
    pub fn new(episodes: Vec<Episode>, advertisements: Vec<Advertisement>) -> Self {
        Self {
            episodes,
            advertisements,
        }
    }

    pub fn insert_episode(&mut self, draft: EpisodeDraft) -> Result<Episode, StoreError> {
        let episode = draft.into_episode(ulid::Ulid::new().to_string())?;
        info!(
            episode_id = %episode.id,
            year = episode.year,
            nested = episode.timeline_events.len(),
            "Created episode"
        );
        self.episodes.push(episode.clone());
        Ok(episode)
    }

    pub fn replace_episode(&mut self, id: &str, draft: EpisodeDraft) -> Result<Episode, StoreError> {
        let slot = self
            .episodes
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("episode {id}")))?;

        let updated = draft.apply_to(slot)?;
        *slot = updated.clone();
        info!(episode_id = %id, year = updated.year, "Updated episode");
        Ok(updated)
    }

    pub fn remove_episode(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.episodes.len();
        self.episodes.retain(|e| e.id != id);
        if self.episodes.len() == before {
            return Err(StoreError::NotFound(format!("episode {id}")));
        }
        info!(episode_id = %id, "Deleted episode");
        Ok(())
    }

    /// Advertisements, newest first.
    pub fn advertisements_newest_first(&self) -> Vec<Advertisement> {
        let mut ads = self.advertisements.clone();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        ads
    }

    pub fn insert_advertisement(
        &mut self,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, StoreError> {
        let ad = draft.into_advertisement(ulid::Ulid::new().to_string())?;
        info!(ad_id = %ad.id, system = %ad.system, "Created advertisement");
        self.advertisements.push(ad.clone());
        Ok(ad)
    }

    pub fn replace_advertisement(
        &mut self,
        id: &str,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, StoreError> {
        let slot = self
            .advertisements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("advertisement {id}")))?;

        let updated = draft.apply_to(slot)?;
        *slot = updated.clone();
        info!(ad_id = %id, "Updated advertisement");
        Ok(updated)
    }

    pub fn remove_advertisement(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.advertisements.len();
        self.advertisements.retain(|a| a.id != id);
        if self.advertisements.len() == before {
            return Err(StoreError::NotFound(format!("advertisement {id}")));
        }
        debug!(ad_id = %id, "Deleted advertisement");
        Ok(())
    }
}
