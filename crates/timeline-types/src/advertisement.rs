//! Advertisement records for the gallery page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-submitted advertisement image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    /// Unique identifier
    pub id: String,

    /// What the ad shows (e.g. a game title)
    pub description: String,

    /// Platform the ad was made for (e.g. "Sega Master System")
    pub system: String,

    /// Who sent the ad in
    pub submitted_by: String,

    /// Opaque image URL
    pub image_url: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Advertisement {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        system: impl Into<String>,
        submitted_by: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            description: description.into(),
            system: system.into(),
            submitted_by: submitted_by.into(),
            image_url: image_url.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
