//! Configuration for timeline aggregation and interaction.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use timeline_types::config::{
    default_hover_dismiss_ms, default_placeholder_image_url, default_tooltip_description_chars,
};
use timeline_types::Settings;

/// Core settings consumed by the view and interaction layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Image used when neither the event nor its episode has one
    pub placeholder_image_url: String,

    /// Description length kept in hover tooltips
    pub tooltip_description_chars: usize,

    /// Delay before a hover tooltip closes once the pointer leaves
    pub hover_dismiss: Duration,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            placeholder_image_url: default_placeholder_image_url(),
            tooltip_description_chars: default_tooltip_description_chars(),
            hover_dismiss: Duration::from_millis(default_hover_dismiss_ms()),
        }
    }
}

impl From<&Settings> for TimelineConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            placeholder_image_url: settings.placeholder_image_url.clone(),
            tooltip_description_chars: settings.tooltip_description_chars,
            hover_dismiss: Duration::from_millis(settings.hover_dismiss_ms),
        }
    }
}
