//! Year activation and selection state.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use timeline_types::Episode;

use crate::config::TimelineConfig;
use crate::flatten::FlattenedEvent;
use crate::grouping::YearGroup;
use crate::hover::{HoverController, HoverState, PointerPosition};

/// Errors from selection operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// `activate` was called with a group that has no events
    #[error("Cannot activate year {0}: group is empty")]
    EmptyGroup(i32),
}

/// Year detail chooser content.
#[derive(Debug, Clone, Serialize)]
pub struct YearDetail<'a> {
    pub year: i32,
    pub episodes: Vec<FlattenedEvent<'a>>,
    pub historical_events: Vec<FlattenedEvent<'a>>,
}

impl YearDetail<'_> {
    pub fn len(&self) -> usize {
        self.episodes.len() + self.historical_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What activating a year point leads to.
#[derive(Debug, Clone)]
pub enum Activation<'a> {
    /// The year holds a single event; open its owning episode
    OpenEpisode(&'a Episode),
    /// Several events share the year; let the user choose
    YearDetail(YearDetail<'a>),
}

/// Decide what a click on a year point opens.
///
/// A lone event opens its episode directly, even when the event is a nested
/// one. Otherwise the group is split into episodes and historical events,
/// both in grouping order.
pub fn activate<'a>(group: &YearGroup<'a>) -> Result<Activation<'a>, SelectionError> {
    match group.events.as_slice() {
        [] => Err(SelectionError::EmptyGroup(group.year)),
        [only] => Ok(Activation::OpenEpisode(only.episode)),
        _ => Ok(Activation::YearDetail(YearDetail {
            year: group.year,
            episodes: group.episodes().cloned().collect(),
            historical_events: group.historical_events().cloned().collect(),
        })),
    }
}

/// Current selection, held by id so it survives a data refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Episode {
        episode_id: String,
    },
    YearDetail {
        year: i32,
    },
}

/// Session-local interaction state: the open episode or year detail plus the
/// hover tooltip.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Selection,
    hover: HoverController,
}

impl SelectionController {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            selection: Selection::None,
            hover: HoverController::new(config),
        }
    }

    /// Activate a year point and remember what it opened.
    pub fn activate<'a>(&mut self, group: &YearGroup<'a>) -> Result<Activation<'a>, SelectionError> {
        let activation = activate(group)?;
        self.selection = match &activation {
            Activation::OpenEpisode(episode) => Selection::Episode {
                episode_id: episode.id.clone(),
            },
            Activation::YearDetail(detail) => Selection::YearDetail { year: detail.year },
        };
        // Opening a panel closes the tooltip
        self.hover.dismiss();
        debug!(selection = ?self.selection, "Activated year {}", group.year);
        Ok(activation)
    }

    /// Pick one episode from the year detail chooser.
    pub fn select_episode(&mut self, episode_id: impl Into<String>) {
        self.selection = Selection::Episode {
            episode_id: episode_id.into(),
        };
    }

    pub fn dismiss_selection(&mut self) {
        self.selection = Selection::None;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Resolve the selected episode against the current collection.
    pub fn selected_episode<'a>(&self, episodes: &'a [Episode]) -> Option<&'a Episode> {
        match &self.selection {
            Selection::Episode { episode_id } => episodes.iter().find(|e| &e.id == episode_id),
            _ => None,
        }
    }

    pub fn hover(&mut self, group: &YearGroup<'_>, anchor: PointerPosition) -> &HoverState {
        self.hover.hover(group, anchor)
    }

    pub fn dismiss_hover(&mut self) {
        self.hover.dismiss();
    }

    pub fn hover_controller(&self) -> &HoverController {
        &self.hover
    }

    pub fn hover_controller_mut(&mut self) -> &mut HoverController {
        &mut self.hover
    }
}
