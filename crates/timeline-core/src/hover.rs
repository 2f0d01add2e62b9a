//! Hover state for year points.
//!
//! Leaving the trigger or the tooltip schedules a dismissal after a short
//! debounce so the pointer can cross the gap between them. Entering the
//! tooltip, or hovering any year, cancels the pending dismissal. There is at
//! most one pending dismissal per hover session.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::config::TimelineConfig;
use crate::grouping::YearGroup;
use crate::tooltip::Tooltip;

/// Screen anchor for tooltip placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The currently hovered year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverState {
    pub year: i32,
    pub anchor: PointerPosition,
    pub tooltip: Tooltip,
}

/// Tracks the hovered year and its debounced dismissal.
#[derive(Debug, Clone)]
pub struct HoverController {
    config: TimelineConfig,
    state: Option<HoverState>,
    dismiss_at: Option<Instant>,
}

impl HoverController {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            state: None,
            dismiss_at: None,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.config.hover_dismiss
    }

    /// Start hovering a year; replaces any previous hover session.
    pub fn hover(&mut self, group: &YearGroup<'_>, anchor: PointerPosition) -> &HoverState {
        self.dismiss_at = None;
        debug!(year = group.year, "Hovering year");
        self.state.insert(HoverState {
            year: group.year,
            anchor,
            tooltip: Tooltip::for_group(group, &self.config),
        })
    }

    /// The pointer left the year point.
    pub fn leave_trigger(&mut self) {
        self.schedule_dismiss();
    }

    /// The pointer entered the tooltip itself.
    pub fn enter_tooltip(&mut self) {
        if self.dismiss_at.take().is_some() {
            debug!("Cancelled pending tooltip dismissal");
        }
    }

    /// The pointer left the tooltip.
    pub fn leave_tooltip(&mut self) {
        self.schedule_dismiss();
    }

    fn schedule_dismiss(&mut self) {
        if self.state.is_some() {
            self.dismiss_at = Some(Instant::now() + self.config.hover_dismiss);
        }
    }

    /// Close the tooltip immediately.
    pub fn dismiss(&mut self) {
        self.state = None;
        self.dismiss_at = None;
    }

    /// Apply a due dismissal. Returns true if the tooltip was closed.
    pub fn poll(&mut self) -> bool {
        match self.dismiss_at {
            Some(deadline) if Instant::now() >= deadline => {
                debug!("Tooltip dismissed after debounce");
                self.dismiss();
                true
            }
            _ => false,
        }
    }

    /// Wait for the pending dismissal, if any, and apply it.
    ///
    /// Returns false right away when nothing is pending.
    pub async fn settle(&mut self) -> bool {
        let Some(deadline) = self.dismiss_at else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;
        self.poll()
    }

    pub fn hovered(&self) -> Option<&HoverState> {
        self.state.as_ref()
    }

    pub fn pending_dismiss(&self) -> Option<Instant> {
        self.dismiss_at
    }
}

impl Default for HoverController {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}
