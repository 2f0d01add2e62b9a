//! Full-screen image viewer state.

use serde::Serialize;

pub const ZOOM_STEP: f64 = 1.2;
pub const MAX_ZOOM: f64 = 5.0;
pub const MIN_ZOOM: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Pointer position where a drag started, relative to the current offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragOrigin {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageViewer {
    #[default]
    Closed,
    Open {
        url: String,
        alt: String,
        zoom: f64,
        offset: Offset,
        drag: Option<DragOrigin>,
    },
}

impl ImageViewer {
    /// Open an image at 100% with no offset. Replaces any open image.
    pub fn open(&mut self, url: impl Into<String>, alt: impl Into<String>) {
        *self = ImageViewer::Open {
            url: url.into(),
            alt: alt.into(),
            zoom: 1.0,
            offset: Offset::default(),
            drag: None,
        };
    }

    pub fn close(&mut self) {
        *self = ImageViewer::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ImageViewer::Open { .. })
    }

    pub fn zoom(&self) -> Option<f64> {
        match self {
            ImageViewer::Open { zoom, .. } => Some(*zoom),
            ImageViewer::Closed => None,
        }
    }

    pub fn offset(&self) -> Option<Offset> {
        match self {
            ImageViewer::Open { offset, .. } => Some(*offset),
            ImageViewer::Closed => None,
        }
    }

    /// Zoom indicator text, e.g. "144%".
    pub fn zoom_label(&self) -> Option<String> {
        self.zoom().map(|z| format!("{}%", (z * 100.0).round() as i64))
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(|z| (z * ZOOM_STEP).min(MAX_ZOOM));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(|z| (z / ZOOM_STEP).max(MIN_ZOOM));
    }

    /// Back to 100% and centered.
    pub fn reset(&mut self) {
        self.set_zoom(|_| 1.0);
    }

    fn set_zoom(&mut self, next: impl FnOnce(f64) -> f64) {
        if let ImageViewer::Open {
            zoom, offset, drag, ..
        } = self
        {
            *zoom = next(*zoom);
            *offset = Offset::default();
            *drag = None;
        }
    }

    /// Start dragging. Ignored unless zoomed past 100%.
    pub fn start_drag(&mut self, x: f64, y: f64) {
        if let ImageViewer::Open {
            zoom, offset, drag, ..
        } = self
        {
            if *zoom > 1.0 {
                *drag = Some(DragOrigin {
                    x: x - offset.x,
                    y: y - offset.y,
                });
            }
        }
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        if let ImageViewer::Open {
            zoom,
            offset,
            drag: Some(origin),
            ..
        } = self
        {
            if *zoom > 1.0 {
                *offset = Offset {
                    x: x - origin.x,
                    y: y - origin.y,
                };
            }
        }
    }

    pub fn end_drag(&mut self) {
        if let ImageViewer::Open { drag, .. } = self {
            *drag = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> ImageViewer {
        let mut viewer = ImageViewer::default();
        viewer.open("https://img/atari.jpg", "Atari 2600");
        viewer
    }

    #[test]
    fn test_open_starts_at_full_size() {
        let viewer = opened();
        assert_eq!(viewer.zoom(), Some(1.0));
        assert_eq!(viewer.zoom_label().as_deref(), Some("100%"));
        assert_eq!(viewer.offset(), Some(Offset::default()));
    }

    #[test]
    fn test_zoom_steps_and_label() {
        let mut viewer = opened();
        viewer.zoom_in();
        viewer.zoom_in();
        assert_eq!(viewer.zoom_label().as_deref(), Some("144%"));

        viewer.zoom_out();
        assert_eq!(viewer.zoom_label().as_deref(), Some("120%"));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewer = opened();
        for _ in 0..50 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.zoom(), Some(MAX_ZOOM));

        for _ in 0..100 {
            viewer.zoom_out();
        }
        assert_eq!(viewer.zoom(), Some(MIN_ZOOM));
    }

    #[test]
    fn test_pan_only_when_zoomed() {
        let mut viewer = opened();
        viewer.start_drag(10.0, 10.0);
        viewer.drag_to(50.0, 40.0);
        assert_eq!(viewer.offset(), Some(Offset::default()));

        viewer.zoom_in();
        viewer.start_drag(10.0, 10.0);
        viewer.drag_to(50.0, 40.0);
        viewer.end_drag();
        assert_eq!(viewer.offset(), Some(Offset { x: 40.0, y: 30.0 }));

        // Moving after release does nothing
        viewer.drag_to(0.0, 0.0);
        assert_eq!(viewer.offset(), Some(Offset { x: 40.0, y: 30.0 }));
    }

    #[test]
    fn test_zoom_recenters() {
        let mut viewer = opened();
        viewer.zoom_in();
        viewer.start_drag(0.0, 0.0);
        viewer.drag_to(25.0, 25.0);
        viewer.zoom_in();
        assert_eq!(viewer.offset(), Some(Offset::default()));
    }

    #[test]
    fn test_reset_and_close() {
        let mut viewer = opened();
        viewer.zoom_in();
        viewer.reset();
        assert_eq!(viewer.zoom(), Some(1.0));

        viewer.close();
        assert!(!viewer.is_open());
        assert_eq!(viewer.zoom_label(), None);

        // Operations on a closed viewer are no-ops
        viewer.zoom_in();
        assert_eq!(viewer, ImageViewer::Closed);
    }
}
