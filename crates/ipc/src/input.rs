//! Pointer and touch input events.

use serde::{Deserialize, Serialize};

/// A raw pointer sample in client (viewport) coordinates, together with the
/// on-screen origin of the surface's bounding box at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    pub client_x: f32,
    pub client_y: f32,
    pub rect_left: f32,
    pub rect_top: f32,
}

impl PointerSample {
    pub fn new(client_x: f32, client_y: f32, rect_left: f32, rect_top: f32) -> Self {
        Self {
            client_x,
            client_y,
            rect_left,
            rect_top,
        }
    }

    /// Sample for a surface whose bounding box sits at the viewport origin.
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    /// Surface-local coordinates (client position minus bounding-box origin).
    pub fn local(&self) -> [f32; 2] {
        [self.client_x - self.rect_left, self.client_y - self.rect_top]
    }
}

/// Input events delivered to the drawing surface.
///
/// Mouse and touch streams are kept distinct so hosts can forward them
/// verbatim; the board treats both the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "sample")]
pub enum InputEvent {
    PointerDown(PointerSample),
    PointerMove(PointerSample),
    PointerUp,
    PointerLeave,
    /// Active touches, first entry is the one that draws
    TouchStart(Vec<PointerSample>),
    TouchMove(Vec<PointerSample>),
    TouchEnd,
}

impl InputEvent {
    /// The sample that drives drawing for this event, if any.
    pub fn primary_sample(&self) -> Option<PointerSample> {
        match self {
            Self::PointerDown(s) | Self::PointerMove(s) => Some(*s),
            Self::TouchStart(touches) | Self::TouchMove(touches) => touches.first().copied(),
            Self::PointerUp | Self::PointerLeave | Self::TouchEnd => None,
        }
    }

    /// Touch events must suppress the host's default scroll and zoom gestures.
    pub fn is_touch(&self) -> bool {
        matches!(self, Self::TouchStart(_) | Self::TouchMove(_) | Self::TouchEnd)
    }
}
