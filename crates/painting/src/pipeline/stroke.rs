//! Stroke handling for the drawing board

use drawboard_ipc::InputEvent;
use tracing::debug;

use crate::pointer::{Segment, to_local};
use crate::scatter::ScatterSource;
use crate::types::{Point, StrokeReport};

use super::DrawingBoard;

impl<S: ScatterSource> DrawingBoard<S> {
    /// Begin a stroke at `point` (surface-local CSS pixels).
    ///
    /// Renders the initial sample right away. Returns None if no surface
    /// is mounted.
    pub fn begin_stroke(&mut self, point: Point) -> Option<StrokeReport> {
        if self.surface.is_none() {
            debug!("begin_stroke: no surface mounted, ignoring");
            return None;
        }
        let segment = self.tracker.begin(point);
        self.paint_segment(segment)
    }

    /// Continue the stroke to `point`.
    ///
    /// Returns None if no stroke is in progress or no surface is mounted.
    pub fn stroke_to(&mut self, point: Point) -> Option<StrokeReport> {
        if self.surface.is_none() {
            return None;
        }
        let segment = self.tracker.move_to(point)?;
        self.paint_segment(segment)
    }

    /// End the current stroke.
    ///
    /// Pixels already drawn are kept; there is nothing to roll back.
    pub fn end_stroke(&mut self) {
        self.tracker.end();
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.tracker.is_drawing()
    }

    /// Brush engine invocations in the current (or most recent) stroke
    pub fn stroke_samples(&self) -> u32 {
        self.tracker.samples()
    }

    /// Route a pointer or touch event.
    ///
    /// Mouse and touch streams behave the same; touch streams draw with
    /// their first touch point.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<StrokeReport> {
        match event {
            InputEvent::PointerDown(_) | InputEvent::TouchStart(_) => {
                let sample = event.primary_sample()?;
                self.begin_stroke(to_local(&sample))
            }
            InputEvent::PointerMove(_) | InputEvent::TouchMove(_) => {
                let sample = event.primary_sample()?;
                self.stroke_to(to_local(&sample))
            }
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                self.end_stroke();
                None
            }
        }
    }

    fn paint_segment(&mut self, segment: Segment) -> Option<StrokeReport> {
        let surface = self.surface.as_mut()?;
        // Settings are copied into every call
        Some(
            self.engine
                .paint(surface, segment.from, segment.to, self.settings),
        )
    }
}
