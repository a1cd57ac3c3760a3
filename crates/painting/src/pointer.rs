//! Pointer tracking for freehand strokes
//!
//! Converts raw pointer samples into surface-local points and keeps the
//! stroke session state (whether a stroke is in progress and the last
//! sampled point).

use drawboard_ipc::PointerSample;
use tracing::debug;

use crate::types::Point;

/// One brush engine invocation produced by the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Previous sample, None for the first sample of a stroke
    pub from: Option<Point>,
    pub to: Point,
}

/// Map a client-space sample into surface-local coordinates by subtracting
/// the surface's on-screen bounding-box origin.
pub fn to_local(sample: &PointerSample) -> Point {
    Point::from_array(sample.local())
}

/// Stroke session state
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    is_drawing: bool,
    last_point: Option<Point>,
    /// Segments emitted during the current stroke
    samples: u32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at `point`.
    ///
    /// Always yields one segment without a previous point, so brushes that
    /// paint on a tap leave a mark even with zero movement.
    pub fn begin(&mut self, point: Point) -> Segment {
        if self.is_drawing {
            debug!("PointerTracker::begin: restarting stroke in progress");
        }
        self.is_drawing = true;
        self.last_point = Some(point);
        self.samples = 1;
        Segment { from: None, to: point }
    }

    /// Continue the stroke to `point`.
    ///
    /// Returns None (and changes nothing) when no stroke is in progress.
    pub fn move_to(&mut self, point: Point) -> Option<Segment> {
        if !self.is_drawing {
            return None;
        }
        let from = self.last_point.replace(point);
        self.samples += 1;
        Some(Segment { from, to: point })
    }

    /// End the stroke (pointer up, pointer leave, touch end).
    ///
    /// Pixels already rasterized stay on the surface. Ending when no stroke
    /// is in progress is a no-op.
    pub fn end(&mut self) {
        if self.is_drawing {
            debug!("PointerTracker::end: stroke finished after {} samples", self.samples);
        }
        self.is_drawing = false;
        self.last_point = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    /// Segments emitted by the current (or most recent) stroke
    pub fn samples(&self) -> u32 {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_local_subtracts_bounding_box_origin() {
        let sample = PointerSample::new(150.0, 220.0, 50.0, 20.0);
        assert_eq!(to_local(&sample), Point::new(100.0, 200.0));
    }

    #[test]
    fn test_begin_yields_single_point_segment() {
        let mut tracker = PointerTracker::new();
        let segment = tracker.begin(Point::new(3.0, 4.0));

        assert_eq!(segment, Segment { from: None, to: Point::new(3.0, 4.0) });
        assert!(tracker.is_drawing());
        assert_eq!(tracker.last_point(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_move_chains_consecutive_points() {
        let mut tracker = PointerTracker::new();
        tracker.begin(Point::new(0.0, 0.0));

        let first = tracker.move_to(Point::new(1.0, 0.0)).unwrap();
        let second = tracker.move_to(Point::new(2.0, 0.0)).unwrap();

        assert_eq!(first.from, Some(Point::new(0.0, 0.0)));
        assert_eq!(second.from, Some(Point::new(1.0, 0.0)));
        assert_eq!(tracker.last_point(), Some(Point::new(2.0, 0.0)));
        assert_eq!(tracker.samples(), 3);
    }

    #[test]
    fn test_moves_while_idle_are_ignored() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.move_to(Point::new(5.0, 5.0)), None);
        assert_eq!(tracker.last_point(), None);
        assert_eq!(tracker.samples(), 0);
    }

    #[test]
    fn test_end_clears_session() {
        let mut tracker = PointerTracker::new();
        tracker.begin(Point::new(1.0, 1.0));
        tracker.end();

        assert!(!tracker.is_drawing());
        assert_eq!(tracker.last_point(), None);
        assert_eq!(tracker.move_to(Point::new(2.0, 2.0)), None);

        // Ending twice is harmless
        tracker.end();
        assert!(!tracker.is_drawing());
    }

    #[test]
    fn test_samples_equal_moves_plus_one() {
        let mut tracker = PointerTracker::new();
        tracker.begin(Point::ZERO);
        let moves = 17;
        for i in 0..moves {
            assert!(tracker.move_to(Point::new(i as f32, 0.0)).is_some());
        }
        assert_eq!(tracker.samples(), moves + 1);
    }
}
