//! Rasterization primitives for brush strokes
//!
//! All coordinates and lengths are logical (CSS) pixels; they are scaled to
//! the physical buffer here. A physical pixel is covered when its center
//! lies inside the shape.

use tracing::debug;

use crate::surface::CpuSurface;
use crate::types::Point;

/// Affected physical region as (x, y, width, height)
pub type PixelRegion = (u32, u32, u32, u32);

impl CpuSurface {
    /// Fill a circle centered at `center` (a brush dab or spray dot).
    ///
    /// Returns the bounding box of the affected region, or None if the dab
    /// is degenerate or completely outside the surface.
    pub fn fill_circle(
        &mut self,
        center: Point,
        radius: f32,
        color: [f32; 4],
        opacity: f32,
    ) -> Option<PixelRegion> {
        if radius <= 0.0 || opacity <= 0.0 {
            debug!("  fill_circle skipped: radius={:.2}, opacity={:.2}", radius, opacity);
            return None;
        }

        let scale = self.scale();
        let c = center * scale;
        let r = radius * scale;
        let r_sq = r * r;

        let (x_min, y_min, x_max, y_max) = self.clip(c.x - r, c.y - r, c.x + r, c.y + r)?;

        for py in y_min..y_max {
            for px in x_min..x_max {
                let dx = (px as f32 + 0.5) - c.x;
                let dy = (py as f32 + 0.5) - c.y;
                if dx * dx + dy * dy <= r_sq {
                    self.blend_pixel(px, py, color, opacity);
                }
            }
        }

        Some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    /// Stroke a straight segment of the given width with round caps.
    ///
    /// The covered area is every point within `width / 2` of the segment,
    /// and each pixel is blended exactly once.
    pub fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        width: f32,
        color: [f32; 4],
        opacity: f32,
    ) -> Option<PixelRegion> {
        if width <= 0.0 || opacity <= 0.0 {
            debug!("  stroke_segment skipped: width={:.2}, opacity={:.2}", width, opacity);
            return None;
        }

        let scale = self.scale();
        let a = from * scale;
        let b = to * scale;
        let half = width * scale / 2.0;
        let half_sq = half * half;

        let min = a.min(b);
        let max = a.max(b);
        let (x_min, y_min, x_max, y_max) =
            self.clip(min.x - half, min.y - half, max.x + half, max.y + half)?;

        let ab = b - a;
        let len_sq = ab.length_squared();

        for py in y_min..y_max {
            for px in x_min..x_max {
                let p = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                let ap = p - a;
                // Projection onto the segment, clamped to the endpoints (round caps)
                let t = if len_sq > 0.0 {
                    (ap.dot(ab) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                if (ap - ab * t).length_squared() <= half_sq {
                    self.blend_pixel(px, py, color, opacity);
                }
            }
        }

        Some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    /// Clamp a physical bounding box to the surface.
    /// Returns None if nothing remains.
    fn clip(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Option<(u32, u32, u32, u32)> {
        let (width, height) = self.physical_size();
        let x_min = (x0.floor().max(0.0) as u32).min(width);
        let y_min = (y0.floor().max(0.0) as u32).min(height);
        let x_max = (x1.ceil().max(0.0) as u32).min(width);
        let y_max = (y1.ceil().max(0.0) as u32).min(height);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }
        Some((x_min, y_min, x_max, y_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WHITE;

    const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_fill_circle_covers_disc_only() {
        let mut surface = CpuSurface::new(20, 20, 1.0);
        let region = surface.fill_circle(Point::new(10.0, 10.0), 3.0, BLACK, 1.0);

        assert_eq!(region, Some((7, 7, 6, 6)));
        assert_eq!(surface.get_pixel(10, 10), Some(BLACK));
        assert_eq!(surface.get_pixel(12, 9), Some(BLACK));
        // Corner of the bounding box lies outside the disc
        assert_eq!(surface.get_pixel(7, 7), Some(WHITE));
    }

    #[test]
    fn test_fill_circle_outside_surface() {
        let mut surface = CpuSurface::new(10, 10, 1.0);
        assert_eq!(surface.fill_circle(Point::new(-50.0, 5.0), 2.0, BLACK, 1.0), None);
        assert!(surface.pixels().iter().all(|px| *px == WHITE));
    }

    #[test]
    fn test_degenerate_primitives_are_skipped() {
        let mut surface = CpuSurface::new(10, 10, 1.0);
        assert_eq!(surface.fill_circle(Point::new(5.0, 5.0), 0.0, BLACK, 1.0), None);
        assert_eq!(surface.fill_circle(Point::new(5.0, 5.0), 2.0, BLACK, 0.0), None);
        assert_eq!(
            surface.stroke_segment(Point::ZERO, Point::new(5.0, 5.0), -1.0, BLACK, 1.0),
            None
        );
        assert!(surface.pixels().iter().all(|px| *px == WHITE));
    }

    #[test]
    fn test_stroke_segment_width_and_caps() {
        let mut surface = CpuSurface::new(40, 20, 1.0);
        surface.stroke_segment(Point::new(10.0, 10.0), Point::new(30.0, 10.0), 4.0, BLACK, 1.0);

        // Along the segment
        assert_eq!(surface.get_pixel(20, 10), Some(BLACK));
        assert_eq!(surface.get_pixel(20, 8), Some(BLACK));
        // Outside the half-width
        assert_eq!(surface.get_pixel(20, 13), Some(WHITE));
        // Round cap extends past the endpoint
        assert_eq!(surface.get_pixel(31, 10), Some(BLACK));
        assert_eq!(surface.get_pixel(33, 10), Some(WHITE));
    }

    #[test]
    fn test_stroke_segment_blends_each_pixel_once() {
        let mut surface = CpuSurface::new(20, 20, 1.0);
        surface.stroke_segment(Point::new(2.0, 10.0), Point::new(18.0, 10.0), 6.0, BLACK, 0.5);

        let px = surface.get_pixel(10, 10).unwrap();
        assert!((px[0] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_scaled_surface_uses_logical_coordinates() {
        let mut surface = CpuSurface::new(10, 10, 2.0);
        surface.fill_circle(Point::new(5.0, 5.0), 1.0, BLACK, 1.0);

        // Logical (5, 5) is physical (10, 10)
        assert_eq!(surface.get_pixel(10, 10), Some(BLACK));
        assert_eq!(surface.get_pixel(5, 5), Some(WHITE));
    }
}
