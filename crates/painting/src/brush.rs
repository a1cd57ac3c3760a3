//! Brush engine for stroke rasterization
//!
//! Each call renders one stroke segment `(from, to)` onto the surface with
//! one of three algorithms:
//! - pencil: a round-capped line between consecutive samples
//! - brush: circular dabs, interpolated along the segment to close gaps
//! - spray: dots scattered inside a disc, fading toward its edge

use tracing::debug;

use crate::constants::{DAB_SPACING_DIVISOR, SPRAY_DENSITY, SPRAY_DOT_RADIUS};
use crate::scatter::{HashScatter, ScatterSource};
use crate::surface::CpuSurface;
use crate::types::{BrushKind, BrushSettings, Point, StrokeReport};

/// A single spray dot: position and effective alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SprayDot {
    pub position: Point,
    pub alpha: f32,
}

/// Number of interpolation steps between two brush samples,
/// `ceil(distance / (size / 4))`.
///
/// Dabs are placed at `i / steps` for `i in 1..steps`, so a segment no
/// longer than the spacing gets no extra dabs.
pub fn interpolation_steps(distance: f32, size: f32) -> u32 {
    let spacing = size / DAB_SPACING_DIVISOR;
    if spacing <= 0.0 || distance <= 0.0 || !distance.is_finite() {
        return 0;
    }
    (distance / spacing).ceil() as u32
}

/// Centers of every dab the brush stamps for one segment.
///
/// The dab at `to` comes first, followed by the interpolated dabs from
/// `from` toward `to`.
pub fn dab_centers(from: Option<Point>, to: Point, size: f32) -> Vec<Point> {
    let mut centers = vec![to];

    if let Some(from) = from {
        let steps = interpolation_steps(from.distance(to), size);
        centers.extend((1..steps).map(|i| from.lerp(to, i as f32 / steps as f32)));
    }

    centers
}

/// Scatter spray dots around `center`.
///
/// Draws [`SPRAY_DENSITY`] candidates uniformly from the square of side
/// `size` and keeps those inside the disc of radius `size / 2`. Alpha falls
/// off linearly from `opacity` at the center to zero at the edge.
pub fn spray_dots(
    center: Point,
    settings: &BrushSettings,
    scatter: &mut impl ScatterSource,
) -> Vec<SprayDot> {
    let radius = settings.radius();
    if radius <= 0.0 {
        return Vec::new();
    }

    let mut dots = Vec::with_capacity(SPRAY_DENSITY);
    for _ in 0..SPRAY_DENSITY {
        let offset = Point::new(
            (scatter.next_unit() - 0.5) * settings.size,
            (scatter.next_unit() - 0.5) * settings.size,
        );
        let distance = offset.length();
        if distance > radius {
            continue;
        }
        dots.push(SprayDot {
            position: center + offset,
            alpha: settings.opacity * (1.0 - distance / radius),
        });
    }
    dots
}

/// Brush engine that rasterizes stroke segments
///
/// The engine holds no stroke state of its own; the caller supplies the
/// previous sample (if any) with every call.
pub struct BrushEngine<S: ScatterSource = HashScatter> {
    scatter: S,
}

impl BrushEngine {
    /// Create a brush engine with the default scatter generator
    pub fn with_default_scatter() -> Self {
        Self::new(HashScatter::default())
    }
}

impl<S: ScatterSource> BrushEngine<S> {
    /// Create a brush engine drawing spray offsets from `scatter`
    pub fn new(scatter: S) -> Self {
        Self { scatter }
    }

    /// Rasterize one stroke segment.
    ///
    /// `from` is None for the first sample of a stroke. Degenerate settings
    /// (non-positive size, zero opacity) draw nothing visible.
    pub fn paint(
        &mut self,
        surface: &mut CpuSurface,
        from: Option<Point>,
        to: Point,
        settings: BrushSettings,
    ) -> StrokeReport {
        let color = settings.color.to_rgba_f32();
        let mut report = StrokeReport::default();

        match settings.kind {
            BrushKind::Pencil => {
                // A line needs two points, so an isolated tap leaves no mark
                let Some(from) = from else {
                    debug!("BrushEngine::paint: pencil needs two samples, skipping first");
                    return report;
                };
                if surface
                    .stroke_segment(from, to, settings.size, color, settings.opacity)
                    .is_some()
                {
                    report.lines = 1;
                }
            }
            BrushKind::Brush => {
                for center in dab_centers(from, to, settings.size) {
                    if surface
                        .fill_circle(center, settings.radius(), color, settings.opacity)
                        .is_some()
                    {
                        report.dabs += 1;
                    }
                }
            }
            BrushKind::Spray => {
                for dot in spray_dots(to, &settings, &mut self.scatter) {
                    if surface
                        .fill_circle(dot.position, SPRAY_DOT_RADIUS, color, dot.alpha)
                        .is_some()
                    {
                        report.dots += 1;
                    }
                }
            }
        }

        debug!(
            "BrushEngine::paint: {} to ({:.1}, {:.1}) -> {:?}",
            settings.kind, to.x, to.y, report
        );
        report
    }
}
