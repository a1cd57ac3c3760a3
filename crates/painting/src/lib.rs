//! Drawing board painting system - freehand strokes and raster export
//!
//! This crate provides the core of the drawing board:
//! - [`types`] - Point, color and brush settings
//! - [`validation`] - Hex color and brush parameter validation
//! - [`surface`] - CPU RGBA surface with device-pixel-ratio scaling
//! - [`raster`] - Circle and round-capped line rasterization
//! - [`brush`] - Brush engine (pencil, brush, spray)
//! - [`scatter`] - Random sources for the spray brush
//! - [`pointer`] - Pointer tracking and stroke session state
//! - [`export`] - PNG/JPEG encoding, data URLs and download filenames
//! - [`pipeline`] - The drawing board tying it all together

pub mod brush;
pub mod constants;
pub mod export;
pub mod pipeline;
pub mod pointer;
pub mod raster;
pub mod scatter;
pub mod surface;
pub mod types;
pub mod validation;

pub use brush::*;
pub use constants::*;
pub use export::*;
pub use pipeline::*;
pub use pointer::*;
pub use raster::*;
pub use scatter::*;
pub use surface::*;
pub use types::*;
pub use validation::*;
