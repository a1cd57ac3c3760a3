//! Complete drawing-board pipeline
//!
//! This module connects:
//! - Input handling (pointer/touch events from the UI shell)
//! - Pointer tracking (stroke session state)
//! - Brush engine (segment rasterization)
//! - CPU surface (the pixel buffer)
//! - Export (encoding and filename generation)
//!
//! Everything runs on the caller's thread; hosts feed events in order.

mod commands;
mod stroke;
mod surface_ops;

use drawboard_config::{BrushDefaults, DisplayConfig};
use tracing::debug;

use crate::brush::BrushEngine;
use crate::pointer::PointerTracker;
use crate::scatter::{HashScatter, ScatterSource};
use crate::surface::CpuSurface;
use crate::types::{BrushSettings, Color};

/// The drawing board: one surface, one pointer, one brush configuration
///
/// Workflow:
/// 1. `mount` allocates the surface (white, scaled by device pixel ratio)
/// 2. Input arrives via `begin_stroke` / `stroke_to` / `end_stroke`
///    or [`DrawingBoard::handle_input`]
/// 3. Each sampled segment is rasterized with the current [`BrushSettings`]
/// 4. `export` encodes the surface as a data URL
pub struct DrawingBoard<S: ScatterSource = HashScatter> {
    /// None until mounted
    pub(crate) surface: Option<CpuSurface>,
    pub(crate) engine: BrushEngine<S>,
    pub(crate) tracker: PointerTracker,
    pub(crate) settings: BrushSettings,
    pub(crate) display: DisplayConfig,
}

impl DrawingBoard {
    /// Create an unmounted board with the default scatter generator
    pub fn new(display: DisplayConfig) -> Self {
        Self::with_scatter(display, HashScatter::default())
    }
}

impl<S: ScatterSource> DrawingBoard<S> {
    /// Create an unmounted board drawing spray offsets from `scatter`
    pub fn with_scatter(display: DisplayConfig, scatter: S) -> Self {
        Self {
            surface: None,
            engine: BrushEngine::new(scatter),
            tracker: PointerTracker::new(),
            settings: BrushSettings::default(),
            display,
        }
    }

    /// Start from configured brush defaults.
    ///
    /// Invalid values in `defaults` keep the built-in settings.
    pub fn with_brush_defaults(mut self, defaults: &BrushDefaults) -> Self {
        if let Ok(color) = defaults.color.parse::<Color>() {
            self.settings.color = color;
        } else {
            debug!("Ignoring invalid default color {:?}", defaults.color);
        }
        self.set_size(defaults.size);
        self.set_opacity(defaults.opacity);
        self
    }

    /// Current brush settings (a copy)
    pub fn settings(&self) -> BrushSettings {
        self.settings
    }

    /// Current display configuration
    pub fn display(&self) -> DisplayConfig {
        self.display
    }
}
