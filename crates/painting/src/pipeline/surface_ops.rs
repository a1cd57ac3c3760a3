//! Surface operations for the drawing board

use drawboard_config::DisplayConfig;
use tracing::{debug, info};

use crate::export::{DownloadSink, ExportError, ExportOutcome};
use crate::scatter::ScatterSource;
use crate::surface::CpuSurface;
use crate::types::ExportFormat;

use super::DrawingBoard;

impl<S: ScatterSource> DrawingBoard<S> {
    /// Allocate the surface from the display configuration.
    ///
    /// Mounting an already-mounted board resets it to white.
    pub fn mount(&mut self) {
        let DisplayConfig {
            width,
            height,
            device_pixel_ratio,
        } = self.display;
        match self.surface.as_mut() {
            Some(surface) => surface.resize(width, height, device_pixel_ratio),
            None => self.surface = Some(CpuSurface::new(width, height, device_pixel_ratio)),
        }
    }

    /// Drop the surface; input and export become no-ops
    pub fn unmount(&mut self) {
        self.tracker.end();
        self.surface = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Change the surface dimensions.
    ///
    /// A mounted surface is reallocated and cleared to white; prior strokes
    /// are lost.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        self.display.width = width;
        self.display.height = height;
        self.display.device_pixel_ratio = device_pixel_ratio;

        match self.surface.as_mut() {
            Some(surface) => surface.resize(width, height, device_pixel_ratio),
            None => debug!("resize: no surface mounted, config updated only"),
        }
    }

    /// The surface, if mounted
    pub fn surface(&self) -> Option<&CpuSurface> {
        self.surface.as_ref()
    }

    /// Encode the surface for download, naming it after `timestamp_ms`.
    ///
    /// Returns Ok(None) when no surface is mounted.
    pub fn export(
        &self,
        format: ExportFormat,
        timestamp_ms: u64,
    ) -> Result<Option<ExportOutcome>, ExportError> {
        let Some(surface) = self.surface.as_ref() else {
            debug!("export: no surface mounted, ignoring");
            return Ok(None);
        };
        ExportOutcome::capture(surface, format, timestamp_ms).map(Some)
    }

    /// Export and hand the result straight to `sink`.
    ///
    /// Returns whether a download was initiated.
    pub fn export_to(
        &self,
        format: ExportFormat,
        timestamp_ms: u64,
        sink: &mut impl DownloadSink,
    ) -> Result<bool, ExportError> {
        match self.export(format, timestamp_ms)? {
            Some(outcome) => {
                outcome.deliver(sink)?;
                info!("Delivered {}", outcome.filename);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
