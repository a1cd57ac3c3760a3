//! Main IPC message enums for communication between the board and its UI.

use serde::{Deserialize, Serialize};

use crate::commands::{BrushCommand, ExportFormat, ExportRequest};
use crate::input::InputEvent;

/// Messages from the UI shell to the drawing board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToBoard {
    /// Pointer or touch input over the surface
    Input(InputEvent),

    /// Brush configuration change
    BrushCommand(BrushCommand),

    /// Surface dimensions changed (CSS pixels + device pixel ratio)
    Resize {
        width: u32,
        height: u32,
        device_pixel_ratio: f32,
    },

    /// Export the current surface
    Export(ExportRequest),
}

/// Messages from the drawing board to the UI shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BoardToUi {
    /// Surface was (re)created and cleared
    SurfaceReady { width: u32, height: u32 },

    /// Export finished; `data_url` is ready for download under `filename`
    ExportReady {
        format: ExportFormat,
        filename: String,
        data_url: String,
    },

    /// Error notification
    Error { code: String, message: String },
}
