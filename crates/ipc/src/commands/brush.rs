//! Brush command types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::IpcError;

/// Rasterization algorithm used for a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    /// Straight line segments between consecutive samples
    #[default]
    Pencil,
    /// Interpolated circular dabs
    Brush,
    /// Random scatter of small dots
    Spray,
}

impl BrushKind {
    pub const ALL: [BrushKind; 3] = [Self::Pencil, Self::Brush, Self::Spray];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Brush => "brush",
            Self::Spray => "spray",
        }
    }
}

impl fmt::Display for BrushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrushKind {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| IpcError::UnsupportedBrush(s.to_string()))
    }
}

/// Commands that change the active brush configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BrushCommand {
    SetKind { kind: BrushKind },
    /// Brush diameter in CSS pixels
    SetSize { size: f32 },
    /// `#RRGGBB`, case-insensitive. Invalid strings are ignored by the board.
    SetColor { hex: String },
    /// 0.0-1.0
    SetOpacity { opacity: f32 },
}
