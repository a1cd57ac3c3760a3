//! Shared configuration for the drawing board
//!
//! This crate provides the single source of truth for surface dimensions,
//! device pixel ratio, and the brush defaults a fresh board starts with
//! (native and WASM hosts alike).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default surface width in CSS pixels
pub const DEFAULT_WIDTH: u32 = 800;

/// Default surface height in CSS pixels
pub const DEFAULT_HEIGHT: u32 = 600;

/// Default device pixel ratio (1.0 = no scaling)
pub const DEFAULT_DEVICE_PIXEL_RATIO: f32 = 1.0;

/// Smallest brush size offered by the UI
pub const MIN_BRUSH_SIZE: f32 = 1.0;

/// Largest brush size offered by the UI
pub const MAX_BRUSH_SIZE: f32 = 50.0;

pub const ENV_WIDTH: &str = "DRAWBOARD_WIDTH";
pub const ENV_HEIGHT: &str = "DRAWBOARD_HEIGHT";
pub const ENV_DPR: &str = "DRAWBOARD_DPR";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidDimension { var: &'static str, value: String },
    #[error("{var} must be a positive number, got {value:?}")]
    InvalidScale { var: &'static str, value: String },
}

/// Display configuration for the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Surface width in logical (CSS) pixels
    pub width: u32,
    /// Surface height in logical (CSS) pixels
    pub height: u32,
    /// Physical pixels per logical pixel
    pub device_pixel_ratio: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO,
        }
    }
}

impl DisplayConfig {
    /// Create a new display config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO,
        }
    }

    pub fn with_device_pixel_ratio(mut self, dpr: f32) -> Self {
        self.device_pixel_ratio = dpr;
        self
    }

    /// Read overrides from `DRAWBOARD_WIDTH`, `DRAWBOARD_HEIGHT` and `DRAWBOARD_DPR`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    /// Unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_WIDTH) {
            config.width = parse_dimension(ENV_WIDTH, &value)?;
        }
        if let Some(value) = lookup(ENV_HEIGHT) {
            config.height = parse_dimension(ENV_HEIGHT, &value)?;
        }
        if let Some(value) = lookup(ENV_DPR) {
            config.device_pixel_ratio = match value.trim().parse::<f32>() {
                Ok(dpr) if dpr.is_finite() && dpr > 0.0 => dpr,
                _ => return Err(ConfigError::InvalidScale { var: ENV_DPR, value }),
            };
        }

        Ok(config)
    }

    /// Get scaled width (for physical pixel calculations)
    pub fn scaled_width(&self) -> u32 {
        (self.width as f32 * self.device_pixel_ratio).ceil() as u32
    }

    /// Get scaled height (for physical pixel calculations)
    pub fn scaled_height(&self) -> u32 {
        (self.height as f32 * self.device_pixel_ratio).ceil() as u32
    }
}

fn parse_dimension(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidDimension {
            var,
            value: value.to_string(),
        }),
    }
}

/// Brush configuration a new board starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushDefaults {
    /// Diameter in CSS pixels
    pub size: f32,
    /// `#RRGGBB`
    pub color: String,
    /// 0.0-1.0
    pub opacity: f32,
}

impl Default for BrushDefaults {
    fn default() -> Self {
        Self {
            size: 5.0,
            color: "#000000".to_string(),
            opacity: 1.0,
        }
    }
}
