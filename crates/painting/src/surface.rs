//! CPU surface for painting
//!
//! Pixels are stored at physical resolution (logical size times the device
//! pixel ratio); drawing code works in logical CSS pixels and the surface
//! maps them through [`CpuSurface::scale`].

use drawboard_config::DisplayConfig;
use tracing::info;

use crate::constants::WHITE;

/// An RGBA CPU surface for painting
/// Stores pixels as [f32; 4], straight (non-premultiplied) alpha
pub struct CpuSurface {
    /// Physical surface dimensions
    width: u32,
    height: u32,
    /// Logical (CSS pixel) dimensions
    logical_width: u32,
    logical_height: u32,
    /// Physical pixels per logical pixel
    scale: f32,
    /// Pixel data in row-major order, each pixel is [r, g, b, a] as f32
    pixels: Vec<[f32; 4]>,
}

impl CpuSurface {
    /// Create a new surface of `width × height` logical pixels at the given
    /// device pixel ratio, filled with opaque white
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            logical_width: 0,
            logical_height: 0,
            scale: 1.0,
            pixels: Vec::new(),
        };
        surface.resize(width, height, device_pixel_ratio);
        surface
    }

    /// Reallocate the backing buffer and clear it to opaque white.
    ///
    /// Destructive: existing strokes are discarded.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        let scale = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };

        let display = DisplayConfig::new(width, height).with_device_pixel_ratio(scale);
        self.logical_width = width;
        self.logical_height = height;
        self.scale = scale;
        self.width = display.scaled_width();
        self.height = display.scaled_height();

        let pixel_count = (self.width as usize) * (self.height as usize);
        self.pixels.clear();
        self.pixels.resize(pixel_count, WHITE);

        info!(
            "Surface reset to {}x{} logical ({}x{} physical, dpr {})",
            width, height, self.width, self.height, scale
        );
    }

    /// Logical (CSS pixel) dimensions
    pub fn logical_size(&self) -> (u32, u32) {
        (self.logical_width, self.logical_height)
    }

    /// Physical dimensions of the pixel buffer
    pub fn physical_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Physical pixels per logical pixel
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    /// Get a pixel at the given physical coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Set a pixel at the given physical coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [f32; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[index] = color;
    }

    /// Blend a color onto an existing pixel using source-over compositing
    /// Formula: out = src * alpha + dst * (1 - alpha)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];

        let src_alpha = (color[3] * opacity).clamp(0.0, 1.0);
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Quantize to 8-bit RGBA, row-major, for encoders and canvas upload
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get direct access to pixel data
    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }
}
