/// Spacing between interpolated brush dabs, as a divisor of brush size.
pub const DAB_SPACING_DIVISOR: f32 = 4.0;

/// Candidate dots scattered per spray sample.
pub const SPRAY_DENSITY: usize = 20;

/// Radius of a single spray dot, in CSS pixels.
pub const SPRAY_DOT_RADIUS: f32 = 1.0;

/// JPEG export quality (0.9 on a 0..1 scale).
pub const JPEG_QUALITY: u8 = 90;

/// Prefix of generated export filenames.
pub const FILENAME_PREFIX: &str = "drawing";

/// Opaque white, the color of a freshly initialized surface.
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
