use thiserror::Error;

use crate::types::Color;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),
    #[error("Invalid brush size: {0}")]
    InvalidSize(f32),
}

/// Check a string against `^#[0-9A-F]{6}$`, case-insensitive
pub fn is_valid_hex_color(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

/// Parse a `#RRGGBB` color string
pub fn parse_hex_color(value: &str) -> Result<Color, ValidationError> {
    if !is_valid_hex_color(value) {
        return Err(ValidationError::InvalidColor(value.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&value[range], 16)
            .map_err(|_| ValidationError::InvalidColor(value.to_string()))
    };

    Ok(Color::rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

/// Validate a brush diameter. Sizes must be positive and finite.
pub fn validate_size(size: f32) -> Result<f32, ValidationError> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(ValidationError::InvalidSize(size))
    }
}
