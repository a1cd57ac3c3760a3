//! Raster export: encode the surface, wrap it in a data URL, and hand it to
//! a download sink under a timestamped filename.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::info;

use crate::constants::{FILENAME_PREFIX, JPEG_QUALITY};
use crate::surface::CpuSurface;
use crate::types::ExportFormat;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("Failed to decode base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Download failed: {0}")]
    Download(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Destination for exported files.
///
/// The browser host synthesizes an anchor element and clicks it; the native
/// host writes the decoded bytes to disk.
pub trait DownloadSink {
    fn deliver(&mut self, filename: &str, data_url: &str) -> Result<(), ExportError>;
}

/// A finished export, ready to be delivered
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub filename: String,
    pub data_url: String,
}

impl ExportOutcome {
    /// Encode `surface` and name the file after `timestamp_ms` (Unix millis)
    pub fn capture(
        surface: &CpuSurface,
        format: ExportFormat,
        timestamp_ms: u64,
    ) -> Result<Self, ExportError> {
        let data_url = to_data_url(surface, format)?;
        let filename = generate_filename(format, timestamp_ms);
        let (width, height) = surface.physical_size();
        info!(
            "Exported {}x{} surface as {} ({} bytes of data URL)",
            width,
            height,
            filename,
            data_url.len()
        );
        Ok(Self {
            format,
            filename,
            data_url,
        })
    }

    pub fn deliver(&self, sink: &mut impl DownloadSink) -> Result<(), ExportError> {
        sink.deliver(&self.filename, &self.data_url)
    }
}

/// Encode the surface at physical resolution.
///
/// PNG is lossless RGBA; JPEG drops alpha and uses quality 90.
pub fn encode(surface: &CpuSurface, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let (width, height) = surface.physical_size();
    let rgba = surface.to_rgba8();
    let mut bytes = Vec::new();

    match format {
        ExportFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(
                &rgba,
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        ExportFormat::Jpeg => {
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
                &rgb,
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }

    Ok(bytes)
}

/// Encode the surface as a `data:<mime>;base64,...` URL
pub fn to_data_url(surface: &CpuSurface, format: ExportFormat) -> Result<String, ExportError> {
    let bytes = encode(surface, format)?;
    Ok(format!(
        "data:{};base64,{}",
        format.mime_type(),
        STANDARD.encode(bytes)
    ))
}

/// Split a base64 data URL into its MIME type and decoded payload
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), ExportError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| ExportError::InvalidDataUrl("missing data: scheme".to_string()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| ExportError::InvalidDataUrl("missing ;base64, marker".to_string()))?;
    Ok((mime.to_string(), STANDARD.decode(payload)?))
}

/// `drawing-<ISO 8601 timestamp with ':' and '.' replaced by '-'>.<ext>`,
/// e.g. `drawing-2024-03-05T14-07-09-042Z.png`
pub fn generate_filename(format: ExportFormat, timestamp_ms: u64) -> String {
    let timestamp = format_iso8601_millis(timestamp_ms).replace([':', '.'], "-");
    format!("{}-{}.{}", FILENAME_PREFIX, timestamp, format.extension())
}

/// [`generate_filename`] using the system clock.
///
/// Not available on `wasm32-unknown-unknown`, where the host supplies the
/// timestamp instead.
pub fn generate_filename_now(format: ExportFormat) -> String {
    generate_filename(format, unix_millis_now())
}

/// Milliseconds since the Unix epoch (0 if the clock is before it)
pub fn unix_millis_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Format Unix milliseconds as `YYYY-MM-DDTHH:mm:ss.SSSZ` (UTC)
pub fn format_iso8601_millis(timestamp_ms: u64) -> String {
    let millis = timestamp_ms % 1000;
    let secs = timestamp_ms / 1000;
    let days = (secs / 86_400) as i64;
    let secs_of_day = secs % 86_400;

    let (year, month, day) = civil_from_days(days);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        month,
        day,
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60,
        millis
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day)
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
