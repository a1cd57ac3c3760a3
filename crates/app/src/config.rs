//! Command-line arguments and resolved run configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use drawboard_config::{BrushDefaults, DisplayConfig};

/// Replay a drawing-board message script and write exports to disk
#[derive(Parser, Debug)]
#[command(name = "drawboard")]
#[command(about = "Replay drawing board UI messages headlessly")]
#[command(version)]
pub struct Args {
    /// JSON file holding an array of UI messages
    pub script: PathBuf,

    /// Directory exported images are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Surface width in CSS pixels (overrides DRAWBOARD_WIDTH)
    #[arg(long)]
    pub width: Option<u32>,

    /// Surface height in CSS pixels (overrides DRAWBOARD_HEIGHT)
    #[arg(long)]
    pub height: Option<u32>,

    /// Device pixel ratio (overrides DRAWBOARD_DPR)
    #[arg(long)]
    pub dpr: Option<f32>,

    /// Name exports from this Unix-millisecond timestamp instead of the
    /// system clock; each further export advances it by one
    #[arg(long)]
    pub timestamp_ms: Option<u64>,

    /// Initial brush diameter in CSS pixels
    #[arg(long)]
    pub size: Option<f32>,

    /// Initial brush color, `#RRGGBB`
    #[arg(long)]
    pub color: Option<String>,

    /// Initial brush opacity, 0.0-1.0
    #[arg(long)]
    pub opacity: Option<f32>,
}

/// Where export filenames get their timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    /// Starts at the given value and ticks once per export
    Fixed(u64),
}

impl Clock {
    pub fn now(&mut self) -> u64 {
        match self {
            Clock::System => painting::unix_millis_now(),
            Clock::Fixed(next) => {
                let current = *next;
                *next += 1;
                current
            }
        }
    }
}

/// Everything a replay run needs
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub script: PathBuf,
    pub out_dir: PathBuf,
    pub display: DisplayConfig,
    pub brush: BrushDefaults,
    pub clock: Clock,
}

impl AppConfig {
    /// Layer CLI overrides on top of the environment
    pub fn resolve(args: Args) -> Result<Self> {
        let env = DisplayConfig::from_env().context("reading display configuration")?;
        Ok(Self::from_parts(args, env))
    }

    fn from_parts(args: Args, env: DisplayConfig) -> Self {
        let mut display = DisplayConfig::new(
            args.width.unwrap_or(env.width),
            args.height.unwrap_or(env.height),
        )
        .with_device_pixel_ratio(env.device_pixel_ratio);
        if let Some(dpr) = args.dpr {
            display = display.with_device_pixel_ratio(dpr);
        }

        let defaults = BrushDefaults::default();
        let brush = BrushDefaults {
            size: args.size.unwrap_or(defaults.size),
            color: args.color.unwrap_or(defaults.color),
            opacity: args.opacity.unwrap_or(defaults.opacity),
        };

        Self {
            script: args.script,
            out_dir: args.out_dir,
            display,
            brush,
            clock: args.timestamp_ms.map_or(Clock::System, Clock::Fixed),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_overrides_environment() {
        let args = Args::parse_from([
            "drawboard",
            "strokes.json",
            "--width",
            "320",
            "--dpr",
            "2",
            "--timestamp-ms",
            "42",
        ]);
        let env = DisplayConfig::new(800, 600).with_device_pixel_ratio(1.5);

        let config = AppConfig::from_parts(args, env);

        assert_eq!(config.script, PathBuf::from("strokes.json"));
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert_eq!(config.display.width, 320);
        assert_eq!(config.display.height, 600);
        assert_eq!(config.display.device_pixel_ratio, 2.0);
        assert_eq!(config.clock, Clock::Fixed(42));
    }

    #[test]
    fn test_environment_used_without_overrides() {
        let args = Args::parse_from(["drawboard", "s.json", "-o", "out"]);
        let env = DisplayConfig::new(1024, 768).with_device_pixel_ratio(1.5);

        let config = AppConfig::from_parts(args, env);

        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.display, env);
        assert_eq!(config.clock, Clock::System);
        assert_eq!(config.brush.size, BrushDefaults::default().size);
        assert_eq!(config.brush.color, "#000000");
    }

    #[test]
    fn test_brush_flags_override_defaults() {
        let args = Args::parse_from([
            "drawboard",
            "s.json",
            "--size",
            "12",
            "--color",
            "#00ff00",
            "--opacity",
            "0.5",
        ]);

        let config = AppConfig::from_parts(args, DisplayConfig::new(100, 100));

        assert_eq!(config.brush.size, 12.0);
        assert_eq!(config.brush.color, "#00ff00");
        assert_eq!(config.brush.opacity, 0.5);
    }

    #[test]
    fn test_partial_brush_flags_keep_remaining_defaults() {
        let args = Args::parse_from(["drawboard", "s.json", "--opacity", "0.25"]);

        let config = AppConfig::from_parts(args, DisplayConfig::new(100, 100));

        assert_eq!(config.brush.size, 5.0);
        assert_eq!(config.brush.color, "#000000");
        assert_eq!(config.brush.opacity, 0.25);
    }

    #[test]
    fn test_fixed_clock_ticks_per_read() {
        let mut clock = Clock::Fixed(10);
        assert_eq!(clock.now(), 10);
        assert_eq!(clock.now(), 11);
    }
}
