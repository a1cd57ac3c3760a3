//! Drawboard - headless drawing board
//!
//! Replays a script of UI messages (the same JSON the browser shell sends)
//! against a drawing board and writes every export to disk.

mod config;
mod replay;
mod sink;

use anyhow::Result;
use clap::Parser;
use painting::DrawingBoard;
use tracing::info;

use config::{AppConfig, Args};
use sink::FileDownload;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = AppConfig::resolve(Args::parse())?;

    info!(
        "Starting Drawboard at {}x{} (dpr {})",
        config.display.width, config.display.height, config.display.device_pixel_ratio
    );

    let messages = replay::load_script(&config.script)?;
    let mut board = DrawingBoard::new(config.display).with_brush_defaults(&config.brush);
    board.mount();

    let mut sink = FileDownload::new(&config.out_dir);
    let summary = replay::replay(&mut board, &messages, &mut config.clock, &mut sink)?;

    info!(
        "Replayed {} messages, {} exports to {}, {} errors",
        summary.messages,
        summary.exports.len(),
        sink.dir().display(),
        summary.errors.len()
    );
    for path in &summary.exports {
        println!("{}", path.display());
    }
    Ok(())
}
