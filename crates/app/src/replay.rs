//! Headless replay of UI message scripts

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use drawboard_ipc::{BoardToUi, UiToBoard};
use painting::{DownloadSink, DrawingBoard, ScatterSource};
use tracing::{info, warn};

use crate::config::Clock;
use crate::sink::FileDownload;

/// What a replay run produced
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReplaySummary {
    pub messages: usize,
    pub exports: Vec<PathBuf>,
    /// Error replies the board sent back
    pub errors: Vec<String>,
}

/// Parse a script: a JSON array of UI messages
pub fn parse_script(json: &str) -> Result<Vec<UiToBoard>> {
    serde_json::from_str(json).context("script must be a JSON array of UI messages")
}

pub fn load_script(path: &Path) -> Result<Vec<UiToBoard>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    parse_script(&json).with_context(|| format!("parsing script {}", path.display()))
}

/// Feed `messages` to `board` in order.
///
/// Export replies are written through `sink`; a failed write aborts the run.
pub fn replay<S: ScatterSource>(
    board: &mut DrawingBoard<S>,
    messages: &[UiToBoard],
    clock: &mut Clock,
    sink: &mut FileDownload,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, msg) in messages.iter().enumerate() {
        let timestamp_ms = match msg {
            UiToBoard::Export(_) => clock.now(),
            _ => 0,
        };

        match board.handle_message(msg, timestamp_ms) {
            Some(BoardToUi::SurfaceReady { width, height }) => {
                info!("Surface ready at {}x{}", width, height);
            }
            Some(BoardToUi::ExportReady {
                filename, data_url, ..
            }) => {
                sink.deliver(&filename, &data_url)
                    .with_context(|| format!("delivering export from message {}", index))?;
            }
            Some(BoardToUi::Error { code, message }) => {
                warn!("Message {} failed ({}): {}", index, code, message);
                summary.errors.push(message);
            }
            None => {}
        }
        summary.messages += 1;
    }

    summary.exports = sink.written().to_vec();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use drawboard_config::DisplayConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    const SCRIPT: &str = r##"[
        {"type":"BrushCommand","data":{"SetKind":{"kind":"brush"}}},
        {"type":"BrushCommand","data":{"SetColor":{"hex":"#ff0000"}}},
        {"type":"Input","data":{"kind":"PointerDown","sample":{"client_x":10.0,"client_y":10.0,"rect_left":0.0,"rect_top":0.0}}},
        {"type":"Input","data":{"kind":"PointerMove","sample":{"client_x":30.0,"client_y":10.0,"rect_left":0.0,"rect_top":0.0}}},
        {"type":"Input","data":{"kind":"PointerUp"}},
        {"type":"Export","data":{"format":"png"}},
        {"type":"Export","data":{"format":"jpeg"}}
    ]"##;

    #[test]
    fn test_parse_script() {
        let messages = parse_script(SCRIPT).unwrap();
        assert_eq!(messages.len(), 7);
        assert!(matches!(messages[5], UiToBoard::Export(_)));
    }

    #[test]
    fn test_parse_rejects_single_object() {
        assert!(parse_script(r#"{"type":"Export","data":{"format":"png"}}"#).is_err());
    }

    #[test]
    fn test_replay_writes_exports() {
        let dir = std::env::temp_dir().join(format!("drawboard-replay-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let mut board = DrawingBoard::new(DisplayConfig::new(40, 20));
        board.mount();
        let mut clock = Clock::Fixed(1_709_647_629_042);
        let mut sink = FileDownload::new(&dir);

        let messages = parse_script(SCRIPT).unwrap();
        let summary = replay(&mut board, &messages, &mut clock, &mut sink).unwrap();

        assert_eq!(summary.messages, 7);
        assert!(summary.errors.is_empty());
        assert_eq!(
            summary.exports,
            vec![
                dir.join("drawing-2024-03-05T14-07-09-042Z.png"),
                dir.join("drawing-2024-03-05T14-07-09-043Z.jpeg"),
            ]
        );
        assert_eq!(
            board.surface().unwrap().get_pixel(20, 10),
            Some([1.0, 0.0, 0.0, 1.0])
        );

        let png = fs::read(&summary.exports[0]).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
        let jpeg = fs::read(&summary.exports[1]).unwrap();
        assert!(jpeg.starts_with(&[0xFF, 0xD8]));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_replay_unmounted_board_exports_nothing() {
        let dir = std::env::temp_dir().join(format!("drawboard-unmounted-{}", std::process::id()));
        let mut board = DrawingBoard::new(DisplayConfig::new(10, 10));
        let mut clock = Clock::Fixed(0);
        let mut sink = FileDownload::new(&dir);

        let messages = parse_script(SCRIPT).unwrap();
        let summary = replay(&mut board, &messages, &mut clock, &mut sink).unwrap();

        assert_eq!(summary.messages, 7);
        assert!(summary.exports.is_empty());
        assert!(!dir.exists());
    }
}
