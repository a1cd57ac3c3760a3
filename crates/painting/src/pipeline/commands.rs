//! Brush configuration and UI message dispatch

use drawboard_ipc::{BoardToUi, BrushCommand, UiToBoard};
use tracing::{debug, warn};

use crate::scatter::ScatterSource;
use crate::types::BrushKind;
use crate::validation::{parse_hex_color, validate_size};

use super::DrawingBoard;

impl<S: ScatterSource> DrawingBoard<S> {
    pub fn set_kind(&mut self, kind: BrushKind) {
        self.settings.kind = kind;
    }

    /// Set the brush diameter. Non-positive sizes are ignored.
    pub fn set_size(&mut self, size: f32) {
        match validate_size(size) {
            Ok(size) => self.settings.size = size,
            Err(e) => debug!("set_size: {}", e),
        }
    }

    /// Set the brush color from `#RRGGBB` (case-insensitive).
    ///
    /// Invalid input is ignored and the last valid color retained. Returns
    /// whether the color was accepted.
    pub fn set_color(&mut self, hex: &str) -> bool {
        match parse_hex_color(hex) {
            Ok(color) => {
                self.settings.color = color;
                true
            }
            Err(e) => {
                debug!("set_color: {}", e);
                false
            }
        }
    }

    /// Set the brush opacity, clamped to 0.0-1.0
    pub fn set_opacity(&mut self, opacity: f32) {
        if opacity.is_nan() {
            debug!("set_opacity: ignoring NaN");
            return;
        }
        self.settings.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn apply_brush_command(&mut self, command: &BrushCommand) {
        match command {
            BrushCommand::SetKind { kind } => self.set_kind(*kind),
            BrushCommand::SetSize { size } => self.set_size(*size),
            BrushCommand::SetColor { hex } => {
                self.set_color(hex);
            }
            BrushCommand::SetOpacity { opacity } => self.set_opacity(*opacity),
        }
    }

    /// Apply one message from the UI shell.
    ///
    /// `timestamp_ms` (Unix millis) names export files; hosts pass their own
    /// clock so this works without `std::time` on the web. Returns the reply
    /// for the UI, if any.
    pub fn handle_message(&mut self, msg: &UiToBoard, timestamp_ms: u64) -> Option<BoardToUi> {
        match msg {
            UiToBoard::Input(event) => {
                self.handle_input(event);
                None
            }
            UiToBoard::BrushCommand(command) => {
                self.apply_brush_command(command);
                None
            }
            UiToBoard::Resize {
                width,
                height,
                device_pixel_ratio,
            } => {
                self.resize(*width, *height, *device_pixel_ratio);
                self.is_mounted().then_some(BoardToUi::SurfaceReady {
                    width: *width,
                    height: *height,
                })
            }
            UiToBoard::Export(request) => match self.export(request.format, timestamp_ms) {
                Ok(Some(outcome)) => Some(BoardToUi::ExportReady {
                    format: outcome.format,
                    filename: outcome.filename,
                    data_url: outcome.data_url,
                }),
                Ok(None) => None,
                Err(e) => {
                    warn!("Export failed: {}", e);
                    Some(BoardToUi::Error {
                        code: "export_failed".to_string(),
                        message: e.to_string(),
                    })
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use drawboard_config::DisplayConfig;
    use drawboard_ipc::{ExportFormat, ExportRequest, InputEvent, PointerSample};
    use pretty_assertions::assert_eq;

    use crate::types::Color;

    use super::*;

    #[test]
    fn test_color_validation_keeps_last_valid() {
        let mut board = DrawingBoard::new(DisplayConfig::default());

        assert!(board.set_color("#FF00FF"));
        assert_eq!(board.settings().color, Color::rgb(255, 0, 255));

        assert!(!board.set_color("#GGGGGG"));
        assert_eq!(board.settings().color, Color::rgb(255, 0, 255));
    }

    #[test]
    fn test_size_and_opacity_bounds() {
        let mut board = DrawingBoard::new(DisplayConfig::default());
        board.set_size(0.0);
        assert_eq!(board.settings().size, 5.0);
        board.set_size(25.0);
        assert_eq!(board.settings().size, 25.0);

        board.set_opacity(3.0);
        assert_eq!(board.settings().opacity, 1.0);
        board.set_opacity(-1.0);
        assert_eq!(board.settings().opacity, 0.0);
        board.set_opacity(f32::NAN);
        assert_eq!(board.settings().opacity, 0.0);
    }

    #[test]
    fn test_brush_commands() {
        let mut board = DrawingBoard::new(DisplayConfig::default());
        for command in [
            BrushCommand::SetKind { kind: BrushKind::Spray },
            BrushCommand::SetSize { size: 30.0 },
            BrushCommand::SetColor { hex: "#00ff00".to_string() },
            BrushCommand::SetColor { hex: "nope".to_string() },
            BrushCommand::SetOpacity { opacity: 0.25 },
        ] {
            board.handle_message(&UiToBoard::BrushCommand(command), 0);
        }

        let settings = board.settings();
        assert_eq!(settings.kind, BrushKind::Spray);
        assert_eq!(settings.size, 30.0);
        assert_eq!(settings.color, Color::rgb(0, 255, 0));
        assert_eq!(settings.opacity, 0.25);
    }

    #[test]
    fn test_export_message_without_surface_is_silent() {
        let mut board = DrawingBoard::new(DisplayConfig::default());
        let reply = board.handle_message(
            &UiToBoard::Export(ExportRequest {
                format: ExportFormat::Png,
            }),
            0,
        );
        assert_eq!(reply, None);
    }

    #[test]
    fn test_export_message_replies_with_data_url() {
        let mut board = DrawingBoard::new(DisplayConfig::new(8, 8));
        board.mount();

        let reply = board.handle_message(
            &UiToBoard::Export(ExportRequest {
                format: ExportFormat::Jpeg,
            }),
            1_709_647_629_042,
        );

        let Some(BoardToUi::ExportReady {
            format,
            filename,
            data_url,
        }) = reply
        else {
            panic!("expected ExportReady");
        };
        assert_eq!(format, ExportFormat::Jpeg);
        assert_eq!(filename, "drawing-2024-03-05T14-07-09-042Z.jpeg");
        assert!(data_url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_resize_message() {
        let mut board = DrawingBoard::new(DisplayConfig::new(800, 600));
        let resize = UiToBoard::Resize {
            width: 400,
            height: 300,
            device_pixel_ratio: 2.0,
        };

        // Unmounted: config only
        assert_eq!(board.handle_message(&resize, 0), None);
        assert_eq!(board.display().width, 400);

        board.mount();
        assert_eq!(board.surface().unwrap().physical_size(), (800, 600));
        assert_eq!(
            board.handle_message(&resize, 0),
            Some(BoardToUi::SurfaceReady {
                width: 400,
                height: 300
            })
        );
    }

    #[test]
    fn test_input_messages_drive_strokes() {
        let mut board = DrawingBoard::new(DisplayConfig::new(50, 50));
        board.mount();

        let down = UiToBoard::Input(InputEvent::PointerDown(PointerSample::new(
            30.0, 30.0, 10.0, 10.0,
        )));
        board.handle_message(&down, 0);
        assert!(board.is_stroking());

        board.handle_message(&UiToBoard::Input(InputEvent::PointerLeave), 0);
        assert!(!board.is_stroking());
    }
}
