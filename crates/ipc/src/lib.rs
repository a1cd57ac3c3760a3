//! IPC message protocol for the drawing board
//!
//! Defines all message types exchanged between the board (native or WASM)
//! and the UI shell. Messages travel as JSON.

mod commands;
mod error;
mod input;
mod messages;

pub use commands::*;
pub use error::IpcError;
pub use input::*;
pub use messages::*;

/// Decode a UI message from its JSON wire form.
pub fn decode_ui_message(json: &str) -> Result<UiToBoard, IpcError> {
    if json.trim().is_empty() {
        return Err(IpcError::InvalidFormat("empty message".to_string()));
    }
    Ok(serde_json::from_str(json)?)
}

/// Encode a board message to its JSON wire form.
pub fn encode_board_message(msg: &BoardToUi) -> Result<String, IpcError> {
    Ok(serde_json::to_string(msg)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_export_request() {
        let msg = decode_ui_message(r#"{"type":"Export","data":{"format":"jpeg"}}"#).unwrap();
        assert_eq!(
            msg,
            UiToBoard::Export(ExportRequest {
                format: ExportFormat::Jpeg
            })
        );
    }

    #[test]
    fn test_decode_pointer_down() {
        let json = r#"{"type":"Input","data":{"kind":"PointerDown","sample":{"client_x":120.0,"client_y":80.0,"rect_left":20.0,"rect_top":30.0}}}"#;
        let msg = decode_ui_message(json).unwrap();
        let UiToBoard::Input(event) = msg else {
            panic!("expected input event");
        };
        assert_eq!(event.primary_sample().unwrap().local(), [100.0, 50.0]);
    }

    #[test]
    fn test_decode_brush_kind_lowercase() {
        let json = r#"{"type":"BrushCommand","data":{"SetKind":{"kind":"spray"}}}"#;
        assert_eq!(
            decode_ui_message(json).unwrap(),
            UiToBoard::BrushCommand(BrushCommand::SetKind {
                kind: BrushKind::Spray
            })
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_ui_message(""),
            Err(IpcError::InvalidFormat(_))
        ));
        assert!(matches!(
            decode_ui_message("{not json"),
            Err(IpcError::Serialize(_))
        ));
    }

    #[test]
    fn test_encode_export_ready() {
        let json = encode_board_message(&BoardToUi::ExportReady {
            format: ExportFormat::Png,
            filename: "drawing.png".to_string(),
            data_url: "data:image/png;base64,".to_string(),
        })
        .unwrap();
        assert!(json.starts_with(r#"{"type":"ExportReady""#));
        assert!(json.contains(r#""format":"png""#));
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("png".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("JPG".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert!("gif".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Jpeg.extension(), "jpeg");
        assert_eq!(ExportFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_brush_kind_parsing() {
        for kind in BrushKind::ALL {
            assert_eq!(kind.as_str().parse::<BrushKind>().unwrap(), kind);
        }
        assert_eq!("Spray".parse::<BrushKind>().unwrap(), BrushKind::Spray);
        assert!(matches!(
            "marker".parse::<BrushKind>(),
            Err(IpcError::UnsupportedBrush(_))
        ));
    }

    #[test]
    fn test_touch_primary_sample_is_first_touch() {
        let event = InputEvent::TouchMove(vec![
            PointerSample::at(1.0, 2.0),
            PointerSample::at(9.0, 9.0),
        ]);
        assert!(event.is_touch());
        assert_eq!(event.primary_sample(), Some(PointerSample::at(1.0, 2.0)));
        assert_eq!(InputEvent::TouchStart(Vec::new()).primary_sample(), None);
        assert_eq!(InputEvent::PointerUp.primary_sample(), None);
    }
}
