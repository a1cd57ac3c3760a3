//! Error types for IPC operations.

/// Errors that can occur during IPC operations.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to (de)serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown brush kind: {0}")]
    UnsupportedBrush(String),
}
