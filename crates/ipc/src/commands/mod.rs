//! Command types for IPC messages.

mod brush;
mod export;

pub use brush::*;
pub use export::*;
