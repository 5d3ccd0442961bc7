//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! The conversion pipeline itself is total over its input; errors only surface
//! while decoding a collection document or doing I/O around it.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input document is not valid JSON, or its root is not a collection.
    #[display("Collection Decode Error: {_0}")]
    Json(serde_json::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
