//! Error types for the canvas engine

use thiserror::Error;

/// Result type alias for canvas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while drawing, loading or exporting a canvas
#[derive(Error, Debug)]
pub enum Error {
    /// A surface was read outside its bounds
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} surface")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Malformed input rejected before any pixel is touched
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A scene document could not be parsed or written
    #[error("Scene format error: {0}")]
    SceneFormat(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to encode an image
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    /// I/O failure while reading or writing files
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        Error::EncodeError(err.to_string())
    }
}
