//! Error types for urlqr operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using urlqr's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for urlqr operations
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied string is not a URL we are willing to encode
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    /// Output directory could not be created
    #[error("Failed to create directory {path}: {source}")]
    Directory {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Written image did not decode back to the encoded URL
    #[error("Verification failed: expected {expected:?}, decoded {decoded:?}")]
    Verification {
        /// URL that was encoded
        expected: String,
        /// Payload read back from the image
        decoded: String,
    },

    /// Unrecognised color specification
    #[error("Unknown color '{0}', expected a color name or #rgb/#rrggbb")]
    Color(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
