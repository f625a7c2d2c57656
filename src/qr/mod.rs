//! QR code image generation
//!
//! Validates the URL, hands encoding to [`QrEncoder`] and writes the result
//! as a PNG. [`QrDecoder`] reads written images back for verification.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use crate::validate;
use image::ImageFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    /// URL that was encoded
    pub url: String,
    /// Path of the written PNG
    pub path: PathBuf,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Whether the written file was decoded and matched the URL
    pub verified: bool,
}

/// Validates URLs and writes them out as QR-code PNGs
#[derive(Debug, Clone, Default)]
pub struct QrGenerator {
    encoder: QrEncoder,
    verify: bool,
}

impl QrGenerator {
    /// Create a generator for the given render options
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            encoder: QrEncoder::from_options(options),
            verify: false,
        }
    }

    /// Decode each written file and check it against the URL
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Encode `url` and write it to `path`.
    ///
    /// Nothing is left on disk when the URL is invalid, encoding fails or the
    /// written file does not read back as `url`.
    pub fn generate(&self, url: &str, path: &Path) -> Result<Generated> {
        validate::parse_url(url)?;

        let image = self.encoder.encode(url)?;
        image.save_with_format(path, ImageFormat::Png)?;

        if self.verify {
            if let Err(err) = verify_written(url, path) {
                if let Err(rm) = std::fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), "Failed to remove unverified QR code: {rm}");
                }
                return Err(err);
            }
            tracing::debug!(path = %path.display(), "Verified written QR code");
        }
        tracing::info!("QR code saved to {}", path.display());

        Ok(Generated {
            url: url.to_string(),
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
            verified: self.verify,
        })
    }

    /// Like [`QrGenerator::generate`], but failures are logged and reported as `None`.
    pub fn try_generate(&self, url: &str, path: &Path) -> Option<Generated> {
        if !validate::is_valid_url(url) {
            return None;
        }
        match self.generate(url, path) {
            Ok(generated) => Some(generated),
            Err(err) => {
                tracing::error!("Failed to generate QR code for {url}: {err}");
                None
            }
        }
    }
}

fn verify_written(url: &str, path: &Path) -> Result<()> {
    let decoded = QrDecoder::new().decode_file(path)?;
    if decoded != url {
        return Err(Error::Verification {
            expected: url.to_string(),
            decoded,
        });
    }
    Ok(())
}

/// Validate `url` and write its QR code to `path` using `options`.
pub fn generate_qr_code(url: &str, path: &Path, options: &RenderOptions) -> Result<Generated> {
    QrGenerator::new(options).generate(url, path)
}

/// Non-failing form of [`generate_qr_code`]: errors are logged and yield `None`.
pub fn try_generate_qr_code(url: &str, path: &Path, options: &RenderOptions) -> Option<Generated> {
    QrGenerator::new(options).try_generate(url, path)
}
