//! QR code encoder

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use image::{Rgb, RgbImage};
use qrcode::QrCode;

/// Largest rendered edge length in pixels.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Modules of light border on each side when the quiet zone is enabled.
const QUIET_ZONE_MODULES: u32 = 4;

/// QR code encoder producing colored RGB images
#[derive(Debug, Clone)]
pub struct QrEncoder {
    ecc_level: qrcode::EcLevel,
    dark: Rgb<u8>,
    light: Rgb<u8>,
    module_size: u32,
    quiet_zone: bool,
}

impl QrEncoder {
    /// Create an encoder with default render options (red on white, medium ECC)
    pub fn new() -> Self {
        Self::from_options(&RenderOptions::default())
    }

    /// Create an encoder from configured render options
    pub fn from_options(options: &RenderOptions) -> Self {
        Self {
            ecc_level: options.error_correction.to_ec_level(),
            dark: options.fill_color.to_rgb(),
            light: options.back_color.to_rgb(),
            module_size: options.module_size.max(1),
            quiet_zone: options.quiet_zone,
        }
    }

    /// Override the error correction level
    pub fn with_ecc_level(mut self, ecc_level: qrcode::EcLevel) -> Self {
        self.ecc_level = ecc_level;
        self
    }

    /// Encode a string into a QR code image
    pub fn encode(&self, data: &str) -> Result<RgbImage> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.ecc_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

        let side = self.rendered_side(code.width())?;
        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            side,
            "Encoded QR symbol"
        );

        let image = code
            .render::<Rgb<u8>>()
            .dark_color(self.dark)
            .light_color(self.light)
            .module_dimensions(self.module_size, self.module_size)
            .quiet_zone(self.quiet_zone)
            .build();

        Ok(image)
    }

    /// Pixel edge length of the image for a symbol `modules` wide, if it fits the budget.
    fn rendered_side(&self, modules: usize) -> Result<u32> {
        let border = if self.quiet_zone {
            2 * QUIET_ZONE_MODULES
        } else {
            0
        };
        u32::try_from(modules)
            .ok()
            .and_then(|m| m.checked_add(border))
            .and_then(|m| m.checked_mul(self.module_size))
            .filter(|side| *side <= MAX_IMAGE_SIDE)
            .ok_or_else(|| {
                Error::QrEncode(format!(
                    "{modules} modules at {} px each exceeds the {MAX_IMAGE_SIDE} px image limit",
                    self.module_size
                ))
            })
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
