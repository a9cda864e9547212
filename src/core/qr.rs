//! QR encoder adapter
//!
//! Wraps the `qrcode` crate behind a small options struct and renders the
//! module matrix into an in-memory PNG via the `image` crate. On failure
//! the caller gets a typed error to log; the raw error never reaches the
//! end user.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};
use thiserror::Error;

/// QR encoding errors
#[derive(Debug, Error)]
pub enum QrEncodeError {
    /// The payload cannot be represented as a QR symbol
    #[error("QR encoding failed: {0}")]
    Encode(#[from] QrError),

    /// PNG serialization failed
    #[error("PNG serialization failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Foreground/background palette for the rendered image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// Black modules on white (default)
    #[default]
    BlackWhite,
    /// Blue modules on white
    BlueWhite,
}

impl ColorScheme {
    fn dark(self) -> Rgb<u8> {
        match self {
            ColorScheme::BlackWhite => Rgb([0, 0, 0]),
            ColorScheme::BlueWhite => Rgb([0, 0, 255]),
        }
    }

    fn light(self) -> Rgb<u8> {
        Rgb([255, 255, 255])
    }
}

/// QR encoder options
///
/// `min_version` is a size hint, not a hard requirement: payloads that do
/// not fit the hinted version are encoded with the smallest version that
/// fits, matching the behavior users expect from the bot (long links
/// still produce an image, just a denser one).
#[derive(Debug, Clone)]
pub struct QrEncoder {
    /// Minimum symbol version (1..=40)
    pub min_version: i16,
    /// Error-correction level
    pub ec_level: EcLevel,
    /// Pixel size of one module
    pub box_size: u32,
    /// Border (quiet zone) width in modules
    pub border: u32,
    /// Foreground/background colors
    pub scheme: ColorScheme,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self {
            min_version: 1,
            ec_level: EcLevel::L,
            box_size: 10,
            border: 4,
            scheme: ColorScheme::BlackWhite,
        }
    }
}

impl QrEncoder {
    /// Creates an encoder with default options and the given palette.
    pub fn with_scheme(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Encodes `data` into a PNG byte buffer.
    ///
    /// # Errors
    /// Returns `QrEncodeError` if the payload cannot be encoded at any
    /// version (e.g. too long) or the PNG writer fails.
    pub fn encode(&self, data: &str) -> Result<Vec<u8>, QrEncodeError> {
        let code = match QrCode::with_version(data, Version::Normal(self.min_version), self.ec_level) {
            Ok(code) => code,
            // Payload does not fit the hinted version; let the library
            // pick the smallest version that does.
            Err(QrError::DataTooLong) => QrCode::with_error_correction_level(data, self.ec_level)?,
            Err(e) => return Err(e.into()),
        };

        let image = self.render(&code);

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Renders the module matrix into an RGB image, scaled by `box_size`
    /// with a `border`-module quiet zone on every side.
    fn render(&self, code: &QrCode) -> RgbImage {
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let border_px = self.border * self.box_size;
        let side = modules * self.box_size + 2 * border_px;

        let dark = self.scheme.dark();
        let light = self.scheme.light();

        RgbImage::from_fn(side, side, |x, y| {
            if x < border_px || y < border_px {
                return light;
            }
            let mx = (x - border_px) / self.box_size;
            let my = (y - border_px) / self.box_size;
            if mx >= modules || my >= modules {
                return light;
            }
            match colors[(my * modules + mx) as usize] {
                qrcode::Color::Dark => dark,
                qrcode::Color::Light => light,
            }
        })
    }
}
