//! PNG QR codes for short URLs.

use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;
use thiserror::Error;

/// Minimum edge length, in pixels, of rendered codes.
pub const DEFAULT_QR_SIZE: u32 = 256;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("content does not fit in a QR code: {0}")]
    Encode(String),
    #[error("failed to write QR code as PNG: {0}")]
    Png(#[from] image::ImageError),
}

/// Renders `content` as a PNG image at least `size` pixels wide, using
/// medium error correction.
pub fn render_png(content: &str, size: u32) -> Result<Vec<u8>, QrError> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M)
        .map_err(|e| QrError::Encode(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(size, size)
        .build();

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}
