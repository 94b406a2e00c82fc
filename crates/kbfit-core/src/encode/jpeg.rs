//! Baseline JPEG encoding using the `image` crate's encoder.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::DecodedImage;

/// Highest quality accepted by the encoder.
pub const MAX_QUALITY: u8 = 100;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// The output is a complete JFIF stream from SOI (`FF D8`) to EOI (`FF D9`).
/// Encoding is deterministic: the same pixels and quality always produce the
/// same bytes, which is what makes size measurements comparable across calls.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, MAX_QUALITY);

    // Compressed output is far smaller than the raw pixels; this only avoids
    // the first few reallocations.
    let mut buffer = Vec::with_capacity(expected / 8);
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Encode a decoded image to JPEG bytes.
pub fn encode_image(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&image.pixels, image.width, image.height, quality)
}
