//! Exact-dimension resizing.
//!
//! The target box is honored as given: aspect ratio is not preserved, so a
//! landscape source squeezed into a portrait box is distorted.

use super::{DecodeError, DecodedImage, FilterType, MAX_ALLOC_BYTES, MAX_DIMENSION};

/// Whether a `width` x `height` RGB buffer can be produced and JPEG-encoded.
fn dimensions_supported(width: u32, height: u32) -> bool {
    let bytes = u64::from(width) * u64::from(height) * 3;
    (1..=MAX_DIMENSION).contains(&width)
        && (1..=MAX_DIMENSION).contains(&height)
        && bytes <= MAX_ALLOC_BYTES
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero
/// or above [`MAX_DIMENSION`], or the output buffer would exceed
/// [`MAX_ALLOC_BYTES`].
/// Returns `DecodeError::CorruptedFile` if the source pixel buffer does not
/// match its dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if !dimensions_supported(width, height) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image.as_rgb_view().ok_or_else(|| {
        DecodeError::CorruptedFile("pixel buffer does not match dimensions".to_string())
    })?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}
