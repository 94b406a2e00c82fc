//! Image decoding with optional EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, Limits};

use super::{DecodeError, DecodedImage, Orientation, MAX_ALLOC_BYTES, MAX_DIMENSION};

/// Decode an image from bytes into RGB pixels, as stored.
///
/// The format is detected from the content, not from any file name. Alpha
/// channels are dropped and palette/grayscale images are expanded to RGB.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if the data is corrupted or truncated.
/// Returns `DecodeError::OutOfMemory` if decoding would exceed the allocation
/// limit or the source is wider or taller than [`MAX_DIMENSION`].
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = read_dynamic(bytes)?;
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// Use this when the caller wants the image the way a viewer would display
/// it. Images without EXIF data decode exactly like [`decode_image`].
pub fn decode_image_oriented(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = apply_orientation(read_dynamic(bytes)?, orientation);
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let mut limits = Limits::default();
    limits.max_alloc = Some(MAX_ALLOC_BYTES);
    limits.max_image_width = Some(MAX_DIMENSION);
    limits.max_image_height = Some(MAX_DIMENSION);
    reader.limits(limits);

    Ok(reader.decode()?)
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Extract the EXIF orientation value from image bytes.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
