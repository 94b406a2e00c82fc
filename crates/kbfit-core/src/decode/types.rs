//! Core types for image decoding and resizing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest side, in pixels, a JPEG frame can carry.
pub const MAX_DIMENSION: u32 = 65_535;

/// Upper bound on a single pixel buffer or decoder allocation (1 GiB).
pub const MAX_ALLOC_BYTES: u64 = 1024 * 1024 * 1024;

/// Error types for image decoding and resizing operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not in a recognized or supported image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Decoding would exceed the allocation limit.
    #[error("Image too large to decode: {0}")]
    OutOfMemory(String),

    /// Requested dimensions cannot be produced: a side is zero or over
    /// [`MAX_DIMENSION`], or the pixel buffer would exceed [`MAX_ALLOC_BYTES`].
    #[error(
        "Invalid dimensions: {width}x{height} (each side must be 1 to 65535 pixels, 1 GiB of pixels at most)"
    )]
    InvalidDimensions { width: u32, height: u32 },
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(_) => DecodeError::InvalidFormat,
            image::ImageError::Limits(e) => DecodeError::OutOfMemory(e.to_string()),
            e => DecodeError::CorruptedFile(e.to_string()),
        }
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Catmull-Rom bicubic interpolation.
    CatmullRom,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if applying this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Borrow the pixels as an image::RgbImage view for image crate operations.
    ///
    /// Returns `None` if the buffer does not match the dimensions.
    pub fn as_rgb_view(&self) -> Option<image::ImageBuffer<image::Rgb<u8>, &[u8]>> {
        image::ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice())
    }

    /// Dimensions as a `(width, height)` pair.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
