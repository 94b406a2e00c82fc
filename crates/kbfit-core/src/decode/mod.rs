//! Image decoding and resizing.
//!
//! This module provides functionality for:
//! - Decoding uploaded images (JPEG, PNG, GIF, WebP, BMP, TIFF) to RGB pixels
//! - Optional EXIF orientation correction
//! - Resizing to exact dimensions
//!
//! All operations are synchronous and allocate fresh buffers; inputs are
//! never modified.
//!
//! # Examples
//!
//! ```ignore
//! use kbfit_core::decode::{decode_image, resize, FilterType};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let thumb = resize(&image, 150, 200, FilterType::Lanczos3).unwrap();
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, decode_image_oriented, get_orientation};
pub use resize::resize;
pub use types::{
    DecodeError, DecodedImage, FilterType, Orientation, MAX_ALLOC_BYTES, MAX_DIMENSION,
};
