//! kbfit Core - size-targeted image encoding
//!
//! This crate resizes an uploaded image to exact pixel dimensions and fits
//! its JPEG encoding to a target file size, by lowering quality when the
//! encoding is too large or padding it when it is too small.
//!
//! # Module Structure
//!
//! - `decode` - Decoding uploads to RGB pixels and exact-dimension resizing
//! - `encode` - JPEG encoding at a given quality
//! - `target` - The size-targeting procedure and its configuration

pub mod decode;
pub mod encode;
pub mod target;

pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::EncodeError;
pub use target::{
    encode_to_target, fit_to_target, EncodingRequest, EncodingResult, FitConfig, FitError,
    FitOutcome, OriginalInfo, SizeFitter,
};
