//! Request, result and error types for size targeting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Bytes per kilobyte. Every size comparison uses this same convention.
pub const BYTES_PER_KB: f64 = 1024.0;

/// Convert a byte count to kilobytes (bytes / 1024).
#[inline]
pub fn bytes_to_kb(len: usize) -> f64 {
    len as f64 / BYTES_PER_KB
}

/// Round a kilobyte value to 2 decimal places for display.
#[inline]
pub fn round_kb(kb: f64) -> f64 {
    (kb * 100.0).round() / 100.0
}

/// Errors produced by the size-targeting procedure.
#[derive(Debug, Error)]
pub enum FitError {
    /// No image bytes were supplied.
    #[error("No file uploaded")]
    NoFileProvided,

    /// The target size is zero, negative or not a number.
    #[error("Invalid target size: {0} KB (must be a positive number)")]
    InvalidTarget(f64),

    /// The target size is above the configured ceiling.
    #[error("Target size too large: {target_kb} KB requested, at most {max_kb} KB allowed")]
    TargetTooLarge { target_kb: f64, max_kb: f64 },

    /// The requested output has more pixels than the configured ceiling.
    #[error("Output too large: {width}x{height} requested, at most {max_pixels} pixels allowed")]
    DimensionsTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    /// The configuration cannot drive a search.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The source bytes are not a decodable image.
    #[error("Could not decode image: {0}")]
    Decode(#[source] DecodeError),

    /// The requested dimensions could not be produced.
    #[error("Could not resize image: {0}")]
    Resize(#[source] DecodeError),

    /// The JPEG encoder failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Even the lowest quality tried is larger than the target.
    #[error(
        "Couldn't compress to target size: {target_kb} KB requested, smallest encoding was {smallest_kb:.2} KB"
    )]
    CompressionUnattainable { target_kb: f64, smallest_kb: f64 },
}

/// One size-targeting request. Borrows the uploaded bytes.
#[derive(Debug, Clone, Copy)]
pub struct EncodingRequest<'a> {
    /// Raw bytes of the uploaded image, in any supported format.
    pub source: &'a [u8],
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Target output size in kilobytes (bytes / 1024).
    pub target_kb: f64,
}

impl<'a> EncodingRequest<'a> {
    pub fn new(source: &'a [u8], width: u32, height: u32, target_kb: f64) -> Self {
        Self {
            source,
            width,
            height,
            target_kb,
        }
    }
}

/// Dimensions and reference size of the uploaded image.
///
/// `size_kb` is the size of the *decoded* source re-encoded at the baseline
/// quality, not the upload size, rounded to 2 decimals. It is informational
/// and plays no part in the sizing decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginalInfo {
    pub width: u32,
    pub height: u32,
    pub size_kb: f64,
}

/// Which branch of the procedure produced the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FitOutcome {
    /// Baseline was well under the target; `padding` filler bytes were appended
    /// after the JPEG end-of-image marker.
    Padded { padding: usize },
    /// Baseline was over the target; re-encoded at `quality`.
    Compressed { quality: u8 },
    /// Baseline was within tolerance and returned unmodified.
    Final,
}

impl FitOutcome {
    /// Short name of the branch.
    pub fn name(&self) -> &'static str {
        match self {
            FitOutcome::Padded { .. } => "padded",
            FitOutcome::Compressed { .. } => "compressed",
            FitOutcome::Final => "final",
        }
    }

    /// Suggested download file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            FitOutcome::Padded { .. } => "padded.jpg",
            FitOutcome::Compressed { .. } => "compressed.jpg",
            FitOutcome::Final => "final.jpg",
        }
    }

    /// Quality of the returned encoding when it differs from the baseline.
    pub fn quality(&self) -> Option<u8> {
        match self {
            FitOutcome::Compressed { quality } => Some(*quality),
            _ => None,
        }
    }
}

/// Output of a successful size-targeting run.
#[derive(Debug, Clone)]
pub struct EncodingResult {
    /// Encoded JPEG bytes, possibly followed by padding.
    pub bytes: Vec<u8>,
    pub outcome: FitOutcome,
    pub original: OriginalInfo,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl EncodingResult {
    pub fn size_kb(&self) -> f64 {
        bytes_to_kb(self.bytes.len())
    }

    pub fn file_name(&self) -> &'static str {
        self.outcome.file_name()
    }
}
