//! Size targeting: fit a resized image's JPEG encoding to a byte budget.
//!
//! The procedure encodes the resized image once at a high baseline quality,
//! then picks one of three branches:
//!
//! - **Under** the target by more than the tolerance: the baseline is padded
//!   with filler bytes up to exactly `target_kb * 1024` bytes.
//! - **Over** the target: quality is stepped down until the encoding fits,
//!   or the search gives up with `CompressionUnattainable`.
//! - **Within** the tolerance band: the baseline is returned unmodified.
//!
//! Sizes are always kilobytes of 1024 bytes.
//!
//! # Examples
//!
//! ```ignore
//! use kbfit_core::target::encode_to_target;
//!
//! let upload = std::fs::read("photo.jpg").unwrap();
//! let result = encode_to_target(&upload, 150, 200, 50.0).unwrap();
//! std::fs::write(result.file_name(), &result.bytes).unwrap();
//! ```

mod config;
mod fit;
mod types;

pub use config::{FitConfig, DEFAULT_MAX_OUTPUT_PIXELS, DEFAULT_MAX_TARGET_KB};
pub use fit::{
    classify, compress_to, encode_to_target, fit_to_target, pad_to, target_len, Compressed,
    Decision, SizeFitter,
};
pub use types::{
    bytes_to_kb, round_kb, EncodingRequest, EncodingResult, FitError, FitOutcome, OriginalInfo,
    BYTES_PER_KB,
};
