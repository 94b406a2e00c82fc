//! JPEG encoding.
//!
//! Every output of the size-targeting procedure comes through here, so this is
//! also where sizes are measured: one encode per quality level tried.
//!
//! # Examples
//!
//! ```ignore
//! use kbfit_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 95).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError, MAX_QUALITY};
