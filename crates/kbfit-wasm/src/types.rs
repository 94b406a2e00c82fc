//! WASM-compatible wrapper types for fit results.

use kbfit_core::{EncodingResult, FitOutcome, OriginalInfo};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Result of fitting an image to a target size, for JavaScript.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a new
/// `Uint8Array`; call it once and keep the array rather than calling it
/// repeatedly.
#[wasm_bindgen]
pub struct JsFitResult {
    bytes: Vec<u8>,
    outcome: FitOutcome,
    original: OriginalInfo,
    width: u32,
    height: u32,
}

/// Plain-object view of a result, without the bytes.
#[derive(Debug, Serialize)]
struct FitSummary<'a> {
    file_name: &'a str,
    byte_length: usize,
    width: u32,
    height: u32,
    outcome: &'a FitOutcome,
    original: &'a OriginalInfo,
}

#[wasm_bindgen]
impl JsFitResult {
    /// Encoded JPEG bytes (with padding, if any) as a `Uint8Array` copy.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Suggested download name: `padded.jpg`, `compressed.jpg` or `final.jpg`.
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.outcome.file_name().to_string()
    }

    /// Branch taken: `"padded"`, `"compressed"` or `"final"`.
    #[wasm_bindgen(getter)]
    pub fn outcome(&self) -> String {
        self.outcome.name().to_string()
    }

    /// JPEG quality used when the image was compressed, otherwise `undefined`.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<u8> {
        self.outcome.quality()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn original_width(&self) -> u32 {
        self.original.width
    }

    #[wasm_bindgen(getter)]
    pub fn original_height(&self) -> u32 {
        self.original.height
    }

    /// Size of the original re-encoded at baseline quality, in KB (2 decimals).
    #[wasm_bindgen(getter)]
    pub fn original_size_kb(&self) -> f64 {
        self.original.size_kb
    }

    /// The uploaded image's `{ width, height, size_kb }` as a plain object.
    pub fn original(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.original).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Everything except the bytes, as a plain JavaScript object.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.to_summary())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsFitResult {
    fn to_summary(&self) -> FitSummary<'_> {
        FitSummary {
            file_name: self.outcome.file_name(),
            byte_length: self.bytes.len(),
            width: self.width,
            height: self.height,
            outcome: &self.outcome,
            original: &self.original,
        }
    }
}

impl From<EncodingResult> for JsFitResult {
    fn from(result: EncodingResult) -> Self {
        Self {
            bytes: result.bytes,
            outcome: result.outcome,
            original: result.original,
            width: result.width,
            height: result.height,
        }
    }
}
