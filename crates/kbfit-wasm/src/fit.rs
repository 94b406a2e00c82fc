//! Size-targeting WASM bindings.
//!
//! # Functions
//!
//! - [`encode_to_target`] - Resize and fit an image using the default settings
//! - [`encode_to_target_with`] - Same, with an options object overriding the defaults
//! - [`default_options`] - The default options as a plain object
//!
//! # Example
//!
//! ```typescript
//! import { encode_to_target } from '@kbfit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = encode_to_target(bytes, 150, 200, 50);
//! const blob = new Blob([result.bytes()], { type: 'image/jpeg' });
//! console.log(`${result.file_name}: ${result.byte_length} bytes`);
//! ```

use crate::console_debug;
use crate::types::JsFitResult;
use kbfit_core::{fit_to_target, EncodingRequest, FitConfig, FitError};
use wasm_bindgen::prelude::*;

/// Resize an image and fit its JPEG encoding to `target_kb` kilobytes.
///
/// # Arguments
///
/// * `bytes` - The uploaded image file as a `Uint8Array` (JPEG, PNG, GIF, WebP, BMP, TIFF)
/// * `width` - Output width in pixels
/// * `height` - Output height in pixels
/// * `target_kb` - Target size in KB (1 KB = 1024 bytes)
///
/// # Errors
///
/// Throws with a readable message if:
/// - `bytes` is empty
/// - `bytes` is not a decodable image
/// - `width` or `height` is zero, or `target_kb` is not positive
/// - the target or the output dimensions exceed the configured ceilings
/// - the target cannot be reached even at the lowest quality
///
/// # Example
///
/// ```typescript
/// try {
///   const result = encode_to_target(bytes, 150, 200, 5);
///   console.log(result.outcome, result.quality);
/// } catch (e) {
///   console.warn(`Could not fit: ${e}`);
/// }
/// ```
#[wasm_bindgen]
pub fn encode_to_target(
    bytes: &[u8],
    width: u32,
    height: u32,
    target_kb: f64,
) -> Result<JsFitResult, JsValue> {
    fit_with(bytes, width, height, target_kb, &FitConfig::default()).map_err(to_js_error)
}

/// Like [`encode_to_target`], with an options object.
///
/// `options` may be `undefined`/`null` or an object with any of the fields
/// `baseline_quality`, `quality_step`, `min_quality`, `tolerance_kb`,
/// `pad_byte`, `filter` (`"nearest"`, `"bilinear"`, `"catmullrom"`,
/// `"lanczos3"`), `apply_orientation`, `max_target_kb` and
/// `max_output_pixels`. Missing fields keep their defaults.
///
/// # Example
///
/// ```typescript
/// const result = encode_to_target_with(bytes, 800, 600, 120, {
///   quality_step: 10,
///   apply_orientation: true,
/// });
/// ```
#[wasm_bindgen]
pub fn encode_to_target_with(
    bytes: &[u8],
    width: u32,
    height: u32,
    target_kb: f64,
    options: JsValue,
) -> Result<JsFitResult, JsValue> {
    let config = if options.is_undefined() || options.is_null() {
        FitConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {e}")))?
    };
    fit_with(bytes, width, height, target_kb, &config).map_err(to_js_error)
}

/// The default options, as accepted by [`encode_to_target_with`].
#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&FitConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Target-independent core of the bindings, usable on any target.
pub(crate) fn fit_with(
    bytes: &[u8],
    width: u32,
    height: u32,
    target_kb: f64,
    config: &FitConfig,
) -> Result<JsFitResult, FitError> {
    let started = crate::now_ms();
    let result = fit_to_target(
        &EncodingRequest::new(bytes, width, height, target_kb),
        config,
    )?;
    console_debug(&format!(
        "kbfit: {} {}x{} -> {} bytes in {:.0}ms",
        result.outcome.name(),
        result.width,
        result.height,
        result.bytes.len(),
        crate::now_ms() - started
    ));
    Ok(JsFitResult::from(result))
}

fn to_js_error(err: FitError) -> JsValue {
    JsValue::from_str(&err.to_string())
}


/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([40, 80, 120]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[wasm_bindgen_test]
    fn test_encode_to_target_basic() {
        let result = encode_to_target(&png(20, 20), 10, 10, 8.0).unwrap();
        assert_eq!(result.byte_length(), 8 * 1024);
    }

    #[wasm_bindgen_test]
    fn test_encode_to_target_empty_bytes() {
        assert!(encode_to_target(&[], 10, 10, 8.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_to_target_with_undefined_options() {
        let result = encode_to_target_with(&png(20, 20), 10, 10, 8.0, JsValue::UNDEFINED).unwrap();
        assert_eq!(result.file_name(), "padded.jpg");
    }

    #[wasm_bindgen_test]
    fn test_options_round_trip_through_js() {
        let options = default_options().unwrap();
        let result = encode_to_target_with(&png(20, 20), 10, 10, 8.0, options).unwrap();
        assert_eq!(result.outcome(), "padded");
    }

    #[wasm_bindgen_test]
    fn test_invalid_options_rejected() {
        let result = encode_to_target_with(&png(20, 20), 10, 10, 8.0, JsValue::from_f64(3.0));
        assert!(result.is_err());
    }
}
