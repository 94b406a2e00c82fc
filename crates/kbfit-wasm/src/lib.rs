//! kbfit WASM - WebAssembly bindings for kbfit
//!
//! Runs the same size-targeting procedure as the server, entirely in the
//! browser: no upload needed.
//!
//! # Module Structure
//!
//! - `fit` - Resize-and-fit entry points
//! - `types` - WASM-compatible wrapper for fit results
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_to_target } from '@kbfit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = encode_to_target(bytes, 150, 200, 50);
//! console.log(`${result.outcome}: ${result.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod fit;
mod types;

pub use fit::{default_options, encode_to_target, encode_to_target_with};
pub use types::JsFitResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_debug(&format!("kbfit wasm {} ready", version()));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Write a debug line to the browser console. No-op off wasm32.
pub(crate) fn console_debug(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Milliseconds from the JS clock, or 0 off wasm32.
pub(crate) fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0.0
    }
}
