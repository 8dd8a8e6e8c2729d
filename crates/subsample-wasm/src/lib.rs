//! Subsample WASM - WebAssembly bindings for subsample-core
//!
//! This crate exposes bounded decoding of in-memory image bytes to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for decoded images and bounds
//! - `decode` - Sampling rate, bounds probe and bounded decode bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_bytes } from '@subsample/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_bytes(bytes, 1024, 1024);
//! if (image !== undefined) {
//!   console.log(`Decoded ${image.width}x${image.height}`);
//! }
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod types;

// Re-export public types
pub use decode::{
    calculate_sampling_rate, decode_byte_range, decode_bytes, decode_bytes_with_options,
    probe_bounds,
};
pub use types::{JsDecodedImage, JsImageBounds};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
