//! Bounded decoding WASM bindings.
//!
//! This module exposes the byte-buffer variant of the bounded decoder to
//! JavaScript, together with the sampling rate calculator and bounds probe.
//!
//! Invalid arguments throw a string error. A buffer that cannot be parsed
//! returns `undefined`, which callers must check for.
//!
//! # Example
//!
//! ```typescript
//! import { decode_bytes, probe_bounds } from '@subsample/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_bytes(bytes, 512, 512);
//! if (image === undefined) {
//!   console.warn('Not an image');
//! } else {
//!   const data = new ImageData(new Uint8ClampedArray(image.pixels()), image.width);
//! }
//! ```

use crate::types::{JsDecodedImage, JsImageBounds};
use subsample_core::checks::check_present;
use subsample_core::decode::{self, DecodeError, DecodeOptions, ImageSource};
use wasm_bindgen::prelude::*;

/// Calculate the power-of-two sampling rate for the given raw and desired sizes.
///
/// Throws if any argument is negative.
#[wasm_bindgen]
pub fn calculate_sampling_rate(
    raw_width: i32,
    raw_height: i32,
    des_width: i32,
    des_height: i32,
) -> Result<u32, JsValue> {
    decode::calculate_sampling_rate(raw_width, raw_height, des_width, des_height).map_err(to_js)
}

/// Read the dimensions of an encoded image without decoding its pixels.
///
/// Returns `undefined` if the header cannot be parsed.
#[wasm_bindgen]
pub fn probe_bounds(bytes: Option<Vec<u8>>) -> Result<Option<JsImageBounds>, JsValue> {
    probe_bounds_impl(bytes).map_err(to_js)
}

/// Decode a whole buffer so that both sides are at least the desired size.
///
/// # Arguments
///
/// * `bytes` - Encoded image bytes as a `Uint8Array`
/// * `des_width` - Minimum acceptable output width
/// * `des_height` - Minimum acceptable output height
///
/// # Example
///
/// ```typescript
/// const thumb = decode_bytes(bytes, 256, 256);
/// ```
#[wasm_bindgen]
pub fn decode_bytes(
    bytes: Option<Vec<u8>>,
    des_width: i32,
    des_height: i32,
) -> Result<Option<JsDecodedImage>, JsValue> {
    let data = check_present(bytes, "bytes").map_err(to_js)?;
    let length = data.len() as i64;
    decode_range_impl(&data, 0, length, des_width, des_height, &DecodeOptions::default())
        .map(report_absent)
        .map_err(to_js)
}

/// Decode the window `[offset, offset + length)` of a buffer.
///
/// Throws if the window lies outside the buffer.
#[wasm_bindgen]
pub fn decode_byte_range(
    bytes: Option<Vec<u8>>,
    offset: i32,
    length: i32,
    des_width: i32,
    des_height: i32,
) -> Result<Option<JsDecodedImage>, JsValue> {
    let data = check_present(bytes, "bytes").map_err(to_js)?;
    decode_range_impl(
        &data,
        i64::from(offset),
        i64::from(length),
        des_width,
        des_height,
        &DecodeOptions::default(),
    )
    .map(report_absent)
    .map_err(to_js)
}

/// Decode a whole buffer with explicit options.
///
/// `options` is a partial object such as `{ filter: "Lanczos3", max_image_dimension: 8192 }`;
/// missing fields, `null` and `undefined` fall back to defaults.
#[wasm_bindgen]
pub fn decode_bytes_with_options(
    bytes: Option<Vec<u8>>,
    des_width: i32,
    des_height: i32,
    options: JsValue,
) -> Result<Option<JsDecodedImage>, JsValue> {
    let data = check_present(bytes, "bytes").map_err(to_js)?;
    let options: DecodeOptions = if options.is_null() || options.is_undefined() {
        DecodeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid decode options: {}", e)))?
    };
    let length = data.len() as i64;
    decode_range_impl(&data, 0, length, des_width, des_height, &options)
        .map(report_absent)
        .map_err(to_js)
}

fn probe_bounds_impl(bytes: Option<Vec<u8>>) -> Result<Option<JsImageBounds>, DecodeError> {
    let data = check_present(bytes, "bytes")?;
    Ok(decode::probe_bounds(&ImageSource::bytes(&data))?.map(JsImageBounds::from))
}

fn decode_range_impl(
    data: &[u8],
    offset: i64,
    length: i64,
    des_width: i32,
    des_height: i32,
    options: &DecodeOptions,
) -> Result<Option<JsDecodedImage>, DecodeError> {
    let source = ImageSource::byte_range(data, offset, length);
    Ok(decode::decode_bounded_with(&source, des_width, des_height, options)?
        .map(JsDecodedImage::from_decoded))
}

fn report_absent(image: Option<JsDecodedImage>) -> Option<JsDecodedImage> {
    if image.is_none() {
        web_sys::console::warn_1(&JsValue::from_str("Image data could not be decoded"));
    }
    image
}

fn to_js(err: DecodeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
