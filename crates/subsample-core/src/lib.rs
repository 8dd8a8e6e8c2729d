//! Subsample Core - memory-bounded image decoding
//!
//! This crate decodes images at the smallest power-of-two downscale that still
//! meets a caller's desired dimensions, so that large sources never have to be
//! kept at full resolution. Sources may be packaged resources, byte ranges or
//! files.

pub mod checks;
pub mod decode;

pub use decode::{
    calculate_sampling_rate, decode_bounded, decode_bounded_with, decode_byte_range, decode_bytes,
    decode_file, decode_resource, probe_bounds, DecodeError, DecodeOptions, DecodedImage,
    FilterType, ImageBounds, ImageSource, ResourceBundle, ResourceId, ResourceProvider,
};
