//! Memory-bounded image decoding.
//!
//! This module provides functionality for:
//! - Calculating a power-of-two sampling rate from raw and desired dimensions
//! - Reading image dimensions without decoding pixels (bounds probe)
//! - Decoding resources, byte ranges and files at the sampled size
//!
//! # Architecture
//!
//! Every decode is two passes over the same source. The first pass reads only
//! the header to learn the raw dimensions; the second decodes the pixels
//! already reduced by the sampling rate. JPEG is scaled inside the decoder and
//! PNG is averaged row by row, so the full-resolution image is never held in
//! memory. All three source shapes share one routine, parameterized by
//! [`ImageSource`].
//!
//! Calls are synchronous and hold no shared state, so they may run
//! concurrently from any number of threads.
//!
//! # Errors
//!
//! Bad arguments are a [`DecodeError::InvalidArgument`]. A source that cannot
//! be read or parsed is `Ok(None)`.
//!
//! # Examples
//!
//! ```ignore
//! use subsample_core::decode::decode_file;
//!
//! let path = std::path::Path::new("photo.jpg");
//! match decode_file(path, 512, 512)? {
//!     Some(image) => println!("Decoded {}x{} image", image.width, image.height),
//!     None => println!("Could not decode {}", path.display()),
//! }
//! ```

mod bounded;
mod codec;
mod jpeg;
mod png;
mod reduce;
mod resources;
mod sampling;
mod source;
#[cfg(test)]
mod test_images;
mod types;

pub use bounded::{
    decode_bounded, decode_bounded_with, decode_byte_range, decode_bytes, decode_file,
    decode_resource, probe_bounds,
};
pub use resources::{ResourceBundle, ResourceId, ResourceProvider};
pub use sampling::calculate_sampling_rate;
pub use source::ImageSource;
pub use types::{
    DecodeError, DecodeOptions, DecodedImage, FilterType, ImageBounds, DEFAULT_MAX_ALLOC_BYTES,
};
