//! Bounded decoding: decode at the smallest power-of-two downscale that still
//! meets the desired dimensions.
//!
//! Arguments are validated before any I/O. A source that cannot be read or
//! parsed yields `Ok(None)`; callers are expected to handle that case.

use std::path::Path;

use image::{ImageError, ImageResult};
use tracing::{debug, warn};

use super::codec::{decode_sampled, probe};
use super::sampling::sampling_rate_for;
use super::source::SourceInput;
use super::{DecodeError, DecodeOptions, DecodedImage, ImageBounds, ImageSource};
use super::{ResourceId, ResourceProvider};
use crate::checks::check_at_least;

/// Decode `source` so that both output dimensions are at least the desired
/// ones, using default [`DecodeOptions`].
///
/// If the image is smaller than desired on either axis it is decoded at full
/// size.
///
/// # Errors
///
/// Returns `DecodeError::InvalidArgument` if a desired dimension is negative or
/// the source descriptor is invalid (see [`ImageSource::validate`]).
pub fn decode_bounded(
    source: &ImageSource<'_>,
    des_width: i32,
    des_height: i32,
) -> Result<Option<DecodedImage>, DecodeError> {
    decode_bounded_with(source, des_width, des_height, &DecodeOptions::default())
}

/// Like [`decode_bounded`], with explicit options for the pixel pass.
pub fn decode_bounded_with(
    source: &ImageSource<'_>,
    des_width: i32,
    des_height: i32,
    options: &DecodeOptions,
) -> Result<Option<DecodedImage>, DecodeError> {
    let des_width = check_at_least(des_width, 0, "des_width")? as u32;
    let des_height = check_at_least(des_height, 0, "des_height")? as u32;
    source.validate()?;

    let input = match source.open() {
        Ok(input) => input,
        Err(e) => {
            warn!("Cannot open {}: {}", source, e);
            return Ok(None);
        }
    };

    let bounds = match read_bounds(&input) {
        Ok(bounds) => bounds,
        Err(e) => {
            warn!("Cannot read bounds of {}: {}", source, e);
            return Ok(None);
        }
    };

    let rate = sampling_rate_for(bounds, des_width, des_height);
    debug!(
        "Decoding {} ({}x{}) at 1/{} for at least {}x{}",
        source, bounds.width, bounds.height, rate, des_width, des_height
    );

    match input
        .reader()
        .map_err(ImageError::from)
        .and_then(|reader| decode_sampled(reader, rate, options))
    {
        Ok(image) => Ok(Some(image)),
        Err(e) => {
            warn!("Cannot decode {}: {}", source, e);
            Ok(None)
        }
    }
}

/// Report the raw dimensions of `source` without decoding its pixels.
///
/// Returns `Ok(None)` when the header cannot be read.
pub fn probe_bounds(source: &ImageSource<'_>) -> Result<Option<ImageBounds>, DecodeError> {
    source.validate()?;

    let bounds = source
        .open()
        .map_err(ImageError::from)
        .and_then(|input| read_bounds(&input));

    match bounds {
        Ok(bounds) => Ok(Some(bounds)),
        Err(e) => {
            warn!("Cannot read bounds of {}: {}", source, e);
            Ok(None)
        }
    }
}

fn read_bounds(input: &SourceInput<'_>) -> ImageResult<ImageBounds> {
    probe(input.reader()?)
}

/// Decode a packaged resource. See [`decode_bounded`].
pub fn decode_resource(
    resources: &dyn ResourceProvider,
    id: ResourceId,
    des_width: i32,
    des_height: i32,
) -> Result<Option<DecodedImage>, DecodeError> {
    decode_bounded(&ImageSource::resource(resources, id), des_width, des_height)
}

/// Decode the window `[offset, offset + length)` of `data`. See [`decode_bounded`].
pub fn decode_byte_range(
    data: &[u8],
    offset: i64,
    length: i64,
    des_width: i32,
    des_height: i32,
) -> Result<Option<DecodedImage>, DecodeError> {
    decode_bounded(
        &ImageSource::byte_range(data, offset, length),
        des_width,
        des_height,
    )
}

/// Decode all of `data`. See [`decode_bounded`].
pub fn decode_bytes(
    data: &[u8],
    des_width: i32,
    des_height: i32,
) -> Result<Option<DecodedImage>, DecodeError> {
    decode_bounded(&ImageSource::bytes(data), des_width, des_height)
}

/// Decode an image file. See [`decode_bounded`].
pub fn decode_file(
    path: &Path,
    des_width: i32,
    des_height: i32,
) -> Result<Option<DecodedImage>, DecodeError> {
    decode_bounded(&ImageSource::file(path), des_width, des_height)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
