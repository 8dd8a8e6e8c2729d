//! Power-of-two sampling rate calculation.
//!
//! The rate is the largest power of two that can divide both raw dimensions
//! while keeping each result at or above the desired dimension. It never
//! divides a dimension below one pixel, which bounds the loop when a desired
//! dimension is zero.

use super::{DecodeError, ImageBounds};
use crate::checks::check_at_least;

/// Calculate the sampling rate for sub-sampling an image to at least the
/// desired dimensions.
///
/// The returned rate satisfies all of:
/// - it is a power of two;
/// - `raw_width / rate >= des_width` and `raw_height / rate >= des_height`
///   whenever the rate is greater than 1;
/// - doubling it would violate one of the above.
///
/// If no sub-sampling is possible, 1 is returned.
///
/// # Errors
///
/// Returns `DecodeError::InvalidArgument` if any argument is negative.
pub fn calculate_sampling_rate(
    raw_width: i32,
    raw_height: i32,
    des_width: i32,
    des_height: i32,
) -> Result<u32, DecodeError> {
    let raw_width = check_at_least(raw_width, 0, "raw_width")?;
    let raw_height = check_at_least(raw_height, 0, "raw_height")?;
    let des_width = check_at_least(des_width, 0, "des_width")?;
    let des_height = check_at_least(des_height, 0, "des_height")?;

    Ok(sampling_rate_for(
        ImageBounds::new(raw_width as u32, raw_height as u32),
        des_width as u32,
        des_height as u32,
    ))
}

/// Sampling rate for already-validated dimensions.
pub(crate) fn sampling_rate_for(raw: ImageBounds, des_width: u32, des_height: u32) -> u32 {
    let (mut width, mut height) = (raw.width, raw.height);
    let mut rate = 1u32;

    loop {
        let (half_width, half_height) = (width / 2, height / 2);
        let fits = half_width >= des_width && half_height >= des_height;
        if !fits || half_width == 0 || half_height == 0 {
            return rate;
        }
        width = half_width;
        height = half_height;
        rate *= 2;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
