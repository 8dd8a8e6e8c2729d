//! Core types for bounded decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for bounded decoding operations.
///
/// Only caller mistakes are errors. A source that cannot be read or parsed is
/// reported as `Ok(None)` by the decoder instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A dimension, offset, length or source argument is out of range or missing.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Filter used to produce the sub-sampled image.
///
/// JPEG is always scaled inside the decoder first and the filter only covers
/// what is left. PNG is reduced while streaming with `Box`; the other filters
/// need the whole image in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor (fastest, aliases on fine detail).
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
    /// Lanczos3 interpolation (slowest, sharpest).
    Lanczos3,
    /// Area averaging over each `rate x rate` block, like a codec's own
    /// sub-sampling.
    #[default]
    Box,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    ///
    /// `Box` has no resize-filter counterpart and is handled by area
    /// averaging, so it returns `None`.
    pub fn to_image_filter(self) -> Option<image::imageops::FilterType> {
        match self {
            FilterType::Nearest => Some(image::imageops::FilterType::Nearest),
            FilterType::Bilinear => Some(image::imageops::FilterType::Triangle),
            FilterType::Lanczos3 => Some(image::imageops::FilterType::Lanczos3),
            FilterType::Box => None,
        }
    }
}

/// Default allocation ceiling for the pixel pass (matches `image::Limits`).
pub const DEFAULT_MAX_ALLOC_BYTES: u64 = 512 * 1024 * 1024;

fn default_max_alloc_bytes() -> Option<u64> {
    Some(DEFAULT_MAX_ALLOC_BYTES)
}

/// Options for the pixel pass.
///
/// Every field has a serde default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// How the sub-sampled image is produced.
    #[serde(default)]
    pub filter: FilterType,
    /// Reject images whose width or height exceeds this.
    #[serde(default)]
    pub max_image_dimension: Option<u32>,
    /// Upper bound on codec allocations while decoding pixels.
    #[serde(default = "default_max_alloc_bytes")]
    pub max_alloc_bytes: Option<u64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            filter: FilterType::default(),
            max_image_dimension: None,
            max_alloc_bytes: default_max_alloc_bytes(),
        }
    }
}

impl DecodeOptions {
    /// Build the `image` limits for formats decoded through `ImageReader`.
    pub fn limits(&self) -> image::Limits {
        let mut limits = image::Limits::no_limits();
        limits.max_image_width = self.max_image_dimension;
        limits.max_image_height = self.max_image_dimension;
        limits.max_alloc = self.max_alloc_bytes;
        limits
    }
}

/// True pixel dimensions of an encoded image, from a bounds-only parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: u32,
    pub height: u32,
}

impl ImageBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for ImageBounds {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// A decoded image with RGBA pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn bounds(&self) -> ImageBounds {
        ImageBounds::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            Some(image::imageops::FilterType::Nearest)
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            Some(image::imageops::FilterType::Triangle)
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            Some(image::imageops::FilterType::Lanczos3)
        ));
        assert!(FilterType::Box.to_image_filter().is_none());
    }

    #[test]
    fn test_decode_options_default() {
        let options = DecodeOptions::default();
        assert_eq!(options.filter, FilterType::Box);
        assert_eq!(options.max_image_dimension, None);
        assert_eq!(options.max_alloc_bytes, Some(DEFAULT_MAX_ALLOC_BYTES));
    }

    #[test]
    fn test_decode_options_limits() {
        let mut options = DecodeOptions::default();
        options.max_image_dimension = Some(4096);
        options.max_alloc_bytes = None;

        let limits = options.limits();
        assert_eq!(limits.max_image_width, Some(4096));
        assert_eq!(limits.max_image_height, Some(4096));
        assert_eq!(limits.max_alloc, None);
    }

    #[test]
    fn test_decode_options_from_partial_json() {
        let options: DecodeOptions = serde_json::from_str(r#"{"filter":"Lanczos3"}"#).unwrap();
        assert_eq!(options.filter, FilterType::Lanczos3);
        assert_eq!(options.max_alloc_bytes, Some(DEFAULT_MAX_ALLOC_BYTES));

        let options: DecodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DecodeOptions::default());
    }

    #[test]
    fn test_image_bounds_from_tuple() {
        let bounds = ImageBounds::from((640, 480));
        assert_eq!(bounds, ImageBounds::new(640, 480));
    }

    #[test]
    fn test_decoded_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 4];
        let img = DecodedImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.bounds(), ImageBounds::new(100, 50));
    }

    #[test]
    fn test_rgba_image_conversion() {
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        let img = DecodedImage::from_rgba_image(rgba);
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(&img.pixels[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidArgument("offset must be at least 0 (got -1)".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: offset must be at least 0 (got -1)"
        );
    }
}
