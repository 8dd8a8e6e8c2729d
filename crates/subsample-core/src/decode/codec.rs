//! The two codec passes: a bounds-only probe and a sub-sampled decode.
//!
//! Both passes take a fresh reader so that file sources are read twice, once
//! for the header and once for the pixels, and nothing is held between them.
//!
//! The decode pass never widens a full-size image to RGBA. JPEG is scaled
//! inside the decoder and PNG is reduced row by row (see the `jpeg` and `png`
//! modules). PNG with an interpolating filter is decoded whole in its native
//! pixel format and reduced before widening.

use std::error::Error;
use std::io::{BufRead, Seek};

use image::error::{DecodingError, ImageFormatHint, LimitError, LimitErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, ImageResult};

use super::{jpeg, png};
use super::{DecodeOptions, DecodedImage, FilterType, ImageBounds};

/// Read only the image header and report its dimensions.
pub(crate) fn probe<R: BufRead + Seek>(reader: R) -> ImageResult<ImageBounds> {
    let reader = ImageReader::new(reader).with_guessed_format()?;
    reader.into_dimensions().map(ImageBounds::from)
}

/// Decode the image at `1 / rate` of its size on each axis.
pub(crate) fn decode_sampled<R: BufRead + Seek>(
    reader: R,
    rate: u32,
    options: &DecodeOptions,
) -> ImageResult<DecodedImage> {
    let reader = ImageReader::new(reader).with_guessed_format()?;
    match reader.format() {
        Some(ImageFormat::Jpeg) => jpeg::decode_scaled(reader.into_inner(), rate, options),
        Some(ImageFormat::Png) if options.filter == FilterType::Box => {
            png::decode_rows(reader.into_inner(), rate, options)
        }
        _ => decode_native(reader, rate, options),
    }
}

fn decode_native<R: BufRead + Seek>(
    mut reader: ImageReader<R>,
    rate: u32,
    options: &DecodeOptions,
) -> ImageResult<DecodedImage> {
    reader.limits(options.limits());
    let image = reader.decode()?;
    let (width, height) = target_size(image.width(), image.height(), rate);
    Ok(reduce_to(image, width, height, options.filter))
}

/// `floor(size / rate)` on each axis, never below one pixel.
pub(crate) fn target_size(width: u32, height: u32, rate: u32) -> (u32, u32) {
    let rate = rate.max(1);
    ((width / rate).max(1), (height / rate).max(1))
}

/// Resize `image` in its own pixel format, then widen the result to RGBA.
pub(crate) fn reduce_to(
    image: DynamicImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> DecodedImage {
    let image = if (image.width(), image.height()) == (width, height) {
        image
    } else {
        match filter.to_image_filter() {
            Some(filter) => image.resize_exact(width, height, filter),
            None => image.thumbnail_exact(width, height),
        }
    };
    DecodedImage::from_rgba_image(image.into_rgba8())
}

pub(crate) fn check_dimensions(
    options: &DecodeOptions,
    width: u32,
    height: u32,
) -> ImageResult<()> {
    match options.max_image_dimension {
        Some(max) if width > max || height > max => Err(ImageError::Limits(
            LimitError::from_kind(LimitErrorKind::DimensionError),
        )),
        _ => Ok(()),
    }
}

pub(crate) fn check_alloc(options: &DecodeOptions, bytes: u64) -> ImageResult<()> {
    match options.max_alloc_bytes {
        Some(max) if bytes > max => Err(limit_error()),
        _ => Ok(()),
    }
}

pub(crate) fn limit_error() -> ImageError {
    ImageError::Limits(LimitError::from_kind(LimitErrorKind::InsufficientMemory))
}

pub(crate) fn decoding_error(
    format: ImageFormat,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> ImageError {
    ImageError::Decoding(DecodingError::new(ImageFormatHint::Exact(format), err))
}
