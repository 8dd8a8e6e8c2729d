//! PNG decoding one row at a time.
//!
//! Rows come out of the `png` reader already unfiltered and normalized to
//! 8-bit samples and are folded straight into a [`BoxReducer`]. Adam7
//! interlaced files deliver their rows out of order, so those are read as a
//! whole frame in their native format first.

use std::io::{BufRead, Seek};

use image::{
    DynamicImage, GrayAlphaImage, GrayImage, ImageError, ImageFormat, ImageResult, RgbImage,
    RgbaImage,
};
use png::{ColorType, Decoder, DecodingError, Limits, Transformations};

use super::codec::{check_alloc, check_dimensions, decoding_error, limit_error, target_size};
use super::reduce::BoxReducer;
use super::{DecodeOptions, DecodedImage};

/// Decode a PNG, box-averaging `rate x rate` blocks as rows arrive.
pub(crate) fn decode_rows<R: BufRead + Seek>(
    reader: R,
    rate: u32,
    options: &DecodeOptions,
) -> ImageResult<DecodedImage> {
    let limits = Limits {
        bytes: options
            .max_alloc_bytes
            .map_or(usize::MAX, |max| usize::try_from(max).unwrap_or(usize::MAX)),
    };
    let mut decoder = Decoder::new_with_limits(reader, limits);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(png_error)?;

    let (width, height) = reader.info().size();
    check_dimensions(options, width, height)?;
    let (color_type, _) = reader.output_color_type();
    let channels = color_type.samples();

    let (target_width, target_height) = target_size(width, height, rate);
    let mut reducer = BoxReducer::new(width, channels, rate, target_width, target_height);

    if reader.info().interlaced {
        let size = reader.output_buffer_size().ok_or_else(limit_error)?;
        check_alloc(options, size as u64)?;
        let mut frame = vec![0; size];
        let output = reader.next_frame(&mut frame).map_err(png_error)?;
        for row in frame.chunks_exact(output.line_size) {
            reducer.push_row(row);
        }
    } else {
        while let Some(row) = reader.next_row().map_err(png_error)? {
            reducer.push_row(row.data());
        }
    }

    let pixels = reducer.finish();
    let image = to_dynamic(color_type, target_width, target_height, pixels)
        .ok_or_else(|| decoding_error(ImageFormat::Png, "image data ended early"))?;
    Ok(DecodedImage::from_rgba_image(image.into_rgba8()))
}

fn to_dynamic(
    color_type: ColorType,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Option<DynamicImage> {
    match color_type {
        ColorType::Grayscale => {
            GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8)
        }
        ColorType::GrayscaleAlpha => {
            GrayAlphaImage::from_raw(width, height, pixels).map(DynamicImage::ImageLumaA8)
        }
        ColorType::Rgb => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
        ColorType::Rgba => {
            RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
        }
        // Palette images are expanded by `normalize_to_color8`.
        ColorType::Indexed => None,
    }
}

fn png_error(err: DecodingError) -> ImageError {
    match err {
        DecodingError::LimitsExceeded => limit_error(),
        err => decoding_error(ImageFormat::Png, err),
    }
}
