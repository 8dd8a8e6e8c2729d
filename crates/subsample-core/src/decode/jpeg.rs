//! JPEG decoding with DCT scaling.
//!
//! `jpeg-decoder` can run a reduced inverse DCT that yields 1/2, 1/4 or 1/8 of
//! the image on each axis, so the full-resolution pixels are never produced.
//! Sampling rates beyond 8 finish with an area reduction of the scaled output.

use std::io::Read;

use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, ImageResult, RgbImage};
use jpeg_decoder::{Decoder, PixelFormat};

use super::codec::{check_alloc, check_dimensions, decoding_error, reduce_to, target_size};
use super::{DecodeOptions, DecodedImage};

/// Decode a JPEG at `1 / rate` of its size on each axis.
pub(crate) fn decode_scaled<R: Read>(
    reader: R,
    rate: u32,
    options: &DecodeOptions,
) -> ImageResult<DecodedImage> {
    let mut decoder = Decoder::new(reader);
    decoder.read_info().map_err(jpeg_error)?;
    let (width, height) = frame_size(&decoder)?;
    check_dimensions(options, width, height)?;

    let (target_width, target_height) = target_size(width, height, rate);
    if rate > 1 {
        let (scaled_width, scaled_height) = decoder
            .scale(clamp_u16(target_width), clamp_u16(target_height))
            .map_err(jpeg_error)?;
        // The decoder picks its scale from either axis; fall back to full size
        // if the other one came out short.
        if u32::from(scaled_width) < target_width || u32::from(scaled_height) < target_height {
            decoder.scale(u16::MAX, u16::MAX).map_err(jpeg_error)?;
        }
    }

    let (scaled_width, scaled_height) = frame_size(&decoder)?;
    let format = decoder
        .info()
        .map(|info| info.pixel_format)
        .ok_or_else(|| decoding_error(ImageFormat::Jpeg, "missing frame header"))?;
    let output_bytes =
        u64::from(scaled_width) * u64::from(scaled_height) * format.pixel_bytes() as u64;
    check_alloc(options, output_bytes)?;
    if let Some(max) = options.max_alloc_bytes {
        decoder.set_max_decoding_buffer_size(usize::try_from(max).unwrap_or(usize::MAX));
    }

    let pixels = decoder.decode().map_err(jpeg_error)?;
    let image = to_dynamic(format, scaled_width, scaled_height, pixels)
        .ok_or_else(|| decoding_error(ImageFormat::Jpeg, "pixel buffer too short"))?;

    Ok(reduce_to(image, target_width, target_height, options.filter))
}

fn frame_size<R: Read>(decoder: &Decoder<R>) -> ImageResult<(u32, u32)> {
    decoder
        .info()
        .map(|info| (u32::from(info.width), u32::from(info.height)))
        .ok_or_else(|| decoding_error(ImageFormat::Jpeg, "missing frame header"))
}

fn to_dynamic(
    format: PixelFormat,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Option<DynamicImage> {
    match format {
        PixelFormat::L8 => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
        PixelFormat::L16 => {
            let samples = pixels
                .chunks_exact(2)
                .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
                .collect();
            ImageBuffer::from_raw(width, height, samples).map(DynamicImage::ImageLuma16)
        }
        PixelFormat::RGB24 => {
            RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
        }
        PixelFormat::CMYK32 => {
            RgbImage::from_raw(width, height, cmyk_to_rgb(&pixels)).map(DynamicImage::ImageRgb8)
        }
    }
}

fn cmyk_to_rgb(cmyk: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(cmyk.len() / 4 * 3);
    for pixel in cmyk.chunks_exact(4) {
        let white = 255 - u32::from(pixel[3]);
        for &ink in &pixel[..3] {
            rgb.push(((255 - u32::from(ink)) * white / 255) as u8);
        }
    }
    rgb
}

fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn jpeg_error(err: jpeg_decoder::Error) -> image::ImageError {
    decoding_error(ImageFormat::Jpeg, err)
}
