//! Encoded test images generated in memory.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

/// PNG with a gradient so sub-sampled output is not trivially uniform.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            128,
            255,
        ])
    });
    encode_png(DynamicImage::ImageRgba8(img))
}

pub(crate) fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([((x * 255) / width.max(1)) as u8, ((y * 255) / height.max(1)) as u8, 64])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

pub(crate) fn encode_png(img: DynamicImage) -> Vec<u8> {
    encode(img, ImageFormat::Png)
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .expect("test image should encode");
    bytes
}
