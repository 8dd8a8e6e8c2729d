//! Peak heap usage of a bounded decode against a plain full-resolution decode.
//!
//! A counting global allocator tracks live bytes. Everything runs in one test
//! so no other test thread allocates while a measurement is taken.

use std::alloc::{GlobalAlloc, Layout, System};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use subsample_core::decode_bytes;

struct CountingAllocator;

static LIVE_BYTES: AtomicUsize = AtomicUsize::new(0);
static PEAK_BYTES: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn record_alloc(size: usize) {
    let live = LIVE_BYTES.fetch_add(size, Ordering::Relaxed) + size;
    PEAK_BYTES.fetch_max(live, Ordering::Relaxed);
}

fn record_dealloc(size: usize) {
    LIVE_BYTES.fetch_sub(size, Ordering::Relaxed);
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            if new_size > layout.size() {
                record_alloc(new_size - layout.size());
            } else {
                record_dealloc(layout.size() - new_size);
            }
        }
        new_ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record_dealloc(layout.size());
    }
}

/// Run `f` and return its result with the peak of live bytes above the
/// starting level.
fn peak_during<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let base = LIVE_BYTES.load(Ordering::Relaxed);
    PEAK_BYTES.store(base, Ordering::Relaxed);
    let result = f();
    let peak = PEAK_BYTES.load(Ordering::Relaxed).saturating_sub(base);
    (result, peak)
}

fn gradient(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y) % 256) as u8])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

fn assert_bounded_peak_below_full(bytes: &[u8], desired: i32, expected: (u32, u32)) {
    let (full, full_peak) = peak_during(|| {
        let img = image::load_from_memory(bytes).unwrap();
        (img.width(), img.height())
    });
    let (bounded, bounded_peak) = peak_during(|| {
        let img = decode_bytes(bytes, desired, desired).unwrap().unwrap();
        (img.width, img.height)
    });

    assert_eq!(bounded, expected);
    assert!(full.0 > bounded.0 && full.1 > bounded.1);
    assert!(
        bounded_peak < full_peak / 2,
        "bounded decode peaked at {} bytes, full decode at {} bytes",
        bounded_peak,
        full_peak
    );
}

#[test]
fn test_bounded_decode_peaks_below_full_decode() {
    let jpeg = gradient(2048, 2048, ImageFormat::Jpeg);
    assert_bounded_peak_below_full(&jpeg, 256, (256, 256));

    // Past the 1/8 the JPEG decoder can scale by itself.
    assert_bounded_peak_below_full(&jpeg, 100, (128, 128));

    let png = gradient(1024, 1024, ImageFormat::Png);
    assert_bounded_peak_below_full(&png, 200, (256, 256));
}
