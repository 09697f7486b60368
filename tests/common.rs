#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Deterministic byte stream so test images are identical on every run.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    pub fn next_byte(&mut self) -> u8 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u8
    }
}

/// A smooth gradient with per-pixel noise, roughly what a photo looks like
/// to a PNG encoder.
pub fn photo_like_image(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = Lcg::new(seed);
    RgbImage::from_fn(width, height, |x, y| {
        let base_r = (x * 255 / width.max(1)) as u8;
        let base_g = (y * 255 / height.max(1)) as u8;
        let base_b = ((x + y) * 127 / (width + height).max(1)) as u8;
        Rgb([
            base_r.wrapping_add(rng.next_byte() % 32),
            base_g.wrapping_add(rng.next_byte() % 32),
            base_b.wrapping_add(rng.next_byte() % 32),
        ])
    })
}

pub fn png_bytes(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(photo_like_image(width, height, seed))
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

pub fn write_test_png(path: &Path, width: u32, height: u32) -> PathBuf {
    fs::write(path, png_bytes(width, height, 7)).unwrap();
    path.to_path_buf()
}

pub fn write_corrupt_png(path: &Path) -> PathBuf {
    fs::write(path, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();
    path.to_path_buf()
}

/// `a.png`, `b.PNG` and `c.jpg`, plus a nested directory with another PNG.
pub fn create_mixed_directory(temp_dir: &Path) -> Vec<PathBuf> {
    let a = write_test_png(&temp_dir.join("a.png"), 16, 16);
    let b = write_test_png(&temp_dir.join("b.PNG"), 16, 16);
    fs::write(temp_dir.join("c.jpg"), b"not a png").unwrap();

    let nested = temp_dir.join("nested");
    fs::create_dir(&nested).unwrap();
    write_test_png(&nested.join("deep.png"), 8, 8);

    vec![a, b]
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}
