//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates `public` and `local` disks under a
//! temporary directory, plus helpers for generating image uploads in memory.

use std::io::Cursor;

use fileforge::config::ImageConfig;
use fileforge::{Disk, LocalDisk, SourceFile, Storage};
use image::{DynamicImage, ImageFormat, RgbImage};
use tempfile::TempDir;

/// Test harness wrapping a [`Storage`] backed by temporary directories.
pub struct TestHarness {
    pub storage: Storage,
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with `public` (default) and `local` disks.
    pub fn new() -> Self {
        Self::with_images(ImageConfig::default())
    }

    /// Create a new harness whose transforms use the given image settings.
    pub fn with_images(images: ImageConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = Storage::new("public")
            .with_disk(LocalDisk::new("public", dir.path().join("public")))
            .with_disk(LocalDisk::new("local", dir.path().join("local")))
            .with_images(images);

        Self { storage, dir }
    }

    /// The default disk.
    pub fn public(&self) -> &dyn Disk {
        self.storage.disk("public").expect("public disk registered")
    }

    /// A fake non-image upload of `size` bytes.
    pub fn document(&self, name: &str, size: usize) -> SourceFile {
        let bytes: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        SourceFile::new(name, bytes)
    }
}

/// Encode a gradient image of the given size.
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = image::Rgb([(x % 256) as u8, (y % 256) as u8, 90]);
    }
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, format)
        .expect("failed to encode test image");
    buf.into_inner()
}

/// A fake PNG upload.
pub fn png_upload(name: &str, width: u32, height: u32) -> SourceFile {
    SourceFile::new(name, image_bytes(width, height, ImageFormat::Png))
}

/// Decode a stored file and return its dimensions.
pub fn stored_dimensions(disk: &dyn Disk, path: &str) -> (u32, u32) {
    let bytes = disk.get(path).expect("stored file readable");
    let img = image::load_from_memory(&bytes).expect("stored file is an image");
    (img.width(), img.height())
}
