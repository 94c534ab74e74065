//! Image size transforms applied before persisting an upload.
//!
//! The dimension math lives in plain functions so it can be checked without
//! touching pixels; the `image` crate does the decoding, resampling, and
//! encoding.

use std::io::Cursor;

use fileforge_common::paths::extension_of;
use fileforge_common::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::source::SourceFile;

/// Target size for [`downsize`]: the input scaled down to fit inside
/// `max_width` x `max_height`, aspect ratio preserved, never enlarged.
pub fn downsize_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );

    (
        scale_dimension(width, scale).min(max_width.max(1)),
        scale_dimension(height, scale).min(max_height.max(1)),
    )
}

/// Output size for [`fit`].
///
/// With `dont_upsize` the target box is shrunk, keeping its aspect ratio,
/// until it fits inside the source.
pub fn fit_dimensions(
    width: u32,
    height: u32,
    target_width: u32,
    target_height: u32,
    dont_upsize: bool,
) -> (u32, u32) {
    if !dont_upsize {
        return (target_width, target_height);
    }

    let scale = [
        1.0,
        f64::from(width) / f64::from(target_width),
        f64::from(height) / f64::from(target_height),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min);

    (
        scale_dimension(target_width, scale),
        scale_dimension(target_height, scale),
    )
}

fn scale_dimension(value: u32, scale: f64) -> u32 {
    // Rounded values stay within u32 since scale <= 1 on every call path.
    ((f64::from(value) * scale).round() as u32).max(1)
}

fn ensure_positive(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_input(format!(
            "Image dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// Decode an uploaded file into a pixel buffer.
pub fn decode(file: &SourceFile) -> Result<DynamicImage> {
    Ok(image::load_from_memory(file.bytes())?)
}

/// Shrink an image to fit within the given caps.
///
/// Images already within the caps are returned unchanged.
pub fn downsize(
    img: DynamicImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<DynamicImage> {
    ensure_positive(max_width, max_height)?;

    let (width, height) = downsize_dimensions(img.width(), img.height(), max_width, max_height);
    if (width, height) == (img.width(), img.height()) {
        return Ok(img);
    }

    tracing::debug!(
        from_width = img.width(),
        from_height = img.height(),
        width,
        height,
        "Downsizing image"
    );
    Ok(img.resize_exact(width, height, filter))
}

/// Scale and centre-crop an image to fill the target size.
pub fn fit(
    img: &DynamicImage,
    width: u32,
    height: u32,
    dont_upsize: bool,
    filter: FilterType,
) -> Result<DynamicImage> {
    ensure_positive(width, height)?;

    let (width, height) = fit_dimensions(img.width(), img.height(), width, height, dont_upsize);
    tracing::debug!(
        from_width = img.width(),
        from_height = img.height(),
        width,
        height,
        "Fitting image"
    );
    Ok(img.resize_to_fill(width, height, filter))
}

/// Encode an image for storage under `filename`.
///
/// The format follows the filename extension, then `fallback`, then PNG.
pub fn encode(
    img: &DynamicImage,
    filename: &str,
    fallback: Option<ImageFormat>,
    jpeg_quality: u8,
) -> Result<Vec<u8>> {
    let format = extension_of(filename)
        .and_then(ImageFormat::from_extension)
        .or(fallback)
        .unwrap_or(ImageFormat::Png);

    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, jpeg_quality))?;
        }
        format => img.write_to(&mut buf, format)?,
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbImage, Rgba, RgbaImage};

    fn sample(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
        }
        DynamicImage::ImageRgb8(img)
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        sample(width, height).write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_downsize_dimensions_within_caps() {
        assert_eq!(downsize_dimensions(100, 50, 200, 200), (100, 50));
        assert_eq!(downsize_dimensions(200, 200, 200, 200), (200, 200));
    }

    #[test]
    fn test_downsize_dimensions_landscape() {
        assert_eq!(downsize_dimensions(640, 480, 200, 200), (200, 150));
        assert_eq!(downsize_dimensions(1920, 1080, 1280, 1280), (1280, 720));
    }

    #[test]
    fn test_downsize_dimensions_portrait() {
        assert_eq!(downsize_dimensions(480, 640, 200, 200), (150, 200));
    }

    #[test]
    fn test_downsize_dimensions_single_axis_over() {
        // Only the height exceeds its cap.
        assert_eq!(downsize_dimensions(300, 1000, 400, 500), (150, 500));
    }

    #[test]
    fn test_downsize_dimensions_never_zero() {
        assert_eq!(downsize_dimensions(10_000, 1, 100, 100), (100, 1));
    }

    #[test]
    fn test_downsize_preserves_aspect_ratio() {
        for (w, h) in [(640, 480), (1000, 333), (333, 1000), (4032, 3024), (799, 601)] {
            let (nw, nh) = downsize_dimensions(w, h, 200, 150);
            assert!(nw <= 200 && nh <= 150, "{w}x{h} -> {nw}x{nh}");
            let original = f64::from(w) / f64::from(h);
            let resized = f64::from(nw) / f64::from(nh);
            // One pixel of rounding on the shorter side.
            let tolerance = original / f64::from(nh.min(nw));
            assert!((original - resized).abs() <= tolerance, "{w}x{h} -> {nw}x{nh}");
        }
    }

    #[test]
    fn test_fit_dimensions() {
        assert_eq!(fit_dimensions(640, 480, 640, 640, false), (640, 640));
        assert_eq!(fit_dimensions(10, 10, 640, 640, false), (640, 640));
        assert_eq!(fit_dimensions(640, 480, 640, 640, true), (480, 480));
        assert_eq!(fit_dimensions(100, 100, 640, 320, true), (100, 50));
        assert_eq!(fit_dimensions(2000, 2000, 640, 320, true), (640, 320));
    }

    #[test]
    fn test_downsize_image() {
        let img = downsize(sample(640, 480), 200, 200, FilterType::Triangle).unwrap();
        assert_eq!(img.dimensions(), (200, 150));
    }

    #[test]
    fn test_downsize_image_within_caps_unchanged() {
        let img = downsize(sample(64, 48), 200, 200, FilterType::Triangle).unwrap();
        assert_eq!(img.dimensions(), (64, 48));
    }

    #[test]
    fn test_downsize_rejects_zero_caps() {
        let result = downsize(sample(10, 10), 0, 10, FilterType::Triangle);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_fit_image() {
        let img = sample(640, 480);
        assert_eq!(
            fit(&img, 640, 640, false, FilterType::Triangle).unwrap().dimensions(),
            (640, 640)
        );
        assert_eq!(
            fit(&img, 640, 640, true, FilterType::Triangle).unwrap().dimensions(),
            (480, 480)
        );
        assert_eq!(
            fit(&img, 100, 50, true, FilterType::Triangle).unwrap().dimensions(),
            (100, 50)
        );
    }

    #[test]
    fn test_fit_rejects_zero_target() {
        let result = fit(&sample(10, 10), 10, 0, false, FilterType::Triangle);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_decode() {
        let file = SourceFile::new("a.png", png_bytes(12, 7));
        assert_eq!(decode(&file).unwrap().dimensions(), (12, 7));
    }

    #[test]
    fn test_decode_invalid() {
        let file = SourceFile::new("a.png", b"not an image".to_vec());
        assert!(matches!(decode(&file), Err(Error::Image(_))));
    }

    #[test]
    fn test_encode_format_from_extension() {
        let img = sample(8, 8);
        let png = encode(&img, "a.png", None, 90).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);

        let jpg = encode(&img, "a.JPG", None, 90).unwrap();
        assert_eq!(image::guess_format(&jpg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_encode_fallback_format() {
        let img = sample(8, 8);
        let out = encode(&img, "avatar", Some(ImageFormat::Jpeg), 90).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);

        let out = encode(&img, "avatar", None, 90).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 40])));
        let out = encode(&img, "a.jpeg", None, 80).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.dimensions(), (4, 4));
    }
}
