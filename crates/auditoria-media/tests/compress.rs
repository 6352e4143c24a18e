use std::io::Cursor;

use auditoria_media::compress::{CompressionSettings, compress, compress_with, fit_within};
use auditoria_media::error::ImageProcessingError;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn solid_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 180, 160]));
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

#[test]
fn large_photo_is_scaled_to_max_dimension() {
    let result = compress(&solid_png(4000, 3000), "image/png").unwrap();
    assert_eq!((result.width, result.height), (1920, 1440));
    assert_eq!(result.mime_type, "image/jpeg");

    let decoded = image::load_from_memory(&result.buffer).unwrap();
    assert_eq!(decoded.dimensions(), (1920, 1440));
}

#[test]
fn portrait_photo_scales_on_height() {
    let result = compress(&solid_png(1000, 3000), "image/png").unwrap();
    assert_eq!((result.width, result.height), (640, 1920));
}

#[test]
fn small_photo_is_not_upscaled() {
    let result = compress(&solid_png(800, 600), "image/png").unwrap();
    assert_eq!((result.width, result.height), (800, 600));
    assert_eq!(image::guess_format(&result.buffer).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn transparent_png_becomes_jpeg() {
    let image = RgbaImage::from_pixel(32, 16, Rgba([10, 20, 30, 0]));
    let png = encode(DynamicImage::ImageRgba8(image), ImageFormat::Png);

    let result = compress(&png, "image/png").unwrap();
    assert_eq!(result.mime_type, "image/jpeg");
    assert_eq!((result.width, result.height), (32, 16));
    assert_eq!(image::guess_format(&result.buffer).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn jpeg_input_is_re_encoded() {
    let image = RgbImage::from_fn(64, 48, |x, y| Rgb([x as u8, y as u8, 90]));
    let jpeg = encode(DynamicImage::ImageRgb8(image), ImageFormat::Jpeg);

    let result = compress(&jpeg, "image/jpeg").unwrap();
    assert_eq!((result.width, result.height), (64, 48));
}

#[test]
fn custom_settings_bound_the_output() {
    let settings = CompressionSettings {
        max_dimension: 100,
        quality: 60,
    };
    let result = compress_with(&solid_png(400, 200), "image/png", &settings).unwrap();
    assert_eq!((result.width, result.height), (100, 50));
}

#[test]
fn garbage_input_fails_on_dimensions() {
    let err = compress(b"definitely not an image", "image/jpeg").unwrap_err();
    assert!(matches!(err, ImageProcessingError::UnreadableDimensions(_)));
}

#[test]
fn truncated_input_fails() {
    let image = RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 3) as u8, (y * 7) as u8, (x ^ y) as u8]));
    let mut png = encode(DynamicImage::ImageRgb8(image), ImageFormat::Png);
    png.truncate(60);

    let err = compress(&png, "image/png").unwrap_err();
    assert!(matches!(
        err,
        ImageProcessingError::Decode(_) | ImageProcessingError::UnreadableDimensions(_)
    ));
}

#[test]
fn fit_within_keeps_aspect_ratio() {
    assert_eq!(fit_within(4000, 3000, 1920), (1920, 1440));
    assert_eq!(fit_within(3000, 4000, 1920), (1440, 1920));
    assert_eq!(fit_within(1920, 1080, 1920), (1920, 1080));
    assert_eq!(fit_within(800, 600, 1920), (800, 600));
    assert_eq!(fit_within(5000, 5000, 1920), (1920, 1920));
}

#[test]
fn fit_within_never_collapses_a_side() {
    assert_eq!(fit_within(10000, 1, 1920), (1920, 1));
}
