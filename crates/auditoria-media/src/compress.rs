use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageReader};
use tracing::{error, info};

use auditoria_core::models::media::{COMPRESSED_MIME_TYPE, CompressionResult};

use crate::error::ImageProcessingError;

/// Longest side, in pixels, a stored photo may have.
pub const MAX_DIMENSION: u32 = 1920;

/// JPEG quality used for every stored photo.
pub const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSettings {
    pub max_dimension: u32,
    pub quality: u8,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            quality: JPEG_QUALITY,
        }
    }
}

/// Compress an uploaded photo with the default settings.
pub fn compress(buffer: &[u8], input_mime: &str) -> Result<CompressionResult, ImageProcessingError> {
    compress_with(buffer, input_mime, &CompressionSettings::default())
}

/// Downscale `buffer` so its longer side fits `settings.max_dimension` and
/// re-encode it as JPEG, whatever the input format was.
///
/// Smaller images keep their size. Errors are logged and returned; there is
/// no fallback to the original bytes.
pub fn compress_with(
    buffer: &[u8],
    input_mime: &str,
    settings: &CompressionSettings,
) -> Result<CompressionResult, ImageProcessingError> {
    match encode(buffer, input_mime, settings) {
        Ok(result) => {
            info!(
                output_width = result.width,
                output_height = result.height,
                input_bytes = buffer.len(),
                output_bytes = result.buffer.len(),
                "image compressed"
            );
            Ok(result)
        }
        Err(e) => {
            error!(input_mime, input_bytes = buffer.len(), error = %e, "image compression failed");
            Err(e)
        }
    }
}

fn encode(
    buffer: &[u8],
    input_mime: &str,
    settings: &CompressionSettings,
) -> Result<CompressionResult, ImageProcessingError> {
    let (width, height) = read_dimensions(buffer)?;
    info!(
        input_mime,
        input_width = width,
        input_height = height,
        input_bytes = buffer.len(),
        "compressing image"
    );

    let mut image =
        image::load_from_memory(buffer).map_err(|e| ImageProcessingError::Decode(e.to_string()))?;

    let (target_width, target_height) = fit_within(width, height, settings.max_dimension);
    if (target_width, target_height) != (width, height) {
        image = image.resize_exact(target_width, target_height, FilterType::Lanczos3);
    }

    let rgb = match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    };

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, settings.quality.clamp(1, 100))
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| ImageProcessingError::Encode(e.to_string()))?;

    Ok(CompressionResult {
        buffer: out,
        mime_type: COMPRESSED_MIME_TYPE.to_string(),
        width: rgb.width(),
        height: rgb.height(),
    })
}

/// Read width and height from the image header without decoding pixels.
pub fn read_dimensions(buffer: &[u8]) -> Result<(u32, u32), ImageProcessingError> {
    let (width, height) = ImageReader::new(Cursor::new(buffer))
        .with_guessed_format()
        .map_err(|e| ImageProcessingError::UnreadableDimensions(e.to_string()))?
        .into_dimensions()
        .map_err(|e| ImageProcessingError::UnreadableDimensions(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(ImageProcessingError::InvalidDimensions { width, height });
    }
    Ok((width, height))
}

/// Dimensions after shrinking so the longer side equals `max_dimension`.
/// Aspect ratio is kept to the nearest pixel; images already within bounds are
/// returned unchanged.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longer = width.max(height);
    if longer <= max_dimension || max_dimension == 0 {
        return (width, height);
    }

    let scale = f64::from(max_dimension) / f64::from(longer);
    let shrink = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max_dimension);

    if width >= height {
        (max_dimension, shrink(height))
    } else {
        (shrink(width), max_dimension)
    }
}
