//! Run photo processing off the async executor.
//!
//! Decoding, resizing and metadata parsing block for tens of milliseconds per
//! photo. Each call gets its own blocking task; uploads do not wait on each
//! other and nothing is retried.

use std::sync::Arc;

use auditoria_core::models::media::{CompressionResult, ExifData};

use crate::compress::{CompressionSettings, compress_with};
use crate::error::ImageProcessingError;
use crate::exif::extract;

pub async fn compress_blocking(
    buffer: Arc<[u8]>,
    input_mime: String,
    settings: CompressionSettings,
) -> Result<CompressionResult, ImageProcessingError> {
    tokio::task::spawn_blocking(move || compress_with(&buffer, &input_mime, &settings))
        .await
        .map_err(|e| ImageProcessingError::Worker(e.to_string()))?
}

pub async fn extract_blocking(buffer: Arc<[u8]>) -> Option<ExifData> {
    match tokio::task::spawn_blocking(move || extract(&buffer)).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "EXIF worker failed");
            None
        }
    }
}

/// Compress an upload and read its EXIF concurrently.
///
/// EXIF comes from the original bytes; the re-encoded JPEG carries none.
pub async fn process_upload(
    buffer: Arc<[u8]>,
    input_mime: String,
    settings: CompressionSettings,
) -> Result<(CompressionResult, Option<ExifData>), ImageProcessingError> {
    let (compressed, exif) = tokio::join!(
        compress_blocking(Arc::clone(&buffer), input_mime, settings),
        extract_blocking(buffer),
    );
    Ok((compressed?, exif))
}
