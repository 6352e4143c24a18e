use std::fmt;

/// Sanitized EXIF metadata, ready to be stored as a JSON document.
pub type ExifData = serde_json::Map<String, serde_json::Value>;

/// MIME type of every compressed photo.
pub const COMPRESSED_MIME_TYPE: &str = "image/jpeg";

/// Output of compressing one uploaded photo. Consumed straight away by the
/// storage upload, never persisted as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct CompressionResult {
    pub buffer: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

impl fmt::Debug for CompressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionResult")
            .field("buffer", &format_args!("<{} bytes>", self.buffer.len()))
            .field("mime_type", &self.mime_type)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
