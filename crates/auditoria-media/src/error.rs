use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageProcessingError {
    #[error("could not read image dimensions: {0}")]
    UnreadableDimensions(String),

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("image encode failed: {0}")]
    Encode(String),

    #[error("image worker failed: {0}")]
    Worker(String),
}
