use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(#[source] image::ImageError),
}

impl ImageError {
    /// Whether the client can fix this by sending a different file.
    /// Encode failures are ours, not theirs.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ImageError::EncodeFailed(_))
    }
}
