use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Bucket '{0}' has no observations to chart")]
    EmptyBucket(String),

    #[error("Canvas of {width}x{height} pixels cannot be drawn")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Failed to draw chart")]
    Drawing(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to encode chart as PNG")]
    Encode(#[from] image::ImageError),
}
