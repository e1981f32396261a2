use thiserror::Error;

pub type Result<T> = std::result::Result<T, GiftboxError>;

#[derive(Error, Debug)]
pub enum GiftboxError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Box count {boxes} does not match prize pool size {prizes}")]
    CardinalityMismatch { boxes: usize, prizes: usize },

    #[error("Box not found: {0}")]
    BoxNotFound(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GiftboxError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
