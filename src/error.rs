//! Error types for the concierge toolkit

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Gemini API error: {0}")]
    GeminiError(String),

    #[error("Failed to generate recommendations. Please try again.")]
    RecommendationFailed,

    #[error("Project access required. Please select a valid paid project and try again.")]
    ProjectAccessRequired,

    #[error("Video generation error: {0}")]
    VideoError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::ConnectionError(err.to_string())
    }
}
