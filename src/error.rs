use thiserror::Error;

/// Failures of a single generation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("No images were generated. The prompt may have been blocked.")]
    EmptyResult,
    #[error("Failed to generate images: {0}")]
    TransportFailure(String),
    #[error("An unknown error occurred during image generation.")]
    UnknownFailure,
}

#[derive(Debug, Error)]
pub enum VibeWallError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error(transparent)]
    GenerationError(#[from] GenerationError),
    #[error("History error: {0}")]
    HistoryError(String),
    #[error("Archive error: {0}")]
    ArchiveError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for VibeWallError {
    fn from(e: serde_json::Error) -> Self {
        VibeWallError::SerializationError(e.to_string())
    }
}

impl From<zip::result::ZipError> for VibeWallError {
    fn from(e: zip::result::ZipError) -> Self {
        VibeWallError::ArchiveError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VibeWallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_messages_are_distinguishable() {
        let empty = GenerationError::EmptyResult.to_string();
        let transport = GenerationError::TransportFailure("quota exceeded".into()).to_string();

        assert!(empty.contains("may have been blocked"));
        assert_eq!(transport, "Failed to generate images: quota exceeded");
        assert_ne!(empty, GenerationError::UnknownFailure.to_string());
    }

    #[test]
    fn generation_error_passes_through_unchanged() {
        let err: VibeWallError = GenerationError::EmptyResult.into();
        assert_eq!(err.to_string(), GenerationError::EmptyResult.to_string());
    }
}
