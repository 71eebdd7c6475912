use thiserror::Error;

/// Top-level error type for the VoxNote pipeline.
#[derive(Debug, Error)]
pub enum VoxError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("generation failed for field '{field}': {message}")]
    Generation { field: String, message: String },

    #[error("missing credential: {0}")]
    Credential(String),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VoxError {
    pub fn generation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            field: field.into(),
            message: message.into(),
        }
    }
}
