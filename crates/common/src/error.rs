//! Error types shared across Cueline crates.

/// Top-level error type for Cueline operations.
#[derive(Debug, thiserror::Error)]
pub enum CuelineError {
    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Audio error: {message}")]
    Audio { message: String },

    #[error("Playback error: {message}")]
    Playback { message: String },

    #[error("Timeline error: {message}")]
    Timeline { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CuelineError.
pub type CuelineResult<T> = Result<T, CuelineError>;

impl CuelineError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio {
            message: msg.into(),
        }
    }

    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback {
            message: msg.into(),
        }
    }

    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
