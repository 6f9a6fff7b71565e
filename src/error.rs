//! Error types for the generator, store and clipboard layers.

use thiserror::Error;

/// Failures of a single idea generation.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Please enter a topic to generate ideas.")]
    Validation,

    #[error("A generation is already in progress.")]
    Busy,

    #[error("No API key configured. Set GEMINI_API_KEY or add api_key to the config file.")]
    MissingApiKey,

    #[error("The generation service returned HTTP {status}.")]
    RemoteService { status: u16 },

    /// `detail` is for logs only; the message stays generic.
    #[error("The generation service returned an unexpected response. Please try again.")]
    MalformedResponse { detail: String },

    #[error("Could not reach the generation service: {0}")]
    Transport(String),
}

impl GenerateError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        GenerateError::MalformedResponse {
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        GenerateError::Transport(err.to_string())
    }
}

/// Failures of the key-value backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A card position that does not parse or points past the end of a gallery.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CardError {
    #[error("'{0}' is not a card position (use p<N> for pinned or <G>.<I> for history)")]
    Invalid(String),

    #[error("There is no card at {0}.")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::Unavailable(err.to_string())
    }
}
