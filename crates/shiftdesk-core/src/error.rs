use crate::session::Role;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("No {0} session. Please login first.")]
    MissingSession(Role),

    /// Non-2xx response; `message` is already the human-readable text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),
}

impl DeskError {
    /// Text shown to the user: the API's own message when it sent one, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            DeskError::Api { message, .. } | DeskError::Validation(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            DeskError::Api { .. } | DeskError::Validation(_) => fallback.to_string(),
            DeskError::MissingSession(_) | DeskError::Transport(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            DeskError::Api { status, .. } => Some(*status),
            DeskError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
