use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: the API key may be incorrect or expired")]
    Auth { body: String },

    #[error("Access denied: the API key may not have permission for this operation")]
    Permission { body: String },

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response content: {0}")]
    Content(String),

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

impl VoiceError {
    /// Maps a non-success status to its error kind. 403 is checked before 401
    /// and both win over anything the body might contain.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            403 => Self::Permission { body },
            401 => Self::Auth { body },
            code => Self::UnexpectedStatus { status: code, body },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Auth { .. } => "auth",
            Self::Permission { .. } => "permission",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::Transport(_) => "transport",
            Self::Content(_) => "content",
            Self::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for VoiceError {
    fn from(source: serde_json::Error) -> Self {
        Self::Content(source.to_string())
    }
}
