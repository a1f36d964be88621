use std::path::PathBuf;

use convo_session::ApiError;

/// Errors from the conversation-list and model-management clients
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status; `message` is the server's `detail` when it sent one
    #[error("{message} (status {status})")]
    Server { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Collapse a client error into the transport-agnostic error the chat
/// session understands
impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Server { status, message } => ApiError::Status {
                status,
                body: message,
            },
            ClientError::Decode(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}
