use thiserror::Error;

/// Failure of one remote call. Every variant carries the human-readable
/// message that ends up in the state container's `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("{message}")]
    Transport { message: String },
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Decode { message: String },
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl RemoteError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            RemoteError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}
