use reqwest::StatusCode;

/// Message shown when a failure carries no text of its own.
pub const GENERIC_MESSAGE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API answered with an error status. `message` is the server's text, if any.
    #[error("API error ({status}): {}", message.as_deref().unwrap_or(GENERIC_MESSAGE))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }

    /// Text to put in front of the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(GENERIC_MESSAGE)
                .to_string(),
            ClientError::Validation(msg) => msg.clone(),
            other => {
                let msg = other.to_string();
                if msg.trim().is_empty() {
                    GENERIC_MESSAGE.to_string()
                } else {
                    msg
                }
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// True when the server rejected the credential (expired or missing token).
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
