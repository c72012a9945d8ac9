use thiserror::Error;

use qwenht_core::DomainError;

/// Failure of one API call, as seen by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),

    /// The API answered 401; the session has already been cleared.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// A client-side rule rejected the input before anything was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request could not be built (bad base URL, unserialisable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The token could not be persisted.
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a failed response.
    ///
    /// The message comes from the JSON `Error`, `message` or `title` field
    /// when present, otherwise from the raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                ["Error", "error", "message", "title"]
                    .iter()
                    .find_map(|key| json.get(key).and_then(|v| v.as_str()).map(str::to_string))
            });

        let message = from_json.unwrap_or_else(|| {
            let raw = body.trim();
            if raw.is_empty() {
                format!("HTTP {status}")
            } else {
                raw.to_string()
            }
        });

        ClientError::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short text suitable for an alert dialog.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ClientError::Validation(msg),
            DomainError::InvalidId(msg) => ClientError::Validation(msg),
        }
    }
}
