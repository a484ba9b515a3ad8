use reqwest::StatusCode;
use serde::Deserialize;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Error envelope the backend wraps rejection messages in.
#[derive(Deserialize)]
struct ErrorEnvelope {
    detail: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("please log in to use this feature")]
    NotLoggedIn,

    #[error("the server returned an empty response")]
    EmptyResponse,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session store error: {0}")]
    SessionStore(#[from] std::io::Error),
}

impl ApiError {
    /// Builds the error for a non-success status. The message is the
    /// backend's `detail` field when the body is its error envelope, the
    /// raw body text otherwise, or a fixed fallback for an empty body.
    pub(crate) fn status(status: StatusCode, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("request failed with status {status}")
        } else {
            serde_json::from_str::<ErrorEnvelope>(body)
                .ok()
                .and_then(|envelope| envelope.detail)
                .unwrap_or_else(|| body.to_owned())
        };
        Self::Status { status, message }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for responses that invalidate the stored session.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self.status_code(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }
}
