//! API error taxonomy.
//!
//! Every service call surfaces one of these. Validation and transition
//! failures carry the server's message so views can show it verbatim.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the server or got no response.
    #[error("network error")]
    Network(#[source] reqwest::Error),

    /// The request timed out; safe to retry.
    #[error("request timed out")]
    Timeout,

    /// 401: the token is missing, invalid or expired. The session must be
    /// torn down.
    #[error("authentication failed; please log in again")]
    Auth,

    /// 403: the actor is not authorized for the target resource.
    #[error("not permitted: {0}")]
    Permission(String),

    /// 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// 400-class rejection with the server's message.
    #[error("{0}")]
    Validation(String),

    /// 409: the requested status transition is not legal for the order's
    /// current state. Normally prevented client-side, but the server can
    /// still disagree with a stale client.
    #[error("action no longer allowed: {0}")]
    InvalidTransition(String),

    /// 5xx or any response the client cannot interpret.
    #[error("server error ({status}): {message}")]
    Server {
        status: StatusCode,
        message: String,
    },

    /// A response body that did not match the expected shape.
    #[error("unexpected response body")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Classify a non-success response status and its body message.
    #[must_use]
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Auth,
            StatusCode::FORBIDDEN => Self::Permission(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::InvalidTransition(message),
            status if status.is_client_error() => Self::Validation(message),
            status => Self::Server { status, message },
        }
    }

    /// Whether the failure invalidates the stored session.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth)
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Network(_) | Self::Server { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }

        if error.is_decode() {
            return Self::Decode(error);
        }

        Self::Network(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Auth
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "nope".to_string()),
            ApiError::Permission(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, String::new()),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, String::new()),
            ApiError::InvalidTransition(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, "bad qty".to_string()),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            ApiError::Server { .. }
        ));
    }

    #[test]
    fn timeout_and_server_errors_are_retryable() {
        assert!(ApiError::Timeout.is_retryable());
        assert!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, String::new()).is_retryable()
        );
        assert!(!ApiError::Auth.is_retryable());
        assert!(!ApiError::Validation("x".to_string()).is_retryable());
    }
}
