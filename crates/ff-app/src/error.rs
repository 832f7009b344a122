//! Error types for the ff-app service layer.

use ff_api::ApiError;
use ff_core::FfError;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Validation(String),

    /// Frontend plumbing failure (worker runtime, channel teardown).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for ff-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<FfError> for AppError {
    fn from(err: FfError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl AppError {
    /// One line of text suitable for in-place display next to the view that
    /// failed. Backend `{detail}` messages pass through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(api) => api.user_message(),
            other => other.to_string(),
        }
    }

    /// Expired or missing credentials; callers redirect to login rather than
    /// rendering the message.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api(api) if api.is_unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_detail_passes_through_verbatim() {
        let err = AppError::Api(ApiError::Status {
            status: 400,
            message: "Profile incomplete".to_string(),
        });
        assert_eq!(err.user_message(), "Profile incomplete");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_is_flagged_for_redirect() {
        let err = AppError::Api(ApiError::Unauthorized);
        assert!(err.is_unauthorized());
    }
}
