use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Shown when the backend gives us nothing better.
pub const GENERIC_ERROR: &str = "Could not complete the request. Please try again.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never reached the server or never returned.
    #[error("{GENERIC_ERROR}")]
    Network(#[source] reqwest::Error),

    /// Non-2xx with a message extracted from the error body.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 401 from the backend; the gate redirects instead of rendering this.
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    /// 2xx whose body did not parse as the expected shape.
    #[error("{GENERIC_ERROR}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    SessionStore(String),
}

impl ApiError {
    /// Human-readable message for in-place display; every variant maps to
    /// exactly one line of text.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}

/// Extract the message from an error body following the backend's
/// `{"detail": ...}` convention, falling back to `message`, then to the
/// generic line.
pub fn error_body_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    GENERIC_ERROR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_is_used_verbatim() {
        assert_eq!(
            error_body_message(r#"{"detail": "Profile incomplete"}"#),
            "Profile incomplete"
        );
    }

    #[test]
    fn message_field_is_fallback() {
        assert_eq!(
            error_body_message(r#"{"message": "Rate limited"}"#),
            "Rate limited"
        );
    }

    #[test]
    fn unstructured_bodies_get_generic_message() {
        assert_eq!(error_body_message(""), GENERIC_ERROR);
        assert_eq!(error_body_message("<html>502</html>"), GENERIC_ERROR);
        assert_eq!(error_body_message(r#"{"detail": ["not a string"]}"#), GENERIC_ERROR);
    }
}
