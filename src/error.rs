//! Error Types
//!
//! Errors surfaced by the HTTP client, the gateways and the form layer.

/// Fallback message when the server gives none
pub const SERVER_ERROR: &str = "Server error";
/// Message shown when the request never reached the server
pub const NETWORK_ERROR: &str = "Unable to reach the server";

/// Result type for gateway calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures of a single API call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// fetch rejected (offline, DNS, CORS)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response with `success: false`
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    Validation(String),
}

impl ApiError {
    /// Text suitable for a toast or inline banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => NETWORK_ERROR.to_string(),
            ApiError::Status { message, .. } | ApiError::Rejected(message) => message.clone(),
            ApiError::Decode(_) => SERVER_ERROR.to_string(),
            ApiError::Validation(msg) => msg.clone(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Client-side form validation failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{0} required")]
    Required(&'static str),

    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(ApiError::Network("dns".into()).user_message(), NETWORK_ERROR);
        let status = ApiError::Status { status: 409, message: "Coupon code exists".into() };
        assert_eq!(status.user_message(), "Coupon code exists");
        assert_eq!(ApiError::Decode("eof".into()).user_message(), SERVER_ERROR);
    }

    #[test]
    fn test_form_error_display() {
        assert_eq!(FormError::Required("name").to_string(), "name required");
    }
}
