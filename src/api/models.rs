//! Shared API wire types

use serde::{Deserialize, Serialize};

/// API error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Standard error codes
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_CONFIGURED: &str = "NOT_CONFIGURED";
    pub const RATE_LIMIT: &str = "RATE_LIMIT";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new(error_codes::VALIDATION_ERROR, "budget must be positive");
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["code"], "VALIDATION_ERROR");
        assert_eq!(value["message"], "budget must be positive");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_api_error_with_details() {
        let error = ApiError::new(error_codes::UPSTREAM_ERROR, "bad gateway")
            .with_details(serde_json::json!({"status": 502}));
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["details"]["status"], 502);
    }
}
