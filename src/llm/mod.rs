//! Language-model provider integration
//!
//! The pipeline sees a single object-safe [`ModelClient`] seam; the HTTP
//! implementation lives in [`openai_compatible`]. Retry policy is owned by
//! the caller, not the client.

pub mod openai_compatible;

pub use openai_compatible::{ModelClientConfig, OpenAiCompatibleClient};

use async_trait::async_trait;
use secrecy::SecretString;

use crate::build::models::DraftBuild;

/// Model-call failures, classified for user-facing reporting
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model provider rejected the API key")]
    AuthFailed,

    #[error("model provider rate limit hit")]
    RateLimited,

    #[error("model {0} is unavailable")]
    ModelUnavailable(String),

    #[error("model request timed out: {0}")]
    Timeout(String),

    #[error("model request failed: {0}")]
    RequestFailed(String),

    #[error("model returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl ModelError {
    /// Short actionable message surfaced to callers
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AuthFailed => "The configured AI provider API key is invalid or expired",
            Self::RateLimited => "The AI provider rate limit has been reached; try again shortly",
            Self::ModelUnavailable(_) => "The configured AI model is currently unavailable",
            Self::Timeout(_) => "The AI provider timed out while generating the build",
            Self::RequestFailed(_) | Self::InvalidResponse(_) => {
                "Build generation failed; please try again"
            }
        }
    }
}

/// Structured-generation request: prompt plus per-call credentials
///
/// Credentials travel with the request because settings are fetched fresh
/// for every generation; the client itself holds no configuration state
/// beyond its HTTP endpoint.
#[derive(Debug, Clone)]
pub struct GenerationSpec {
    pub prompt: String,
    pub model: String,
    pub api_key: SecretString,
}

/// Structured build generation against a model provider
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a draft build conforming to the [`DraftBuild`] schema
    async fn generate_build(&self, spec: &GenerationSpec) -> Result<DraftBuild, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_actionable() {
        assert!(ModelError::AuthFailed.user_message().contains("API key"));
        assert!(ModelError::RateLimited.user_message().contains("rate limit"));
        assert!(ModelError::ModelUnavailable("m".to_string())
            .user_message()
            .contains("unavailable"));
        assert!(ModelError::Timeout("t".to_string())
            .user_message()
            .contains("timed out"));
        assert_eq!(
            ModelError::RequestFailed("boom".to_string()).user_message(),
            ModelError::InvalidResponse("bad".to_string()).user_message()
        );
    }
}
