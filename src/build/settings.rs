//! Provider settings lookup
//!
//! The generation pipeline never reaches into ambient state; it is handed a
//! [`SettingsProvider`] and fetches the active settings fresh on every call.
//! An absent record means the service is unconfigured, which is the one
//! configuration-related hard failure.

use async_trait::async_trait;
use secrecy::SecretString;

/// Tracking tag applied when none is configured
pub const DEFAULT_TRACKING_TAG: &str = "eknowledgetre-21";

/// Active provider settings for build generation
#[derive(Debug, Clone)]
pub struct AdvisorSettings {
    /// Model provider API key
    pub api_key: SecretString,
    /// Model identifier passed to the provider
    pub model: String,
    /// Marketplace affiliate/tracking tag appended to item URLs
    pub tracking_tag: String,
}

/// Settings lookup failures
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings lookup failed: {0}")]
    Lookup(String),
}

/// Read-only settings source
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Fetch the active settings; `None` means the service is unconfigured
    async fn fetch(&self) -> Result<Option<AdvisorSettings>, SettingsError>;
}

/// Environment-backed settings provider
///
/// Reads `ADVISOR_API_KEY`, `ADVISOR_MODEL` and `ADVISOR_TRACKING_TAG`.
/// Missing key or model reports the service as unconfigured; the tracking
/// tag falls back to [`DEFAULT_TRACKING_TAG`].
pub struct EnvSettingsProvider;

#[async_trait]
impl SettingsProvider for EnvSettingsProvider {
    async fn fetch(&self) -> Result<Option<AdvisorSettings>, SettingsError> {
        let api_key = match std::env::var("ADVISOR_API_KEY") {
            Ok(value) if !value.is_empty() => value,
            _ => return Ok(None),
        };
        let model = match std::env::var("ADVISOR_MODEL") {
            Ok(value) if !value.is_empty() => value,
            _ => return Ok(None),
        };
        let tracking_tag = std::env::var("ADVISOR_TRACKING_TAG")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_TRACKING_TAG.to_string());

        Ok(Some(AdvisorSettings {
            api_key: SecretString::new(api_key),
            model,
            tracking_tag,
        }))
    }
}

/// Fixed settings provider for tests and local experimentation
pub struct StaticSettingsProvider {
    settings: Option<AdvisorSettings>,
}

impl StaticSettingsProvider {
    pub fn configured(settings: AdvisorSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }

    pub fn unconfigured() -> Self {
        Self { settings: None }
    }
}

#[async_trait]
impl SettingsProvider for StaticSettingsProvider {
    async fn fetch(&self) -> Result<Option<AdvisorSettings>, SettingsError> {
        Ok(self.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_env_provider_unconfigured_without_key() {
        std::env::remove_var("ADVISOR_API_KEY");
        std::env::remove_var("ADVISOR_MODEL");

        let provider = EnvSettingsProvider;
        let settings = provider.fetch().await.unwrap();
        assert!(settings.is_none());
    }

    #[tokio::test]
    async fn test_static_provider_roundtrip() {
        let provider = StaticSettingsProvider::configured(AdvisorSettings {
            api_key: SecretString::new("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
            tracking_tag: "tag-21".to_string(),
        });

        let settings = provider.fetch().await.unwrap().unwrap();
        assert_eq!(settings.api_key.expose_secret(), "sk-test");
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.tracking_tag, "tag-21");

        let unconfigured = StaticSettingsProvider::unconfigured();
        assert!(unconfigured.fetch().await.unwrap().is_none());
    }

    #[test]
    fn test_settings_debug_redacts_key() {
        let settings = AdvisorSettings {
            api_key: SecretString::new("sk-secret-value".to_string()),
            model: "gpt-4o-mini".to_string(),
            tracking_tag: "tag-21".to_string(),
        };

        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-secret-value"));
    }
}
