//! Build generation pipeline
//!
//! Single-pass flow: fetch settings, build the prompt, call the model under
//! retry, enforce component completeness, run advisory checks, recompute the
//! total, attach marketplace links, return. No state is kept between calls.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::build::links::marketplace_search_url;
use crate::build::models::{BuildRequest, BuildResult, PartCategory};
use crate::build::prompt::build_prompt;
use crate::build::settings::{SettingsError, SettingsProvider};
use crate::build::validation::{advisory_warnings, check_completeness};
use crate::llm::{GenerationSpec, ModelClient, ModelError};
use crate::metrics::METRICS;
use crate::retry::retry_with_backoff;

/// Build generation failures surfaced to callers
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("build generation is not configured")]
    ConfigurationMissing,

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("{message}")]
    Generation {
        message: String,
        #[source]
        source: ModelError,
    },

    #[error("generated build is missing required components: {}", format_categories(.missing))]
    IncompleteBuild { missing: Vec<PartCategory> },
}

fn format_categories(categories: &[PartCategory]) -> String {
    categories
        .iter()
        .map(PartCategory::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Retry policy for the model call
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// AI build generation service
pub struct BuildGenerationService {
    settings: Arc<dyn SettingsProvider>,
    model: Arc<dyn ModelClient>,
    retry: RetryPolicy,
}

impl BuildGenerationService {
    /// Create a service with the default retry policy
    pub fn new(settings: Arc<dyn SettingsProvider>, model: Arc<dyn ModelClient>) -> Self {
        Self {
            settings,
            model,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Generate a complete build for a request
    pub async fn generate(&self, request: BuildRequest) -> Result<BuildResult, BuildError> {
        let settings = self
            .settings
            .fetch()
            .await?
            .ok_or(BuildError::ConfigurationMissing)?;

        info!(
            "Generating build: category={}, budget={}, model={}",
            request.category, request.budget, settings.model
        );

        let spec = GenerationSpec {
            prompt: build_prompt(&request),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        };

        let model = &self.model;
        let spec = &spec;
        let draft = retry_with_backoff(self.retry.max_attempts, self.retry.base_delay, || {
            async move { model.generate_build(spec).await }
        })
        .await
        .map_err(|e| BuildError::Generation {
            message: e.user_message().to_string(),
            source: e,
        })?;

        let missing = check_completeness(&draft.parts);
        if !missing.is_empty() {
            return Err(BuildError::IncompleteBuild { missing });
        }

        // Authoritative total; the model's own figure is discarded
        let total_cost: f64 = draft.parts.iter().map(|part| part.price).sum();

        let warnings = advisory_warnings(&request, &draft, total_cost);
        for warning in &warnings {
            warn!("Advisory finding: {}", warning);
            METRICS
                .advisory_warnings
                .with_label_values(&[warning.kind()])
                .inc();
        }

        let tag = &settings.tracking_tag;
        let mut parts = draft.parts;
        for part in &mut parts {
            part.url = Some(marketplace_search_url(&part.name, tag));
        }
        let mut laptops = draft.laptops;
        for laptop in &mut laptops {
            laptop.url = Some(marketplace_search_url(&laptop.name, tag));
        }
        let mut monitors = draft.monitors;
        for monitor in &mut monitors {
            monitor.url = Some(marketplace_search_url(&monitor.name, tag));
        }
        let mut headsets = draft.headsets;
        for headset in &mut headsets {
            headset.url = Some(marketplace_search_url(&headset.name, tag));
        }
        let mut mini_pcs = draft.mini_pcs;
        for mini_pc in &mut mini_pcs {
            mini_pc.url = Some(marketplace_search_url(&mini_pc.name, tag));
        }

        info!(
            "Build generated: category={}, total_cost={}, compatibility={}, warnings={}",
            request.category,
            total_cost,
            draft.compatibility,
            warnings.len()
        );

        Ok(BuildResult {
            category: request.category,
            budget: request.budget,
            parts,
            laptops,
            monitors,
            headsets,
            mini_pcs,
            total_cost,
            compatibility: draft.compatibility,
            compatibility_notes: draft.compatibility_notes,
            warnings,
        })
    }
}
