//! AI build generation: models, prompt, validation, links and the pipeline

pub mod links;
pub mod models;
pub mod prompt;
pub mod service;
pub mod settings;
pub mod validation;

pub use models::{BuildRequest, BuildResult};
pub use service::{BuildError, BuildGenerationService, RetryPolicy};
pub use settings::{AdvisorSettings, EnvSettingsProvider, SettingsProvider};
