//! HTTP handlers for build generation

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::models::{error_codes, ApiError};
use crate::build::models::{BuildRequest, BuildResult};
use crate::build::service::{BuildError, BuildGenerationService};
use crate::llm::ModelError;
use crate::metrics::METRICS;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BuildGenerationService>,
}

/// Build generation request body
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateBuildRequest {
    pub category: String,
    pub budget: i64,
}

/// Validate the request body; returns a message for the caller on failure
fn validate_request(request: &GenerateBuildRequest) -> Option<&'static str> {
    if request.category.trim().is_empty() {
        return Some("category cannot be empty");
    }
    if request.budget <= 0 {
        return Some("budget must be a positive amount");
    }
    None
}

/// Map pipeline failures to HTTP status and error code
fn status_for(error: &BuildError) -> (StatusCode, &'static str) {
    match error {
        BuildError::ConfigurationMissing => {
            (StatusCode::SERVICE_UNAVAILABLE, error_codes::NOT_CONFIGURED)
        }
        BuildError::Settings(_) => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
        BuildError::Generation { source, .. } => match source {
            ModelError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMIT),
            ModelError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, error_codes::TIMEOUT),
            _ => (StatusCode::BAD_GATEWAY, error_codes::UPSTREAM_ERROR),
        },
        BuildError::IncompleteBuild { .. } => (StatusCode::BAD_GATEWAY, error_codes::UPSTREAM_ERROR),
    }
}

/// Generate a build
///
/// POST /api/v1/builds/generate
pub async fn generate_build(
    State(state): State<AppState>,
    Json(request): Json<GenerateBuildRequest>,
) -> Result<Json<BuildResult>, (StatusCode, Json<ApiError>)> {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    info!(
        "Build request {}: category={}, budget={}",
        request_id, request.category, request.budget
    );

    if let Some(message) = validate_request(&request) {
        METRICS.record_build(false);
        METRICS
            .build_duration
            .with_label_values(&["generate"])
            .observe(start.elapsed().as_secs_f64());
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(error_codes::VALIDATION_ERROR, message)),
        ));
    }

    let build_request = BuildRequest {
        category: request.category,
        budget: request.budget as u64,
    };

    match state.service.generate(build_request).await {
        Ok(result) => {
            METRICS.record_build(true);
            METRICS
                .build_duration
                .with_label_values(&["generate"])
                .observe(start.elapsed().as_secs_f64());
            info!(
                "Build request {} completed: total_cost={}, warnings={}",
                request_id,
                result.total_cost,
                result.warnings.len()
            );
            Ok(Json(result))
        }
        Err(e) => {
            METRICS.record_build(false);
            METRICS
                .build_duration
                .with_label_values(&["generate"])
                .observe(start.elapsed().as_secs_f64());
            let (status, code) = status_for(&e);
            error!("Build request {} failed: {}", request_id, e);
            Err((status, Json(ApiError::new(code, e.to_string()))))
        }
    }
}

/// Liveness probe
///
/// GET /healthz
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Prometheus exposition endpoint
///
/// GET /metrics
pub async fn export_metrics() -> String {
    METRICS.export()
}
