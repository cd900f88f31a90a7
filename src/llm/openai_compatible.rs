//! OpenAI-compatible chat-completions client for structured generation
//!
//! Works against any endpoint implementing POST /v1/chat/completions with
//! the OpenAI request/response format. The model is asked for JSON-mode
//! output and the message content is parsed into the build schema.

use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{GenerationSpec, ModelClient, ModelError};
use crate::build::models::DraftBuild;
use crate::metrics::METRICS;
use async_trait::async_trait;

const SYSTEM_PROMPT: &str = "You are a PC hardware recommendation engine. \
Always answer with a single valid JSON object matching the requested schema, \
with no surrounding prose or markdown fences.";

/// Model client configuration
#[derive(Debug, Clone)]
pub struct ModelClientConfig {
    /// Provider base URL, e.g. "https://api.openai.com"
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ModelClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// OpenAI-compatible chat-completions client
pub struct OpenAiCompatibleClient {
    http: Client,
    config: ModelClientConfig,
}

impl OpenAiCompatibleClient {
    /// Create a new client with a pooled HTTP connection
    pub fn new(config: ModelClientConfig) -> Result<Self, ModelError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ModelClient for OpenAiCompatibleClient {
    async fn generate_build(&self, spec: &GenerationSpec) -> Result<DraftBuild, ModelError> {
        let request = ChatCompletionRequest {
            model: spec.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: spec.prompt.clone(),
                },
            ],
            temperature: Some(0.4),
            response_format: Some(ResponseFormat {
                format: "json_object",
            }),
        };

        debug!("Calling model {} at {}", spec.model, self.endpoint());

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(spec.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                METRICS.model_requests.with_label_values(&["error"]).inc();
                if e.is_timeout() {
                    ModelError::Timeout(e.to_string())
                } else {
                    ModelError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            METRICS.model_requests.with_label_values(&["error"]).inc();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => ModelError::AuthFailed,
                429 => ModelError::RateLimited,
                404 => ModelError::ModelUnavailable(spec.model.clone()),
                _ => ModelError::RequestFailed(format!("Status {}: {}", status, body)),
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            METRICS.model_requests.with_label_values(&["error"]).inc();
            ModelError::InvalidResponse(e.to_string())
        })?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| {
                METRICS.model_requests.with_label_values(&["error"]).inc();
                ModelError::InvalidResponse("no choices in response".to_string())
            })?;

        let draft: DraftBuild = serde_json::from_str(content).map_err(|e| {
            METRICS.model_requests.with_label_values(&["error"]).inc();
            ModelError::InvalidResponse(format!("schema mismatch: {}", e))
        })?;

        METRICS.model_requests.with_label_values(&["success"]).inc();
        Ok(draft)
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;

    fn spec() -> GenerationSpec {
        GenerationSpec {
            prompt: "build prompt".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: SecretString::new("sk-test".to_string()),
        }
    }

    fn client_for(server: &mockito::Server) -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(ModelClientConfig {
            base_url: server.url(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn draft_content() -> String {
        let parts: Vec<_> = [
            "CPU",
            "Motherboard",
            "RAM",
            "GPU",
            "SSD",
            "PSU",
            "Case",
            "Cooler",
        ]
        .iter()
        .map(|category| {
            json!({
                "category": category,
                "name": format!("{} pick", category),
                "asin": "B000TEST00",
                "price": 10000,
                "specs": {}
            })
        })
        .collect();

        json!({
            "parts": parts,
            "laptops": [],
            "monitors": [],
            "headsets": [],
            "miniPcs": [],
            "totalCost": 80000,
            "compatibility": 95,
            "compatibilityNotes": "fine"
        })
        .to_string()
    }

    fn completion_body(content: &str) -> String {
        json!({
            "choices": [{
                "message": {"role": "assistant", "content": content}
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_build_parses_draft() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(&draft_content()))
            .create_async()
            .await;

        let client = client_for(&server);
        let draft = client.generate_build(&spec()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(draft.parts.len(), 8);
        assert_eq!(draft.compatibility, 95);
    }

    #[tokio::test]
    async fn test_401_maps_to_auth_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body("{\"error\": \"invalid key\"}")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.generate_build(&spec()).await;
        assert!(matches!(result, Err(ModelError::AuthFailed)));
    }

    #[tokio::test]
    async fn test_429_maps_to_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.generate_build(&spec()).await;
        assert!(matches!(result, Err(ModelError::RateLimited)));
    }

    #[tokio::test]
    async fn test_404_maps_to_model_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(404)
            .with_body("no such model")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.generate_build(&spec()).await;
        match result {
            Err(ModelError::ModelUnavailable(model)) => assert_eq!(model, "gpt-4o-mini"),
            other => panic!("Expected ModelUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_schema_content_maps_to_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("not json at all"))
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.generate_build(&spec()).await;
        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_empty_choices_maps_to_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"choices\": []}")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.generate_build(&spec()).await;
        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }
}
