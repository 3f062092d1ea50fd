//! Ollama LLM client (native `/api/generate` endpoint)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::length_budget::LengthBudget;
use super::ports::{Generated, GenerationRequest, LlmError, LlmPort};
use super::settings::{EngineSettings, OllamaSettings};

/// Markers the model is told to finish a chapter with.
pub const STOP_SEQUENCES: [&str; 2] = ["</chapter>", "[END]"];

/// Client for a local Ollama server
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    availability_timeout: Duration,
    default_max_tokens: u32,
    budget: LengthBudget,
}

impl OllamaClient {
    pub fn new(settings: &OllamaSettings, budget: LengthBudget) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            availability_timeout: Duration::from_secs(settings.availability_timeout_secs),
            default_max_tokens: settings.default_max_tokens,
            budget,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(&settings.ollama, settings.length_budget)
    }

    /// Create client with custom timeout (for testing).
    pub fn with_timeout(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let settings = OllamaSettings {
            base_url: base_url.to_string(),
            model: model.to_string(),
            request_timeout_secs: timeout_secs,
            availability_timeout_secs: timeout_secs,
            ..Default::default()
        };
        Self::new(&settings, LengthBudget::default())
    }

    /// Token budget for a request: a word target wins over an explicit limit.
    fn num_predict(&self, request: &GenerationRequest) -> u32 {
        match (request.target_words, request.max_tokens) {
            (Some(words), _) => self.budget.estimate(words),
            (None, Some(max_tokens)) => max_tokens,
            (None, None) => self.default_max_tokens,
        }
    }

    fn build_payload(&self, request: &GenerationRequest) -> OllamaGenerateRequest {
        OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: request.full_prompt(),
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: self.num_predict(request),
                top_p: request.top_p,
                stop: STOP_SEQUENCES.iter().map(|s| s.to_string()).collect(),
                num_ctx: self.budget.context_window(),
            },
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(&OllamaSettings::default(), LengthBudget::default())
    }
}

#[async_trait]
impl LlmPort for OllamaClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Generated, LlmError> {
        let payload = self.build_payload(&request);
        let num_predict = payload.options.num_predict;

        tracing::debug!(
            model = %self.model,
            num_predict,
            num_ctx = ?payload.options.num_ctx,
            prompt_chars = payload.prompt.chars().count(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "Ollama returned an error status");
            return Err(LlmError::ServerError {
                status: status.as_u16(),
            });
        }

        let body: OllamaGenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else if e.is_decode() {
                LlmError::Malformed(e.to_string())
            } else {
                LlmError::RequestFailed(e.to_string())
            }
        })?;

        let text = body.response.unwrap_or_default();
        tracing::info!(
            model = %self.model,
            num_predict,
            response_chars = text.chars().count(),
            "Generation complete"
        );

        Ok(Generated { text, num_predict })
    }

    async fn check_availability(&self) -> bool {
        let result = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.availability_timeout)
            .send()
            .await;

        match result {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::debug!(error = %e, base_url = %self.base_url, "Ollama not reachable");
                false
            }
        }
    }
}

fn classify_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else if e.is_connect() {
        LlmError::ConnectionRefused
    } else {
        LlmError::RequestFailed(e.to_string())
    }
}

// =============================================================================
// Ollama API types
// =============================================================================

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
    top_p: f32,
    stop: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_ctx: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> OllamaClient {
        OllamaClient::with_timeout(&server.url(), "llama3.1:8b", 5)
    }

    #[test]
    fn word_target_wins_over_max_tokens() {
        let client = OllamaClient::default();
        let request = GenerationRequest::new("p")
            .with_max_tokens(Some(100))
            .with_target_words(Some(3000));
        assert_eq!(client.num_predict(&request), LengthBudget::default().estimate(3000));

        let request = GenerationRequest::new("p").with_max_tokens(Some(100));
        assert_eq!(client.num_predict(&request), 100);

        assert_eq!(client.num_predict(&GenerationRequest::new("p")), 4000);
    }

    #[test]
    fn payload_omits_num_ctx_outside_safe_range() {
        let settings = OllamaSettings::default();
        let budget = LengthBudget {
            model_context_limit: 131_072,
            ..Default::default()
        };
        let client = OllamaClient::new(&settings, budget);
        let payload = serde_json::to_value(client.build_payload(&GenerationRequest::new("p")))
            .expect("serialize payload");
        assert!(payload["options"].get("num_ctx").is_none());
        assert_eq!(payload["stream"], json!(false));
        assert_eq!(payload["options"]["stop"], json!(["</chapter>", "[END]"]));
    }

    #[tokio::test]
    async fn generate_returns_response_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::PartialJson(json!({
                "model": "llama3.1:8b",
                "prompt": "You are an author.\n\nWrite chapter 1.",
                "stream": false,
                "options": {"num_predict": 2000, "stop": ["</chapter>", "[END]"], "num_ctx": 32768}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model": "llama3.1:8b", "response": "Chapter 1: Return", "done": true}"#)
            .create_async()
            .await;

        let request = GenerationRequest::new("Write chapter 1.")
            .with_system_prompt("You are an author.")
            .with_max_tokens(Some(2000));
        let generated = client_for(&server).generate(request).await.expect("generation succeeds");

        assert_eq!(generated.text, "Chapter 1: Return");
        assert_eq!(generated.num_predict, 2000);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_response_field_yields_empty_text() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body(r#"{"done": true}"#)
            .create_async()
            .await;

        let generated = client_for(&server)
            .generate(GenerationRequest::new("hello"))
            .await
            .expect("generation succeeds");
        assert_eq!(generated.text, "");
    }

    #[tokio::test]
    async fn server_error_carries_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body("model crashed")
            .create_async()
            .await;

        let err = client_for(&server)
            .generate(GenerationRequest::new("hello"))
            .await
            .expect_err("500 is an error");
        assert_eq!(err, LlmError::ServerError { status: 500 });
        assert!(err.display_text().starts_with("Error:"));
        assert!(err.display_text().contains("500"));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body("<html>proxy error</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .generate(GenerationRequest::new("hello"))
            .await
            .expect_err("html is not a generation");
        assert!(matches!(err, LlmError::Malformed(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .expect("bind")
            .local_addr()
            .expect("local addr")
            .port();
        let client = OllamaClient::with_timeout(&format!("http://127.0.0.1:{port}"), "m", 2);

        let started = std::time::Instant::now();
        let err = client
            .generate(GenerationRequest::new("hello"))
            .await
            .expect_err("nothing is listening");
        assert_eq!(err, LlmError::ConnectionRefused);
        assert!(err.display_text().contains("connect"));
        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(!client.check_availability().await);
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        // Accepts connections into the backlog but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let client = OllamaClient::with_timeout(&format!("http://{addr}"), "m", 1);

        let err = client
            .generate(GenerationRequest::new("hello"))
            .await
            .expect_err("no answer");
        assert_eq!(err, LlmError::Timeout);
        drop(listener);
    }

    #[tokio::test]
    async fn availability_follows_tags_status() {
        let mut server = mockito::Server::new_async().await;
        let _ok = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body(r#"{"models": []}"#)
            .create_async()
            .await;
        assert!(client_for(&server).check_availability().await);

        let mut failing = mockito::Server::new_async().await;
        let _err = failing
            .mock("GET", "/api/tags")
            .with_status(503)
            .create_async()
            .await;
        assert!(!client_for(&failing).check_availability().await);
    }
}
