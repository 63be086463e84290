/// Inference client — the single point of entry for all text-generation
/// calls in the job board.
///
/// ARCHITECTURAL RULE: No other module may call the inference service
/// directly. All model interactions MUST go through this module.
///
/// The client is an explicit value built from injected configuration
/// (endpoint, credential, model identifier, timeout, retry budget) so
/// tests and deployments can substitute their own.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default OpenAI-compatible chat-completions endpoint.
pub const DEFAULT_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";
/// Default comparison model.
pub const DEFAULT_MODEL: &str = "meta-llama/Meta-Llama-3-8B-Instruct";

/// Fixed generation parameters for comparison requests.
const MAX_COMPLETION_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("inference service returned no completion")]
    EmptyCompletion,

    #[error("inference service unavailable after {retries} attempts")]
    Unavailable { retries: u32 },
}

/// Connection settings injected from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct InferenceSettings {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

impl ChatResponse {
    /// Extracts the first completion's text.
    pub fn into_text(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single inference client shared by all handlers.
/// Wraps an OpenAI-compatible chat-completions API with a request timeout
/// and bounded retry on transient failures.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    max_retries: u32,
}

impl InferenceClient {
    pub fn new(settings: InferenceSettings) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(settings.timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_url: settings.api_url,
            api_key: settings.api_key,
            model: settings.model,
            max_retries: settings.max_retries,
        }
    }

    /// Sends the prompt as a single user-role message and returns the first
    /// completion's text verbatim.
    ///
    /// Transient failures (transport errors, 429, 5xx) are retried with
    /// exponential backoff up to the configured budget. Other API errors
    /// fail immediately.
    pub async fn chat(&self, prompt: &str) -> Result<String, InferenceError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
        };

        let attempts = self.max_retries.max(1);
        let mut last_error: Option<InferenceError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "inference attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(InferenceError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("inference service returned {}: {}", status, body);
                last_error = Some(InferenceError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(InferenceError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            debug!("inference call succeeded (model: {})", self.model);

            return chat_response.into_text().ok_or(InferenceError::EmptyCompletion);
        }

        Err(last_error.unwrap_or(InferenceError::Unavailable { retries: attempts }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_extracts_first_completion() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "match_score: 80"}},
                {"message": {"role": "assistant", "content": "second choice"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_text().as_deref(), Some("match_score: 80"));
    }

    #[test]
    fn test_empty_choices_yield_no_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.into_text().is_none());
    }

    #[test]
    fn test_request_body_carries_fixed_generation_parameters() {
        let request = ChatRequest {
            model: DEFAULT_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "prompt",
            }],
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 500);
        let temperature = json["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_api_error_body_parses_message() {
        let body = r#"{"error": {"message": "Invalid credentials"}}"#;
        let parsed: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Invalid credentials");
    }
}
