//! LLM backend abstraction and implementations.
//!
//! Enum-based dispatch over the supported backends, avoiding the
//! dyn-compatibility issues with async trait methods. Concrete
//! implementations exist for the Google Gemini `generateContent` API and
//! `OpenAI`-compatible chat completions APIs. Both communicate over HTTP
//! via `reqwest`.
//!
//! The advisor does not care which model is behind the API. It sends a
//! prompt and expects a text response containing JSON advice.

use warden_core::config::{BackendType, LlmConfig};

use crate::error::AdvisorError;
use crate::prompt::RenderedPrompt;

/// An LLM backend that can process a prompt and return a response.
///
/// Uses enum dispatch instead of trait objects because async methods
/// are not dyn-compatible in Rust.
pub enum LlmBackend {
    /// Google Gemini `generateContent` API.
    Gemini(GeminiBackend),
    /// `OpenAI`-compatible chat completions API.
    OpenAi(OpenAiBackend),
}

impl LlmBackend {
    /// Send a prompt to the LLM and return the response text.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Backend`] if the HTTP call fails or the
    /// response text cannot be extracted.
    pub async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, AdvisorError> {
        match self {
            Self::Gemini(backend) => backend.complete(prompt).await,
            Self::OpenAi(backend) => backend.complete(prompt).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Gemini(_) => "gemini",
            Self::OpenAi(_) => "openai-compatible",
        }
    }
}

/// Backend for the Google Gemini `generateContent` API.
///
/// Sends requests to `{api_url}/models/{model}:generateContent` with the
/// key in the `x-goog-api-key` header. The system prompt travels in the
/// top-level `systemInstruction` field.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend.
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send a prompt and return the response text.
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, AdvisorError> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let body = serde_json::json!({
            "systemInstruction": {
                "parts": [{"text": prompt.system}]
            },
            "contents": [
                {"role": "user", "parts": [{"text": prompt.user}]}
            ],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 512,
                "responseMimeType": "application/json"
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Backend(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(AdvisorError::Backend(format!(
                "Gemini returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AdvisorError::Backend(format!("Gemini response parse failed: {e}")))?;

        extract_gemini_content(&json)
    }
}

/// Extract the text content from a Gemini `generateContent` response.
fn extract_gemini_content(json: &serde_json::Value) -> Result<String, AdvisorError> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            AdvisorError::Backend(
                "Gemini response missing candidates[0].content.parts[0].text".to_owned(),
            )
        })
}

/// Backend for `OpenAI`-compatible chat completions APIs.
///
/// Works with `OpenAI`, `DeepSeek`, and Ollama endpoints.
/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    /// Create a new `OpenAI`-compatible backend.
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send a prompt and return the response text.
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, AdvisorError> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": 0.7,
            "max_tokens": 512,
            "response_format": {"type": "json_object"}
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Backend(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(AdvisorError::Backend(format!(
                "OpenAI returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AdvisorError::Backend(format!("OpenAI response parse failed: {e}")))?;

        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, AdvisorError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            AdvisorError::Backend(
                "OpenAI response missing choices[0].message.content".to_owned(),
            )
        })
}

/// Create an LLM backend from configuration.
pub fn create_backend(config: &LlmConfig) -> LlmBackend {
    match config.backend_type {
        BackendType::Gemini => LlmBackend::Gemini(GeminiBackend::new(config)),
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend::new(config)),
    }
}
