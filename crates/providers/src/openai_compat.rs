//! OpenAI-compatible chat-completion provider.
//!
//! Works with OpenRouter, OpenAI, Ollama, vLLM and any endpoint that
//! accepts `{"model", "messages"}` and answers with a `choices` array.
//!
//! Failures are classified in two kinds:
//! - **Transport**: no response was obtained (connect, DNS, TLS, timeout).
//! - **Upstream**: a response arrived but its body has no usable
//!   `choices[0].message.content`. The raw body is attached.
//!
//! Classification is by body shape. The HTTP status is recorded but a
//! non-2xx response that still carries a completion is accepted.

use std::time::Duration;

use async_trait::async_trait;
use maskrag_core::error::{CompletionError, Error};
use maskrag_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

/// Default timeout for one completion call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An OpenAI-compatible chat-completion provider.
pub struct OpenAiCompatProvider {
    name: String,
    api_url: String,
    api_key: String,
    model: String,
    referer: String,
    title: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new provider posting to `api_url` (the full
    /// chat-completions URL).
    pub fn new(
        name: impl Into<String>,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            name: name.into(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            referer: String::new(),
            title: String::new(),
            client,
        })
    }

    /// Create an OpenRouter provider (convenience constructor).
    pub fn openrouter(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, Error> {
        Self::new(
            "openrouter",
            "https://openrouter.ai/api/v1/chat/completions",
            api_key,
            model,
            DEFAULT_TIMEOUT,
        )
    }

    /// Set the `HTTP-Referer` and `X-Title` identification headers.
    pub fn with_identity(mut self, referer: impl Into<String>, title: impl Into<String>) -> Self {
        self.referer = referer.into();
        self.title = title.into();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, CompletionError> {
        let body = serde_json::json!({
            "model": request.model,
            "messages": request.messages,
        });

        debug!(provider = %self.name, model = %request.model, "Sending completion request");

        let mut builder = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");

        if !self.referer.is_empty() {
            builder = builder.header("HTTP-Referer", &self.referer);
        }
        if !self.title.is_empty() {
            builder = builder.header("X-Title", &self.title);
        }

        let response = builder.json(&body).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(provider = %self.name, status = status.as_u16(), "Provider returned non-success status");
        }

        let raw = response.text().await.map_err(transport_error)?;
        let parsed = parse_completion(status.as_u16(), &raw)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Completion usage"
            );
        }

        Ok(parsed)
    }

    /// Reports whether a credential is present. Nothing is sent.
    async fn health_check(&self) -> std::result::Result<bool, CompletionError> {
        Ok(!self.api_key.trim().is_empty())
    }
}

/// Classify a `reqwest` failure as a transport error, keeping the cause chain.
fn transport_error(err: reqwest::Error) -> CompletionError {
    let timed_out = err.is_timeout();
    let mut reason = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    CompletionError::Transport { reason, timed_out }
}

/// Extract the first choice's content from a raw response body.
fn parse_completion(status: u16, raw: &str) -> Result<ProviderResponse, CompletionError> {
    let upstream = || CompletionError::Upstream {
        status,
        body: raw.to_string(),
    };

    let api_response: ApiResponse = serde_json::from_str(raw).map_err(|e| {
        debug!(status, error = %e, "Response body is not a completion");
        upstream()
    })?;

    // Only the first choice decides success; later choices are never read.
    let content = api_response
        .choices
        .into_iter()
        .next()
        .and_then(|c| serde_json::from_value::<ApiChoice>(c).ok())
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(upstream)?;

    let usage = api_response.usage.map(|u| Usage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    Ok(ProviderResponse {
        content,
        model: api_response.model,
        usage,
    })
}

// --- OpenAI API types (internal) ---
//
// Metadata fields are parsed leniently: a malformed `model` or `usage`
// is dropped instead of failing a response that carries an answer.

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    #[serde(default)]
    message: Option<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    #[serde(default, deserialize_with = "token_count")]
    prompt_tokens: u32,
    #[serde(default, deserialize_with = "token_count")]
    completion_tokens: u32,
    #[serde(default, deserialize_with = "token_count")]
    total_tokens: u32,
}

/// Deserialize `T`, or `None` if the value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A token count that may arrive as an integer, a float or `null`.
fn token_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let count = value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
        .unwrap_or(0);
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}
