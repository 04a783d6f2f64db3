//! Provider trait: the abstraction over chat-completion backends.
//!
//! A Provider knows how to send a message list to an LLM and return the
//! first completion. The request handler calls `complete()` without knowing
//! which backend is configured, so tests can swap in a scripted provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;
use crate::message::Message;
use crate::prompt::Prompt;

/// A chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "kwaipilot/kat-coder-pro:free")
    pub model: String,

    /// The conversation messages
    pub messages: Vec<Message>,
}

impl ProviderRequest {
    /// Wrap a compiled prompt as a one-element user message list.
    pub fn from_prompt(model: impl Into<String>, prompt: &Prompt) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(prompt.as_str())],
        }
    }
}

/// A complete (non-streaming) response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Content of the first choice
    pub content: String,

    /// Which model actually responded, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Token usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openrouter").
    fn name(&self) -> &str;

    /// The model identifier this provider was configured with.
    fn model(&self) -> &str;

    /// Send a request and get the first completion back.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, CompletionError>;

    /// Whether the provider is usable.
    async fn health_check(&self) -> std::result::Result<bool, CompletionError> {
        Ok(true)
    }
}
