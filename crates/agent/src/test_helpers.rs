//! Shared test helpers for the ask pipeline.

use maskrag_core::error::CompletionError;
use maskrag_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use std::sync::Mutex;

/// A mock provider that replays one scripted outcome and records requests.
pub struct ScriptedProvider {
    outcome: Result<String, CompletionError>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    /// Answer every request with `text`.
    pub fn answer(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with `error`.
    pub fn failing(error: CompletionError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, CompletionError> {
        self.requests.lock().unwrap().push(request);
        self.outcome.clone().map(|content| ProviderResponse {
            content,
            model: Some("mock-model".into()),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }
}
