//! Shared test helpers for gateway routes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use maskrag_agent::AskService;
use maskrag_config::FidelityPolicy;
use maskrag_core::error::CompletionError;
use maskrag_core::provider::{Provider, ProviderRequest, ProviderResponse};

use crate::{GatewayState, SharedState};

/// Lightweight mock provider for gateway tests.
pub struct MockProvider {
    outcome: Result<String, CompletionError>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn answer(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: CompletionError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "gateway_mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map(|content| ProviderResponse {
            content,
            model: Some("mock-model".into()),
            usage: None,
        })
    }
}

pub fn test_state(provider: Arc<MockProvider>) -> SharedState {
    test_state_with_policy(provider, FidelityPolicy::Warn)
}

pub fn test_state_with_policy(provider: Arc<MockProvider>, policy: FidelityPolicy) -> SharedState {
    let ask = AskService::new(provider).with_fidelity(policy);
    Arc::new(GatewayState::new(Arc::new(ask)))
}
