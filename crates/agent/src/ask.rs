//! The ask operation: route → compile → complete.
//!
//! Stateless per request. The service holds only read-only collaborators
//! (the provider and the fidelity policy) and is shared behind an `Arc`.
//! Failures are returned as-is; nothing is retried and no partial answer
//! is ever produced.

use std::sync::Arc;

use maskrag_config::FidelityPolicy;
use maskrag_core::error::Result;
use maskrag_core::mode::Mode;
use maskrag_core::prompt::{MaskedMessage, Prompt};
use maskrag_core::provider::{Provider, ProviderRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::fidelity::FidelityCheck;
use crate::prompt::{compile, route};

/// Inbound request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub user_query: String,

    #[serde(default)]
    pub masked_messages: Vec<MaskedMessage>,

    /// Requested mode; absent, null, empty and unknown all mean `general`.
    #[serde(default)]
    pub mode: Option<String>,
}

/// The answer plus the mode actually applied after fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub mode_used: Mode,
}

pub struct AskService {
    provider: Arc<dyn Provider>,
    fidelity: FidelityCheck,
}

impl AskService {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            fidelity: FidelityCheck::default(),
        }
    }

    /// Set the fidelity policy applied to answers.
    pub fn with_fidelity(mut self, policy: FidelityPolicy) -> Self {
        self.fidelity = FidelityCheck::new(policy);
        self
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Compile the prompt a request would send, without calling the backend.
    pub fn preview<S: AsRef<str>>(
        &self,
        query: &str,
        messages: &[S],
        mode: Option<&str>,
    ) -> (Prompt, Mode) {
        let template = route(mode);
        (compile(template, query, messages), template.mode())
    }

    /// Answer `query` over the masked `messages` using `mode`.
    pub async fn ask<S: AsRef<str> + Sync>(
        &self,
        query: &str,
        messages: &[S],
        mode: Option<&str>,
    ) -> Result<AskResponse> {
        let (prompt, mode_used) = self.preview(query, messages, mode);

        info!(
            mode = %mode_used,
            messages = messages.len(),
            est_tokens = prompt.estimated_tokens(),
            "Ask request compiled"
        );

        let request = ProviderRequest::from_prompt(self.provider.model(), &prompt);
        let response = self.provider.complete(request).await.map_err(|e| {
            error!(provider = %self.provider.name(), kind = e.kind(), error = %e, "Completion failed");
            e
        })?;

        debug!(answer_chars = response.content.len(), "Completion received");

        self.fidelity.review(&response.content, query, messages)?;

        Ok(AskResponse {
            answer: response.content,
            mode_used,
        })
    }

    /// Handle a deserialized inbound request.
    pub async fn handle(&self, request: &AskRequest) -> Result<AskResponse> {
        self.ask(
            &request.user_query,
            request.masked_messages.as_slice(),
            request.mode.as_deref(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptTemplate;
    use crate::test_helpers::ScriptedProvider;
    use maskrag_core::error::{CompletionError, Error};
    use maskrag_core::message::Role;

    fn service(provider: &Arc<ScriptedProvider>) -> AskService {
        AskService::new(provider.clone())
    }

    #[tokio::test]
    async fn repeated_placeholder_scenario_uses_finance_rules() {
        let provider = Arc::new(ScriptedProvider::answer(
            "Both payments use the placeholder #amount, so the total cannot be calculated.",
        ));
        let messages = vec![
            "Paid #amount to #receiver on #date".to_string(),
            "Paid #amount to #receiver on #date".to_string(),
        ];

        let resp = service(&provider)
            .ask("What's the total?", &messages, Some("private_finance"))
            .await
            .unwrap();

        assert_eq!(resp.mode_used, Mode::PrivateFinance);
        assert!(resp.answer.contains("cannot be calculated"));

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0].messages[0].content;
        assert!(sent.contains("the total cannot be calculated"));
        assert!(sent.contains(
            "1. \"Paid #amount to #receiver on #date\"\n2. \"Paid #amount to #receiver on #date\""
        ));
    }

    #[tokio::test]
    async fn distinct_amounts_scenario_sends_symbolic_rule() {
        let provider = Arc::new(ScriptedProvider::answer("The total is (#amount1 + #amount2)."));
        let messages = ["Sent #amount1 for rent", "Sent #amount2 for groceries"];

        let resp = service(&provider)
            .ask("What's the total?", &messages, Some("private_finance"))
            .await
            .unwrap();

        assert_eq!(resp.answer, "The total is (#amount1 + #amount2).");
        let requests = provider.requests();
        let sent = &requests[0].messages[0].content;
        assert!(sent.contains("(#amount + #amount)"));
        assert!(sent.contains("#amount1") && sent.contains("#amount2"));
    }

    #[tokio::test]
    async fn bogus_mode_falls_back_to_general() {
        let provider = Arc::new(ScriptedProvider::answer("hello"));
        let resp = service(&provider)
            .ask("hi", &["Paid #amount"], Some("bogus"))
            .await
            .unwrap();

        assert_eq!(resp.mode_used, Mode::General);
        let requests = provider.requests();
        let sent = &requests[0].messages[0].content;
        assert_eq!(sent, PromptTemplate::General.build("hi", &["Paid #amount"]).as_str());
        assert!(!sent.contains("non-disclosure"));
    }

    #[tokio::test]
    async fn upstream_error_propagates_without_answer() {
        let body = r#"{"error": "rate limited"}"#;
        let provider = Arc::new(ScriptedProvider::failing(CompletionError::Upstream {
            status: 200,
            body: body.into(),
        }));

        let err = service(&provider)
            .ask("What's the total?", &["Sent #amount1"], Some("private_finance"))
            .await
            .unwrap_err();

        match err {
            Error::Completion(CompletionError::Upstream { body: got, .. }) => assert_eq!(got, body),
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn transport_error_propagates() {
        let provider = Arc::new(ScriptedProvider::failing(CompletionError::Transport {
            reason: "operation timed out".into(),
            timed_out: true,
        }));
        let err = service(&provider).ask("q", &["m"], None).await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn empty_messages_compile_and_send() {
        let provider = Arc::new(ScriptedProvider::answer("ok"));
        let none: Vec<String> = Vec::new();
        let resp = service(&provider).ask("", &none, None).await.unwrap();

        assert_eq!(resp.mode_used, Mode::General);
        let requests = provider.requests();
        let request = &requests[0];
        assert_eq!(request.model, "mock-model");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert!(request.messages[0].content.contains("RETRIEVED MESSAGES:\n\n"));
    }

    #[tokio::test]
    async fn reject_policy_turns_invented_placeholder_into_error() {
        let provider = Arc::new(ScriptedProvider::answer("(#amount1 + #amount9)"));
        let err = service(&provider)
            .with_fidelity(FidelityPolicy::Reject)
            .ask("total?", &["Sent #amount1"], Some("private_finance"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "fidelity");
    }

    #[tokio::test]
    async fn reject_policy_flags_copied_template_example() {
        let provider = Arc::new(ScriptedProvider::answer("The total is (#amount + #amount)."));
        let err = service(&provider)
            .with_fidelity(FidelityPolicy::Reject)
            .ask(
                "What's the total?",
                &["Sent #amount1 for rent", "Sent #amount2 for groceries"],
                Some("private_finance"),
            )
            .await
            .unwrap_err();
        match err {
            Error::Fidelity { introduced } => assert_eq!(introduced, vec!["#amount"]),
            other => panic!("expected fidelity error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn warn_policy_returns_answer_unchanged() {
        let provider = Arc::new(ScriptedProvider::answer("(#amount1 + #amount9)"));
        let resp = service(&provider)
            .with_fidelity(FidelityPolicy::Warn)
            .ask("total?", &["Sent #amount1"], Some("private_finance"))
            .await
            .unwrap();
        assert_eq!(resp.answer, "(#amount1 + #amount9)");
    }

    #[tokio::test]
    async fn handle_defaults_missing_fields() {
        let provider = Arc::new(ScriptedProvider::answer("ok"));
        let request: AskRequest = serde_json::from_str(r#"{"user_query": "hi"}"#).unwrap();
        assert!(request.masked_messages.is_empty());
        assert!(request.mode.is_none());

        let resp = service(&provider).handle(&request).await.unwrap();
        assert_eq!(resp.mode_used, Mode::General);
    }

    #[test]
    fn response_wire_shape() {
        let resp = AskResponse {
            answer: "ok".into(),
            mode_used: Mode::Learning,
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({"answer": "ok", "mode_used": "learning"})
        );
    }

    #[test]
    fn preview_does_not_call_provider() {
        let provider = Arc::new(ScriptedProvider::answer("unused"));
        let (prompt, mode) = service(&provider).preview("q", &["m"], Some("learning"));
        assert_eq!(mode, Mode::Learning);
        assert!(prompt.as_str().starts_with("You are a patient tutor"));
        assert!(provider.requests().is_empty());
    }
}
