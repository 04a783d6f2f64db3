//! Placeholder fidelity check for model answers.
//!
//! The backend cannot be forced to keep placeholders intact, so answers are
//! checked after the fact: any placeholder in the answer that appears in
//! neither the query nor the messages counts as introduced. The template's
//! own example tokens are not inputs, so echoing them back is flagged too.
//! Placeholders the answer leaves out are fine.

use maskrag_config::FidelityPolicy;
use maskrag_core::error::Error;
use maskrag_core::placeholder;
use tracing::warn;

/// Applies the configured [`FidelityPolicy`] to completed answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FidelityCheck {
    policy: FidelityPolicy,
}

impl FidelityCheck {
    pub fn new(policy: FidelityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FidelityPolicy {
        self.policy
    }

    /// Placeholders in `answer` found in neither `query` nor `messages`.
    pub fn introduced<S: AsRef<str>>(answer: &str, query: &str, messages: &[S]) -> Vec<String> {
        let inputs = std::iter::once(query).chain(messages.iter().map(|m| m.as_ref()));
        let known = placeholder::distinct(inputs);
        placeholder::introduced(answer, &known)
    }

    /// Check `answer` against the request inputs. Only `Reject` can fail;
    /// the answer is never modified.
    pub fn review<S: AsRef<str>>(
        &self,
        answer: &str,
        query: &str,
        messages: &[S],
    ) -> Result<(), Error> {
        if self.policy == FidelityPolicy::Off {
            return Ok(());
        }

        let introduced = Self::introduced(answer, query, messages);
        if introduced.is_empty() {
            return Ok(());
        }

        warn!(
            introduced = %introduced.join(", "),
            policy = ?self.policy,
            "Answer contains placeholders absent from the request"
        );

        match self.policy {
            FidelityPolicy::Reject => Err(Error::Fidelity { introduced }),
            _ => Ok(()),
        }
    }
}
