//! Error types for the MaskRAG domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! The completion backend has its own bounded-context error.

use thiserror::Error;

/// The top-level error type for a single ask request.
#[derive(Debug, Error)]
pub enum Error {
    // --- Completion backend ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Placeholder fidelity ---
    #[error("Answer introduced unknown placeholders: {}", introduced.join(", "))]
    Fidelity { introduced: Vec<String> },

    // --- Configuration ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Short machine-readable classification, used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Completion(e) => e.kind(),
            Error::Fidelity { .. } => "fidelity",
            Error::Config { .. } => "config",
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the outbound chat-completion call.
///
/// Both variants are fatal to the request in flight. Nothing retries them.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// The request never produced a response (connect, DNS, TLS, timeout).
    #[error("Transport failure: {reason}")]
    Transport { reason: String, timed_out: bool },

    /// A response arrived but does not carry a completion.
    #[error("Upstream returned no completion (status: {status}): {body}")]
    Upstream { status: u16, body: String },
}

impl CompletionError {
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::Transport { .. } => "transport",
            CompletionError::Upstream { .. } => "upstream",
        }
    }
}
