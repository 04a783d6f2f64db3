//! # MaskRAG Core
//!
//! Domain types, traits, and error definitions for the MaskRAG prompt
//! service. This crate has **no framework dependencies**: it defines the
//! model that the provider, agent, and gateway crates build against.
//!
//! ## Placeholders
//!
//! Context messages arrive already masked. Sensitive values are replaced
//! upstream by opaque tokens such as `#amount`, `#receiver` or `#date`.
//! Nothing in this workspace resolves them; the types here only carry them
//! through unchanged.

pub mod error;
pub mod message;
pub mod mode;
pub mod placeholder;
pub mod prompt;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{CompletionError, Error, Result};
pub use message::{Message, Role};
pub use mode::Mode;
pub use prompt::{MaskedMessage, Prompt};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
