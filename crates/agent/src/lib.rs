//! The ask pipeline, the heart of MaskRAG.
//!
//! One request flows through three steps, in strict sequence:
//!
//! 1. **Route** the requested mode to a prompt template (unknown → `general`)
//! 2. **Compile** the template against the query and the masked messages
//! 3. **Complete** the prompt via the configured provider
//!
//! The answer is returned together with the mode actually used, so callers
//! can see a silent fallback. An optional fidelity check flags answers that
//! contain placeholders the prompt never had.

pub mod ask;
pub mod fidelity;
pub mod prompt;

pub use ask::{AskRequest, AskResponse, AskService};
pub use fidelity::FidelityCheck;
pub use prompt::{PromptTemplate, compile, render_retrieved_block, route};

#[cfg(test)]
pub(crate) mod test_helpers;
