//! Prompt construction.
//!
//! | Step | Module | Contract |
//! |------|--------|----------|
//! | Registry | `templates` | closed set of persona + rule templates |
//! | Router | `router` | mode string → template, never fails |
//! | Compiler | `compiler` | template + query + messages → trimmed `Prompt` |
//!
//! Every template shares the numbered `retrieved` block. Query and message
//! text is embedded byte-for-byte: no escaping, truncation or reordering.

pub mod compiler;
pub mod retrieved;
pub mod router;
pub mod templates;

pub use compiler::compile;
pub use retrieved::render_retrieved_block;
pub use router::route;
pub use templates::PromptTemplate;
