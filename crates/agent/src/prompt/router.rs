//! Prompt router.
//!
//! Total over its input: `private_finance` and `learning` match exactly
//! (case-sensitive), everything else, including absent and empty values,
//! falls back to `general`. Routing never fails.

use maskrag_core::mode::Mode;
use tracing::debug;

use super::templates::PromptTemplate;

/// Select the template for a requested mode.
pub fn route(mode: Option<&str>) -> PromptTemplate {
    match mode.and_then(Mode::from_name) {
        Some(mode) => PromptTemplate::for_mode(mode),
        None => {
            if let Some(requested) = mode.filter(|m| !m.is_empty()) {
                debug!(requested, "Unknown mode, falling back to general");
            }
            PromptTemplate::General
        }
    }
}
