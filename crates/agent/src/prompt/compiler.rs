//! Prompt compiler.
//!
//! Pure and deterministic: the same template, query and messages always
//! produce the same prompt. Empty queries and empty message lists are
//! valid and yield a well-formed prompt with an empty context block.

use maskrag_core::prompt::Prompt;
use tracing::trace;

use super::retrieved::render_retrieved_block;
use super::templates::PromptTemplate;

/// Render `template` against `query` and `messages`, trimming the result.
pub fn compile<S: AsRef<str>>(template: PromptTemplate, query: &str, messages: &[S]) -> Prompt {
    let block = render_retrieved_block(messages);
    let prompt = Prompt::new(template.render(query, &block));
    trace!(
        template = ?template,
        messages = messages.len(),
        chars = prompt.as_str().len(),
        "Compiled prompt"
    );
    prompt
}
