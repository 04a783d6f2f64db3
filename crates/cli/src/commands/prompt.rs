//! `maskrag prompt`: print the compiled prompt without sending it.
//!
//! Needs no credential.

use maskrag_agent::{compile, route};

use crate::QueryArgs;

pub fn run(input: QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let template = route(input.mode.as_deref());
    let prompt = compile(template, &input.query, input.messages.as_slice());

    eprintln!(
        "# mode: {} | messages: {} | ~{} tokens",
        template.mode(),
        input.messages.len(),
        prompt.estimated_tokens()
    );
    println!("{prompt}");

    Ok(())
}
