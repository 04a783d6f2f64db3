//! `maskrag modes`: List available modes.

use maskrag_agent::PromptTemplate;

pub fn run() {
    println!("Available modes:\n");
    for template in PromptTemplate::ALL {
        println!("  {:<16} {}", template.mode().as_str(), template.persona());
    }
    println!("\nUnknown or missing modes fall back to `general`.");
}
