//! Chat-completion provider implementations for MaskRAG.
//!
//! All providers implement the `maskrag_core::Provider` trait.
//! The factory builds the configured provider at startup.

pub mod factory;
pub mod openai_compat;

pub use factory::build_from_config;
pub use openai_compat::OpenAiCompatProvider;
