//! Provider factory: builds the completion client from configuration.

use maskrag_config::AppConfig;
use maskrag_core::error::Error;

use crate::openai_compat::OpenAiCompatProvider;

/// Build the configured provider.
///
/// A missing credential is not an error here: offline commands (prompt
/// preview, doctor) still need a provider instance. Callers that will
/// actually send requests check `AppConfig::require_api_key` first.
pub fn build_from_config(config: &AppConfig) -> Result<OpenAiCompatProvider, Error> {
    let provider = OpenAiCompatProvider::new(
        provider_name_for(&config.api_url),
        &config.api_url,
        config.api_key.clone().unwrap_or_default(),
        &config.model,
        config.request_timeout(),
    )?
    .with_identity(&config.identity.referer, &config.identity.title);

    Ok(provider)
}

/// Derive a display name from well-known endpoint hosts.
fn provider_name_for(api_url: &str) -> &'static str {
    let host = api_url
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split(['/', ':']).next())
        .unwrap_or_default();

    match host {
        "openrouter.ai" => "openrouter",
        "api.openai.com" => "openai",
        "api.groq.com" => "groq",
        "api.deepseek.com" => "deepseek",
        "api.together.xyz" => "together",
        "localhost" | "127.0.0.1" => "local",
        _ => "openai-compatible",
    }
}
