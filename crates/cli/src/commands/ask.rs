//! `maskrag ask`: Answer one query and exit.

use std::sync::Arc;

use maskrag_agent::AskService;
use maskrag_config::AppConfig;

use crate::QueryArgs;

pub async fn run(input: QueryArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Fail before building anything if there is no credential
    if config.require_api_key().is_err() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    MASKRAG_API_KEY=sk-...");
        eprintln!("    OPENROUTER_API_KEY=sk-or-v1-...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let provider = maskrag_providers::build_from_config(&config)?;
    let service = AskService::new(Arc::new(provider)).with_fidelity(config.fidelity.policy);

    let response = service
        .ask(&input.query, input.messages.as_slice(), input.mode.as_deref())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.answer);
        eprintln!("(mode: {})", response.mode_used);
    }

    Ok(())
}
