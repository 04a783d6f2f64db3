//! `maskrag doctor`: Diagnose configuration.

use maskrag_config::AppConfig;
use maskrag_core::provider::Provider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("MaskRAG Doctor — Configuration Diagnostics");
    println!("==========================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  [ok]   Config file: {}", config_path.display());
    } else {
        println!("  [info] No config file at {}, using defaults", config_path.display());
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  [ok]   Configuration valid");
            config
        }
        Err(e) => {
            println!("  [fail] Configuration invalid: {e}");
            println!("\n  Example config.toml:\n");
            for line in AppConfig::default_toml().lines() {
                println!("    {line}");
            }
            return Ok(());
        }
    };

    let provider = maskrag_providers::build_from_config(&config)?;
    println!("  [ok]   Provider: {} ({})", provider.name(), provider.api_url());
    println!("  [ok]   Model: {}", provider.model());
    println!(
        "  [ok]   Timeout: {}s, fidelity policy: {:?}",
        config.request_timeout_secs, config.fidelity.policy
    );

    match provider.health_check().await {
        Ok(true) => println!("  [ok]   API key configured"),
        _ => {
            println!("  [warn] No API key: set MASKRAG_API_KEY or OPENROUTER_API_KEY");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
