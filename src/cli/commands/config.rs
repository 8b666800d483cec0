//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, mut settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            apply_setting(&mut settings, key, value)?;
            settings.save()?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a dotted-key setting to the configuration.
fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "general.log_level" => settings.general.log_level = value.to_string(),
        "chunking.chunk_size" => settings.chunking.chunk_size = value.parse()?,
        "chunking.chunk_overlap" => settings.chunking.chunk_overlap = value.parse()?,
        "embedding.model" => settings.embedding.model = value.to_string(),
        "embedding.dimensions" => settings.embedding.dimensions = value.parse()?,
        "embedding.max_concurrent_batches" => {
            settings.embedding.max_concurrent_batches = value.parse()?
        }
        "retrieval.top_k" => settings.retrieval.top_k = value.parse()?,
        "generation.model" => settings.generation.model = value.to_string(),
        "generation.temperature" => settings.generation.temperature = value.parse()?,
        "generation.timeout_seconds" => settings.generation.timeout_seconds = value.parse()?,
        _ => {
            return Err(anyhow::anyhow!(
                "Unknown configuration key: {} (see 'quizgen config show' for available keys)",
                key
            ))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_setting() {
        let mut settings = Settings::default();
        apply_setting(&mut settings, "retrieval.top_k", "5").unwrap();
        assert_eq!(settings.retrieval.top_k, 5);

        apply_setting(&mut settings, "generation.model", "gpt-4o").unwrap();
        assert_eq!(settings.generation.model, "gpt-4o");
    }

    #[test]
    fn test_apply_unknown_setting_fails() {
        let mut settings = Settings::default();
        assert!(apply_setting(&mut settings, "no.such.key", "1").is_err());
    }
}
