//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            let mut settings = settings;
            apply_set(&mut settings, key, value)?;
            settings.save()?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Edit => {
            let config_path = Settings::default_config_path();

            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save()?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            // Try to open in editor
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply one `section.key = value` assignment to the settings.
fn apply_set(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "general.data_dir" => settings.general.data_dir = value.to_string(),
        "general.log_level" => settings.general.log_level = value.to_string(),
        "store.provider" => {
            settings.store.provider = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }
        "store.sqlite_path" => settings.store.sqlite_path = value.to_string(),
        "dictionary.path" => {
            settings.dictionary.path = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        "quiz.question_limit" => {
            settings.quiz.question_limit = value
                .parse()
                .map_err(|_| anyhow::anyhow!("quiz.question_limit must be a number"))?;
        }
        "admin.username" => settings.admin.username = value.to_string(),
        "admin.password" => settings.admin.password = value.to_string(),
        _ => anyhow::bail!("Unknown configuration key: {}", key),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreProvider;

    #[test]
    fn test_apply_set_known_keys() {
        let mut settings = Settings::default();

        apply_set(&mut settings, "store.provider", "memory").unwrap();
        assert_eq!(settings.store.provider, StoreProvider::Memory);

        apply_set(&mut settings, "quiz.question_limit", "25").unwrap();
        assert_eq!(settings.quiz.question_limit, 25);

        apply_set(&mut settings, "dictionary.path", "").unwrap();
        assert!(settings.dictionary.path.is_none());
    }

    #[test]
    fn test_apply_set_rejects_unknown_key() {
        let mut settings = Settings::default();
        assert!(apply_set(&mut settings, "no.such.key", "x").is_err());
        assert!(apply_set(&mut settings, "quiz.question_limit", "lots").is_err());
    }
}
