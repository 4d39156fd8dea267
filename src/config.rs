use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default = "default_translation_config")]
    pub translation: TranslationConfig,
    #[serde(default = "default_limits_config")]
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// Username without the leading '@'. Resolved through getMe when unset.
    #[serde(default)]
    pub bot_username: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranslationConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Target used by the group mention rule when no code follows the mention
    #[serde(default = "default_target")]
    pub default_target: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    /// Replies longer than this (in characters) are sent as a text document
    #[serde(default = "default_inline_reply_max_chars")]
    pub inline_reply_max_chars: usize,
    /// Extracted document text is cut to this many characters before translation
    #[serde(default = "default_file_source_max_chars")]
    pub file_source_max_chars: usize,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_target() -> String {
    "en".to_string()
}

fn default_inline_reply_max_chars() -> usize {
    3500
}

fn default_file_source_max_chars() -> usize {
    4000
}

fn default_max_file_bytes() -> u64 {
    // Bot API download ceiling
    20 * 1024 * 1024
}

fn default_translation_config() -> TranslationConfig {
    TranslationConfig {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        default_target: default_target(),
    }
}

fn default_limits_config() -> LimitsConfig {
    LimitsConfig {
        inline_reply_max_chars: default_inline_reply_max_chars(),
        file_source_max_chars: default_file_source_max_chars(),
        max_file_bytes: default_max_file_bytes(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            translation: default_translation_config(),
            limits: default_limits_config(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file, then overlay the process
    /// environment. `required` controls whether a missing file is an error.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else if required {
            anyhow::bail!("Config file not found: {}", path.display());
        } else {
            Config::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid TOML configuration")?;
        Ok(config)
    }

    /// Overlay values from the environment. Empty variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get("BOT_TOKEN") {
            self.telegram.bot_token = token.trim().to_string();
        }
        if let Some(username) = get("BOT_USERNAME") {
            self.telegram.bot_username = Some(username);
        }
        if let Some(url) = get("TRANSLATOR_BASE_URL") {
            self.translation.base_url = url;
        }

        self.telegram.bot_username = self
            .telegram
            .bot_username
            .take()
            .map(|name| name.trim().trim_start_matches('@').to_string())
            .filter(|name| !name.is_empty());
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is not set (environment or [telegram] bot_token)");
        }
        if self.limits.inline_reply_max_chars == 0 || self.limits.file_source_max_chars == 0 {
            anyhow::bail!("[limits] character limits must be greater than zero");
        }
        if self.translation.default_target.trim().is_empty() {
            anyhow::bail!("[translation] default_target must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = Config::from_toml_str("[telegram]\nbot_token = \"abc\"\n").unwrap();
        assert_eq!(config.telegram.bot_token, "abc");
        assert_eq!(config.translation.default_target, "en");
        assert_eq!(config.translation.timeout_secs, 15);
        assert_eq!(config.limits.inline_reply_max_chars, 3500);
        assert_eq!(config.limits.file_source_max_chars, 4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::from_toml_str(
            r#"
            [telegram]
            bot_token = "from-file"
            bot_username = "filebot"
            "#,
        )
        .unwrap();
        let vars = env(&[("BOT_TOKEN", "from-env"), ("BOT_USERNAME", "@EnvBot")]);
        config.apply_env(|k| vars.get(k).cloned());

        assert_eq!(config.telegram.bot_token, "from-env");
        assert_eq!(config.telegram.bot_username.as_deref(), Some("EnvBot"));
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let mut config = Config::default();
        let vars = env(&[("BOT_USERNAME", "somebot")]);
        config.apply_env(|k| vars.get(k).cloned());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = Config::from_toml_str("[telegram]\nbot_token = \"keep\"\n").unwrap();
        let vars = env(&[("BOT_TOKEN", "   "), ("BOT_USERNAME", "")]);
        config.apply_env(|k| vars.get(k).cloned());

        assert_eq!(config.telegram.bot_token, "keep");
        assert!(config.telegram.bot_username.is_none());
    }

    #[test]
    fn test_limits_section() {
        let config = Config::from_toml_str(
            r#"
            [telegram]
            bot_token = "t"

            [limits]
            inline_reply_max_chars = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.limits.inline_reply_max_chars, 100);
        assert_eq!(config.limits.file_source_max_chars, 4000);
        assert_eq!(config.limits.max_file_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(&path, true).is_err());
    }
}
