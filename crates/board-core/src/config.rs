use serde::{Deserialize, Serialize};

use super::platform;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the board site; listings are fetched from
    /// `<base_url>/api/listings`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Background refresh interval.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Cap on visible listings per tab.  Unset shows all of them.
    #[serde(default)]
    pub take: Option<usize>,
    /// Show the "View All" escape hatch below the tab content.
    #[serde(default)]
    pub show_view_all: bool,
    /// Target of the "View All" link.
    #[serde(default)]
    pub view_all_link: Option<String>,
    /// Filter the tab subsets by `language` in addition to the bucket rule.
    #[serde(default)]
    pub check_language: bool,
    /// Language tag to match when `check_language` is set (e.g. "en").
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            take: None,
            show_view_all: false,
            view_all_link: None,
            check_language: false,
            language: None,
        }
    }
}

fn default_base_url() -> String {
    "https://earn.superteam.fun".to_string()
}

fn default_poll_interval_secs() -> u64 {
    300
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api.base_url.starts_with("https://"));
        assert_eq!(config.api.poll_interval_secs, 300);
        assert_eq!(config.ui.take, None);
        assert!(!config.ui.show_view_all);
        assert!(!config.ui.check_language);
    }

    #[test]
    fn test_partial_toml_uses_field_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ui]
            take = 5
            show_view_all = true
            view_all_link = "https://earn.superteam.fun/all"
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.take, Some(5));
        assert!(config.ui.show_view_all);
        assert_eq!(config.api.poll_interval_secs, 300);
        assert!(!config.ui.check_language);
    }
}
