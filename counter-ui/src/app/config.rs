//! Application configuration
//!
//! Loaded from `counter-ui.toml`; every section and key is optional.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::context::{Theme, ThemeMode};
use crate::error::UiError;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "counter-ui.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub theme: ThemeConfig,
    pub log: LogConfig,
}

/// [window] section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub decorations: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Counter".to_string(),
            width: 360,
            height: 240,
            resizable: true,
            decorations: true,
        }
    }
}

/// [theme] section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
}

/// [log] section. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

impl AppConfig {
    /// Parse configuration from TOML content
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
    
    pub fn load(path: &Path) -> Result<Self, UiError> {
        let content = fs::read_to_string(path).map_err(|source| UiError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| UiError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
    
    /// Load [`DEFAULT_CONFIG_FILE`] from `dir` if it exists, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self, UiError> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
    
    pub fn theme(&self) -> Theme {
        Theme::from_mode(self.theme.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = "[window]\ntitle = \"Tally\"\nwidth = 500\n\n[theme]\nmode = \"light\"\n\n[log]\nfilter = \"counter_ui=debug\"";
        let config = AppConfig::parse(toml).unwrap();

        assert_eq!(config.window.title, "Tally");
        assert_eq!(config.window.width, 500);
        assert_eq!(config.window.height, 240);
        assert!(config.window.resizable);
        assert_eq!(config.theme.mode, ThemeMode::Light);
        assert_eq!(config.log.filter, "counter_ui=debug");
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(AppConfig::parse("[window]\ntitel = \"typo\"").is_err());
        assert!(AppConfig::parse("[theme]\nmode = \"sepia\"").is_err());
    }

    #[test]
    fn test_discover_and_load() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(AppConfig::discover(dir.path()).unwrap(), AppConfig::default());

        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[window]\nheight = 99").unwrap();
        assert_eq!(AppConfig::discover(dir.path()).unwrap().window.height, 99);

        fs::write(&path, "[window]\nheight = \"tall\"").unwrap();
        assert!(matches!(AppConfig::discover(dir.path()), Err(UiError::ConfigParse { .. })));

        let missing = AppConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(UiError::Config { .. })));
    }
}
