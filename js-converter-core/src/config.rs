use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ledger::DEFAULT_LEDGER_PATH;
use crate::output_path::DEFAULT_CONVERTED_SUFFIX;

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "js-converter.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Where the input size ledger is kept
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Suffix for outputs written next to their own input
    #[serde(default = "default_converted_suffix")]
    pub converted_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            converted_suffix: default_converted_suffix(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from(DEFAULT_LEDGER_PATH)
}

fn default_converted_suffix() -> String {
    DEFAULT_CONVERTED_SUFFIX.to_string()
}

impl Config {
    /// Load config from js-converter.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        // Return default config if no config file exists
        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ledger.path, PathBuf::from(".afl_input_sizes.json"));
        assert_eq!(config.output.converted_suffix, "_converted");
    }

    #[test]
    fn test_load_save_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.ledger.path = PathBuf::from("fuzz/sizes.json");
        config.output.converted_suffix = "_afl".to_string();
        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.ledger.path, PathBuf::from("fuzz/sizes.json"));
        assert_eq!(loaded.output.converted_suffix, "_afl");
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[ledger]
path = "sizes.json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.ledger.path, PathBuf::from("sizes.json"));
        // Other fields should have their defaults
        assert_eq!(config.output.converted_suffix, "_converted");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[ledger\npath = 3").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
