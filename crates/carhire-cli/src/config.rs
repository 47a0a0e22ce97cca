//! Configuration file handling for carhire-cli

use anyhow::{Context, Result};
use carhire_client::ClientConfig;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API domain
    pub domain: Option<String>,
    /// SDK key
    pub sdk_key: Option<String>,
    /// Default output format
    pub output: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("carhire-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(
        &self,
        domain: Option<&str>,
        sdk_key: Option<&str>,
        output: Option<OutputFormat>,
        no_color: bool,
    ) -> MergedConfig {
        MergedConfig {
            domain: domain.map(String::from).or_else(|| self.domain.clone()),
            sdk_key: sdk_key.map(String::from).or_else(|| self.sdk_key.clone()),
            output: output
                .or_else(|| {
                    self.output
                        .as_deref()
                        .and_then(|name| OutputFormat::from_str(name, true).ok())
                })
                .unwrap_or_default(),
            no_color: no_color || self.no_color.unwrap_or(false),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub domain: Option<String>,
    pub sdk_key: Option<String>,
    pub output: OutputFormat,
    pub no_color: bool,
    pub request_timeout_ms: Option<u64>,
}

impl MergedConfig {
    /// Client configuration for the merged settings
    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder();
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain);
        }
        if let Some(key) = &self.sdk_key {
            builder = builder.sdk_key(key);
        }
        if let Some(ms) = self.request_timeout_ms {
            builder = builder.request_timeout_ms(ms);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "domain = \"https://api.test\"\nsdk_key = \"abc\"\nrequest_timeout_ms = 5000"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.domain.as_deref(), Some("https://api.test"));
        assert_eq!(config.sdk_key.as_deref(), Some("abc"));
        assert_eq!(config.request_timeout_ms, Some(5000));
        assert!(config.output.is_none());
    }

    #[test]
    fn test_args_override_file() {
        let config = Config {
            domain: Some("https://file.test".to_string()),
            sdk_key: Some("file-key".to_string()),
            output: Some("json".to_string()),
            no_color: Some(true),
            ..Default::default()
        };

        let merged = config.merge_with_args(Some("https://cli.test"), None, None, false);
        assert_eq!(merged.domain.as_deref(), Some("https://cli.test"));
        assert_eq!(merged.sdk_key.as_deref(), Some("file-key"));
        assert_eq!(merged.output, OutputFormat::Json);
        assert!(merged.no_color);

        let client = merged.client_config();
        assert_eq!(client.connection.domain.as_deref(), Some("https://cli.test"));
        assert_eq!(client.connection.sdk_key.as_deref(), Some("file-key"));

        let merged = config.merge_with_args(None, None, Some(OutputFormat::Csv), false);
        assert_eq!(merged.output, OutputFormat::Csv);
        assert_eq!(merged.domain.as_deref(), Some("https://file.test"));
    }

    #[test]
    fn test_bad_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "domain = [").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
