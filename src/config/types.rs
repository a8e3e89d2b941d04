//! Export Types
//!
//! The object consumed by the host framework at startup:
//! `{ projectConfig, plugins, modules }`.

use serde::{Deserialize, Serialize};

use super::env::EnvFileStatus;
use super::mode::Mode;
use super::settings::ProjectConfig;
use crate::modules::Modules;
use crate::plugins::Plugin;
use crate::types::{ConfigError, Result};

/// Root export object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigModule {
    pub project_config: ProjectConfig,
    pub plugins: Vec<Plugin>,
    pub modules: Modules,
}

// =============================================================================
// Rendering
// =============================================================================

/// Export encodings understood by the host tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl std::str::FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl ConfigModule {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => self.to_json_pretty(),
            ExportFormat::Yaml => self.to_yaml(),
        }
    }

    /// Strict parse: unknown keys and plugins are rejected
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn parse(raw: &str, format: ExportFormat) -> Result<Self> {
        match format {
            ExportFormat::Json => Self::from_json(raw),
            ExportFormat::Yaml => Self::from_yaml(raw),
        }
    }
}

// =============================================================================
// Load Result
// =============================================================================

/// Assembled export plus what the loader saw on the way
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub mode: Mode,
    pub env_file: EnvFileStatus,
    pub module: ConfigModule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_parse() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("YML".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!(matches!(
            "toml".parse::<ExportFormat>(),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
