//! Application configuration: CRM endpoint, LLM endpoint/model, logging.
//!
//! Defaults work out of the box; a TOML file and `HUBLENS_*` environment
//! variables layer on top. Credentials are deliberately not configuration:
//! the front-end owns them and passes them into each pipeline call.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub crm: CrmConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct CrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            crm: CrmConfig { base_url: "https://api.hubapi.com".to_string(), timeout_secs: 30 },
            llm: LlmConfig {
                base_url: "https://api.openai.com".to_string(),
                model: "gpt-4".to_string(),
                timeout_secs: 30,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl AppConfig {
    /// Load defaults, then the optional TOML file, then env overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = config_path {
            let raw = fs::read_to_string(path)
                .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
            let file: FileConfig = toml::from_str(&raw)
                .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })?;
            config.apply_file(file);
        }
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(base_url) = file.crm.base_url {
            self.crm.base_url = base_url;
        }
        if let Some(timeout_secs) = file.crm.timeout_secs {
            self.crm.timeout_secs = timeout_secs;
        }
        if let Some(base_url) = file.llm.base_url {
            self.llm.base_url = base_url;
        }
        if let Some(model) = file.llm.model {
            self.llm.model = model;
        }
        if let Some(timeout_secs) = file.llm.timeout_secs {
            self.llm.timeout_secs = timeout_secs;
        }
        if let Some(level) = file.logging.level {
            self.logging.level = level;
        }
        if let Some(format) = file.logging.format {
            self.logging.format = format;
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(base_url) = env::var("HUBLENS_CRM_BASE_URL") {
            self.crm.base_url = base_url;
        }
        if let Ok(base_url) = env::var("HUBLENS_LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Ok(model) = env::var("HUBLENS_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(level) = env::var("HUBLENS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = env::var("HUBLENS_LOG_FORMAT") {
            self.logging.format = parse_log_format(&format).ok_or_else(|| {
                ConfigError::InvalidEnvOverride {
                    key: "HUBLENS_LOG_FORMAT".to_string(),
                    value: format.clone(),
                }
            })?;
        }
        Ok(())
    }
}

fn parse_log_format(raw: &str) -> Option<LogFormat> {
    match raw.to_ascii_lowercase().as_str() {
        "compact" => Some(LogFormat::Compact),
        "pretty" => Some(LogFormat::Pretty),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    crm: FileCrm,
    #[serde(default)]
    llm: FileLlm,
    #[serde(default)]
    logging: FileLogging,
}

#[derive(Debug, Default, Deserialize)]
struct FileCrm {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileLlm {
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, FileConfig, LogFormat};

    #[test]
    fn defaults_point_at_hosted_services() {
        let config = AppConfig::default();
        assert_eq!(config.crm.base_url, "https://api.hubapi.com");
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_sections_are_all_optional() {
        let file: FileConfig = toml::from_str(
            r#"
            [llm]
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        let mut config = AppConfig::default();
        config.apply_file(file);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.crm.base_url, "https://api.hubapi.com");
    }

    #[test]
    fn file_overrides_every_section() {
        let file: FileConfig = toml::from_str(
            r#"
            [crm]
            base_url = "http://localhost:8081"
            timeout_secs = 5

            [llm]
            base_url = "http://localhost:11434"
            model = "llama3.1"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();
        let mut config = AppConfig::default();
        config.apply_file(file);
        assert_eq!(config.crm.base_url, "http://localhost:8081");
        assert_eq!(config.crm.timeout_secs, 5);
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
