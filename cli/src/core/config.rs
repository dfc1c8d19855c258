use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use formbase::ClientConfig;
use formbase::client::DEFAULT_TIMEOUT_SECS;
use formbase::query::{FIELD_ENDPOINT, RECORD_ENDPOINT};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_API_URL};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// REST API configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ApiFileConfig {
    pub base_url: Option<String>,
    pub record_endpoint: Option<String>,
    pub field_endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub api: Option<ApiFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(api) = other.api {
            let current = self.api.get_or_insert_with(ApiFileConfig::default);
            if api.base_url.is_some() {
                tracing::trace!(base_url = ?api.base_url, "Merging api.base_url");
                current.base_url = api.base_url;
            }
            if api.record_endpoint.is_some() {
                tracing::trace!(record_endpoint = ?api.record_endpoint, "Merging api.record_endpoint");
                current.record_endpoint = api.record_endpoint;
            }
            if api.field_endpoint.is_some() {
                tracing::trace!(field_endpoint = ?api.field_endpoint, "Merging api.field_endpoint");
                current.field_endpoint = api.field_endpoint;
            }
            if api.timeout_secs.is_some() {
                tracing::trace!(timeout_secs = ?api.timeout_secs, "Merging api.timeout_secs");
                current.timeout_secs = api.timeout_secs;
            }
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub record_endpoint: String,
    pub field_endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
}

impl AppConfig {
    /// Load configuration with priority (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Profile directory config (~/.formbase/formbase.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_layered(cli, get_profile_config_path())
    }

    fn load_layered(cli: &CliConfig, profile_path: Option<PathBuf>) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir - skip if not exists
        if let Some(profile_path) = profile_path
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Layer configs: defaults -> file config -> CLI/env overrides
        let file_api = file_config.api.unwrap_or_default();

        let api = ApiConfig {
            base_url: cli
                .api_url
                .clone()
                .or(file_api.base_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            record_endpoint: file_api
                .record_endpoint
                .unwrap_or_else(|| RECORD_ENDPOINT.to_string()),
            field_endpoint: file_api
                .field_endpoint
                .unwrap_or_else(|| FIELD_ENDPOINT.to_string()),
            timeout_secs: cli
                .timeout_secs
                .or(file_api.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let config = Self { api };
        config.validate()?;
        tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        let base_url = &self.api.base_url;
        if base_url.is_empty() {
            anyhow::bail!("Configuration error: api.base_url must not be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!(
                "Configuration error: api.base_url must start with http:// or https:// (got '{}')",
                base_url
            );
        }

        for (name, endpoint) in [
            ("api.record_endpoint", &self.api.record_endpoint),
            ("api.field_endpoint", &self.api.field_endpoint),
        ] {
            if !endpoint.starts_with('/') {
                anyhow::bail!(
                    "Configuration error: {} must start with '/' (got '{}')",
                    name,
                    endpoint
                );
            }
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("Configuration error: api.timeout_secs must be greater than 0");
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            record_endpoint: self.api.record_endpoint.clone(),
            field_endpoint: self.api.field_endpoint.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }
}

/// Get the profile config path (~/.formbase/formbase.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
