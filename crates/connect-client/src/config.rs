//! Dashboard configuration.
//!
//! Values come from an optional TOML file and are then overridden by
//! environment variables. Command-line flags override both in the CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

pub const API_BASE_ENV_VAR: &str = "CONNECT_API_BASE";
pub const API_TOKEN_ENV_VAR: &str = "CONNECT_API_TOKEN";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the backend API, without a trailing endpoint name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// Bearer token for the site manager account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Concept map to load instead of the embedded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concepts_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concepts_path: None,
        }
    }
}

impl DashboardConfig {
    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ClientError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| ClientError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `path` when given, otherwise start from defaults, then apply the
    /// process environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_from(|key| std::env::var(key).ok()))
    }

    /// Apply `CONNECT_API_BASE`, `CONNECT_API_TOKEN` and
    /// `CONNECT_CONCEPTS_PATH` from `lookup`. Empty values are ignored.
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(base) = lookup(API_BASE_ENV_VAR) {
            self.api_base_url = Some(base);
        }
        if let Some(token) = lookup(API_TOKEN_ENV_VAR) {
            self.token = Some(token);
        }
        if let Some(path) = lookup(connect_concepts::CONCEPTS_ENV_VAR) {
            self.concepts_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API base URL, or a configuration error naming what is missing.
    pub fn require_api_base(&self) -> Result<&str> {
        self.api_base_url
            .as_deref()
            .map(|base| base.trim_end_matches('/'))
            .filter(|base| !base.is_empty())
            .ok_or_else(|| ClientError::Config {
                path: PathBuf::from(API_BASE_ENV_VAR),
                message: "no API base URL configured".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_apply_to_missing_keys() {
        let config =
            DashboardConfig::from_toml_str("api_base_url = \"https://api.test/app/\"\n", Path::new("t"))
                .unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.require_api_base().unwrap(), "https://api.test/app");
        assert!(config.token.is_none());
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = [
            (API_TOKEN_ENV_VAR, "env-token"),
            (API_BASE_ENV_VAR, "  "),
            ("CONNECT_CONCEPTS_PATH", "/etc/connect/concepts.toml"),
        ]
        .into_iter()
        .collect();
        let config = DashboardConfig {
            api_base_url: Some("https://file.test".to_string()),
            token: Some("file-token".to_string()),
            ..DashboardConfig::default()
        }
        .with_env_from(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.api_base_url.as_deref(), Some("https://file.test"));
        assert_eq!(config.token.as_deref(), Some("env-token"));
        assert_eq!(
            config.concepts_path,
            Some(PathBuf::from("/etc/connect/concepts.toml"))
        );
    }

    #[test]
    fn missing_base_is_a_config_error() {
        let err = DashboardConfig::default().require_api_base().unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = DashboardConfig::from_toml_str("timeout_secs = \"soon\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config { path, .. } if path == Path::new("bad.toml")));
    }
}
