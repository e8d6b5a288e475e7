//! Configuration management for the HeliOps CLI
//!
//! Layered as defaults, then an optional TOML file, then environment
//! variables (with `.env` loaded first by `main`).

use crate::error::{CliError, Result};
use crate::storage::StorageConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default API base URL when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File name of the TOML config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Where the session (token, user, theme) is persisted
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Object storage; uploads are unavailable without it
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: None,
            storage: None,
        }
    }
}

impl Config {
    /// Load from the default file location and the process environment
    pub fn load() -> Result<Self> {
        let file = std::env::var("HELIOPS_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| config_dir().map(|d| d.join(CONFIG_FILE_NAME)));

        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Load from an optional TOML file, then apply `lookup` overrides.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn from_sources(
        file: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match file {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path)?;
                toml::from_str(&raw)?
            },
            _ => Config::default(),
        };

        if let Some(url) = lookup("HELIOPS_API_URL") {
            config.api_url = url;
        }

        if let Some(timeout) = lookup("HELIOPS_API_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                CliError::config(format!("HELIOPS_API_TIMEOUT_SECS must be a number, got '{}'", timeout))
            })?;
        }

        if let Some(path) = lookup("HELIOPS_SESSION_FILE") {
            config.session_file = Some(PathBuf::from(path));
        }

        if let Some(storage) = StorageConfig::from_lookup(&lookup) {
            config.storage = Some(storage);
        }

        config.api_url = config.api_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Session file location, falling back to the user's config directory
    pub fn session_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }

        config_dir()
            .map(|d| d.join("session.json"))
            .ok_or_else(|| CliError::config("Could not determine config directory"))
    }

    /// Copy safe to print: storage credentials masked
    pub fn redacted(&self) -> Self {
        Self {
            storage: self.storage.as_ref().map(StorageConfig::redacted),
            ..self.clone()
        }
    }
}

/// `~/.config/heliops` on Linux, platform equivalent elsewhere
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("heliops"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| env.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(None, |_| None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.storage.is_none());
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
api_url = "https://ops.heliops.example/api/"
timeout_secs = 10

[storage]
bucket = "fleet-docs"
endpoint = "http://localhost:9000"
path_style = true
"#,
        )
        .unwrap();

        let config = Config::from_sources(
            Some(&path),
            lookup(&[("HELIOPS_API_TIMEOUT_SECS", "45")]),
        )
        .unwrap();

        assert_eq!(config.api_url, "https://ops.heliops.example/api");
        assert_eq!(config.timeout_secs, 45);
        let storage = config.storage.unwrap();
        assert_eq!(storage.bucket, "fleet-docs");
        assert_eq!(storage.region, "us-east-1");
    }

    #[test]
    fn test_env_overrides_storage() {
        let config = Config::from_sources(
            None,
            lookup(&[
                ("HELIOPS_API_URL", "http://127.0.0.1:8080"),
                ("HELIOPS_STORAGE_BUCKET", "env-bucket"),
                ("HELIOPS_STORAGE_SECRET_KEY", "s3cr3t"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.storage.as_ref().unwrap().bucket, "env-bucket");
        assert_eq!(config.redacted().storage.unwrap().secret_key, "****");
    }

    #[test]
    fn test_bad_timeout() {
        let err = Config::from_sources(None, lookup(&[("HELIOPS_API_TIMEOUT_SECS", "soon")]));
        assert!(matches!(err, Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "api_url = [").unwrap();

        assert!(matches!(
            Config::from_sources(Some(&path), |_| None),
            Err(CliError::TomlParse(_))
        ));
    }

    #[test]
    fn test_explicit_session_path() {
        let config = Config::from_sources(None, lookup(&[("HELIOPS_SESSION_FILE", "/tmp/s.json")]))
            .unwrap();
        assert_eq!(config.session_path().unwrap(), PathBuf::from("/tmp/s.json"));
    }
}
