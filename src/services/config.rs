/// Bot configuration: ~/.felix/config.json, overridable from the command line.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::services::piston::DEFAULT_API_URL;
use crate::services::session::DEFAULT_SESSION_CAPACITY;

pub const DEFAULT_PREFIX: &str = "felix ";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub discord_token: Option<String>,
    /// Piston API key, sent as the Authorization header
    #[serde(alias = "emkc_key")]
    pub api_key: Option<String>,
    pub api_url: String,
    /// Command prefixes, matched case-insensitively (e.g. "felix ")
    pub prefixes: Vec<String>,
    pub timeout_secs: u64,
    pub session_capacity: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            discord_token: None,
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            prefixes: vec![DEFAULT_PREFIX.to_string()],
            timeout_secs: 30,
            session_capacity: DEFAULT_SESSION_CAPACITY,
        }
    }
}

impl BotConfig {
    /// Prefix shown in help text
    pub fn primary_prefix(&self) -> &str {
        self.prefixes.first().map(String::as_str).unwrap_or(DEFAULT_PREFIX)
    }
}

/// Path to the config file: ~/.felix/config.json
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".felix").join("config.json"))
}

/// Load config from `path`, or from the default location when `None`.
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<BotConfig, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match config_path() {
            Some(p) => (p, false),
            None => return Ok(BotConfig::default()),
        },
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(BotConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let mut config: BotConfig = serde_json::from_str(&content)
        .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
    config.prefixes.retain(|p| !p.trim().is_empty());
    if config.prefixes.is_empty() {
        config.prefixes.push(DEFAULT_PREFIX.to_string());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.prefixes, vec!["felix ".to_string()]);
        assert_eq!(config.primary_prefix(), "felix ");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        let path = config_path().unwrap();
        assert!(path.ends_with("config.json"));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let file = write_config(r#"{"discord_token": "tok", "emkc_key": "secret"}"#);
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.discord_token.as_deref(), Some("tok"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_load_custom_prefixes() {
        let file = write_config(r#"{"prefixes": ["Felix ", "  ", "f!"]}"#);
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.prefixes, vec!["Felix ".to_string(), "f!".to_string()]);
    }

    #[test]
    fn test_load_empty_prefixes_falls_back() {
        let file = write_config(r#"{"prefixes": []}"#);
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.primary_prefix(), DEFAULT_PREFIX);
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_config("not json");
        assert!(matches!(load_config(Some(file.path())), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Read { .. })));
    }
}
