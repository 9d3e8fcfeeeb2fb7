use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.aethondigital.com/api";
pub const CONFIG_FILE_NAME: &str = "user_console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl ClientConfig {
    /// Applies a command-line override on top of file and env settings.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> anyhow::Result<Self> {
        if let Some(base_url) = base_url {
            self.api_base_url = normalize_base_url(&base_url)?;
        }
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
}

pub fn load_client_config() -> anyhow::Result<ClientConfig> {
    load_client_config_from(&config_file_candidates(), |name| std::env::var(name).ok())
}

pub fn load_client_config_from(
    files: &[PathBuf],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::default();

    for path in files {
        if let Some(file_cfg) = read_config_file(path)? {
            if let Some(v) = file_cfg.api_base_url {
                config.api_base_url = v;
            }
        }
    }

    if let Some(v) = env("USERS_API_BASE_URL") {
        config.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        config.api_base_url = v;
    }

    config.api_base_url = normalize_base_url(&config.api_base_url)
        .context("api base url from configuration is unusable")?;
    Ok(config)
}

fn config_file_candidates() -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        files.push(dir.join("user_console").join("config.toml"));
    }
    files.push(PathBuf::from(CONFIG_FILE_NAME));
    if let Ok(path) = std::env::var("USER_CONSOLE_CONFIG") {
        if !path.trim().is_empty() {
            files.push(PathBuf::from(path));
        }
    }
    files
}

fn read_config_file(path: &Path) -> anyhow::Result<Option<FileConfig>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };
    let parsed = toml::from_str::<FileConfig>(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(Some(parsed))
}

/// Trims whitespace and trailing slashes and requires an http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
