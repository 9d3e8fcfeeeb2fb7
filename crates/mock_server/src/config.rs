use std::{collections::HashMap, fs, net::SocketAddr, path::Path};

use anyhow::Context;

pub const SETTINGS_FILE_NAME: &str = "mock_server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub seed_demo_users: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            seed_demo_users: true,
        }
    }
}

impl Settings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind_addr))
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE_NAME), |name| std::env::var(name).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr").and_then(|v| v.as_str()) {
                    settings.bind_addr = v.to_string();
                }
                if let Some(v) = file_cfg.get("seed_demo_users").and_then(|v| v.as_bool()) {
                    settings.seed_demo_users = v;
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unparsable settings file");
            }
        }
    }

    if let Some(v) = env("MOCK_SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__SEED_DEMO_USERS") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.seed_demo_users = parsed;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
