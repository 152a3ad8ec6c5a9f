use std::{
    collections::HashMap,
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind_host: String,
    pub port: u16,
    pub response_delay_ms: u64,
    pub customers_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            response_delay_ms: 500,
            customers_path: None,
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let raw = format!("{}:{}", self.bind_host.trim(), self.port);
        raw.parse()
            .with_context(|| format!("invalid bind address '{raw}'"))
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new("server.toml"));
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) else {
        tracing::warn!(path = %path.display(), "ignoring unparsable settings file");
        return;
    };

    if let Some(v) = file_cfg.get("bind_host") {
        settings.bind_host = v.clone();
    }
    if let Some(port) = file_cfg.get("port").and_then(|v| v.trim().parse().ok()) {
        settings.port = port;
    }
    if let Some(delay) = file_cfg
        .get("response_delay_ms")
        .and_then(|v| v.trim().parse().ok())
    {
        settings.response_delay_ms = delay;
    }
    if let Some(v) = file_cfg.get("customers_path") {
        settings.customers_path = Some(PathBuf::from(v));
    }
}

/// Later keys in each list win, so `APP__*` overrides the plain name.
pub(crate) fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    for key in ["SERVER_HOST", "APP__BIND_HOST"] {
        if let Some(v) = var(key) {
            settings.bind_host = v;
        }
    }

    for key in ["PORT", "APP__PORT"] {
        if let Some(port) = var(key).and_then(|v| v.trim().parse::<u16>().ok()) {
            settings.port = port;
        }
    }

    if let Some(delay) = var("APP__RESPONSE_DELAY_MS").and_then(|v| v.trim().parse().ok()) {
        settings.response_delay_ms = delay;
    }

    for key in ["CUSTOMERS_PATH", "APP__CUSTOMERS_PATH"] {
        if let Some(v) = var(key).filter(|v| !v.trim().is_empty()) {
            settings.customers_path = Some(PathBuf::from(v));
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
