use anyhow::Context;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: Url,
}

pub fn load_settings() -> anyhow::Result<ClientSettings> {
    settings_from(|key| std::env::var(key).ok())
}

/// `APP__API_BASE_URL` wins over `API_BASE_URL`; blank values are ignored.
pub fn settings_from(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<ClientSettings> {
    let raw = ["APP__API_BASE_URL", "API_BASE_URL"]
        .into_iter()
        .find_map(|key| var(key).filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    Ok(ClientSettings {
        api_base_url: parse_base_url(&raw)?,
    })
}

pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid API base url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("API base url '{raw}' must use http or https");
    }
    Ok(url)
}
