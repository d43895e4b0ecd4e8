//! Backend location and client identity. The base URL comes from `--api-url`
//! or `PMB_API_URL`, falling back to the local development backend, and always
//! ends in `/api` once normalized. Configuration values are public; do not put
//! secrets here.

use anyhow::{Context, Result, anyhow};
use url::Url;

pub const ENV_API_URL: &str = "PMB_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl ApiConfig {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            user_agent: crate::APP_USER_AGENT.to_string(),
        })
    }

    /// Reads `PMB_API_URL`; unset or blank means [`DEFAULT_API_URL`].
    ///
    /// # Errors
    /// Returns an error if the configured URL is invalid.
    pub fn from_env() -> Result<Self> {
        let configured = std::env::var(ENV_API_URL)
            .ok()
            .and_then(|value| normalize_value(&value));
        let base_url = configured.as_deref().unwrap_or(DEFAULT_API_URL);
        Self::new(base_url).with_context(|| format!("invalid {ENV_API_URL}"))
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: crate::APP_USER_AGENT.to_string(),
        }
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims trailing slashes and appends `/api` unless the URL already ends with it.
///
/// # Errors
/// Returns an error if the URL does not parse, is not http(s), or has no host.
pub fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid API URL: {trimmed}"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(anyhow!("unsupported API URL scheme: {scheme}")),
    }
    if parsed.host().is_none() {
        return Err(anyhow!("API URL has no host: {trimmed}"));
    }

    if trimmed.ends_with("/api") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/api"))
    }
}
