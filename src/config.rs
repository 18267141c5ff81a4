use std::time::Duration;

use reqwest::Url;

use crate::core::table::DEFAULT_PAGE_SIZE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8087";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("page size must be at least 1")]
    PageSize,
}

/// Runtime settings shared by the GUI and the command-line front end.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the REST API; `/employees` is appended to it.
    pub base_url: Url,
    /// No timeout when `None`.
    pub request_timeout: Option<Duration>,
    pub page_size: usize,
}

impl Config {
    pub fn new(
        base_url: &str,
        request_timeout: Option<Duration>,
        page_size: usize,
    ) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::BaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::BaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if page_size == 0 {
            return Err(ConfigError::PageSize);
        }
        Ok(Self {
            base_url: parsed,
            request_timeout,
            page_size,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
