// src/cvpr/config.rs
use std::time::Duration;

/// Accepted-papers listing; `{year}` is replaced with the conference year.
pub const DEFAULT_BASE_URL: &str = "https://cvpr.thecvf.com/Conferences/{year}/AcceptedPapers";

// The conference site serves a reduced page to unknown agents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_ENV: &str = "CVPR_BASE_URL";
pub const USER_AGENT_ENV: &str = "CVPR_USER_AGENT";
pub const TIMEOUT_ENV: &str = "CVPR_TIMEOUT_SECS";

/// Settings for fetching the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `CVPR_BASE_URL`, `CVPR_USER_AGENT` and
    /// `CVPR_TIMEOUT_SECS` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using {} from environment: {}", BASE_URL_ENV, url);
            config.base_url = url.trim().to_string();
        }
        if let Some(agent) = lookup(USER_AGENT_ENV).filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid {}='{}'", TIMEOUT_ENV, raw),
            }
        }

        config
    }

    /// Listing URL for a conference year.
    pub fn page_url(&self, year: u32) -> String {
        self.base_url.replace("{year}", &year.to_string())
    }
}
