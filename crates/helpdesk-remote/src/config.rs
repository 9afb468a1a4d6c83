use std::time::Duration;

use helpdesk_core::CoreError;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the HTTP ticket store.
///
/// No secret material lives here; the session credential is a cookie held
/// by the HTTP client's jar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
    pub http_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("HELPDESK_API_URL") {
            let base_url = base_url.trim();
            if !base_url.is_empty() {
                config.base_url = base_url.trim_end_matches('/').to_owned();
            }
        }
        if let Ok(raw) = std::env::var("HELPDESK_HTTP_TIMEOUT_SECS") {
            config.http_timeout = parse_timeout_secs(&raw)?;
        }

        Ok(config)
    }
}

fn parse_timeout_secs(value: &str) -> Result<Duration, CoreError> {
    let seconds = value.trim().parse::<u64>().map_err(|_| {
        CoreError::validation("HELPDESK_HTTP_TIMEOUT_SECS must be an unsigned integer")
    })?;
    if seconds == 0 {
        return Err(CoreError::validation(
            "HELPDESK_HTTP_TIMEOUT_SECS must be greater than zero",
        ));
    }

    Ok(Duration::from_secs(seconds))
}
