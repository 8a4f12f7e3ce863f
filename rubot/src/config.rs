//! Client configuration: constructor defaults plus env-based loading.
//! Use `RobotConfig::from_env()` then `validate()` to fail fast before init.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Production API endpoint.
pub const DEFAULT_API_URL: &str = "https://botapi.rubika.ir/v3";

/// Knobs for the HTTP client and the poll loop. Fields are public so tests and
/// embedders can point the client at another endpoint.
#[derive(Debug, Clone)]
pub struct RobotConfig {
    /// Bot token from the developer panel.
    pub token: String,
    /// Base API URL, without the trailing token segment.
    pub api_url: String,
    /// Sleep between successful polls.
    pub poll_interval: Duration,
    /// Sleep after a failed poll before retrying.
    pub error_backoff: Duration,
    /// Maximum batch size requested per poll.
    pub updates_limit: u32,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Override for the offset file; defaults to a name derived from the token.
    pub offset_file: Option<PathBuf>,
}

impl RobotConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_millis(500),
            error_backoff: Duration::from_secs(5),
            updates_limit: 50,
            request_timeout: Duration::from_secs(20),
            offset_file: None,
        }
    }

    /// Loads config from the environment (`.env` is read first if present).
    /// `RUBIKA_BOT_TOKEN` is required; `RUBIKA_API_URL`,
    /// `RUBIKA_POLL_INTERVAL_MS`, `RUBIKA_ERROR_BACKOFF_SECS` and
    /// `RUBIKA_UPDATES_LIMIT` override the defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let token = std::env::var("RUBIKA_BOT_TOKEN")
            .context("RUBIKA_BOT_TOKEN is not set")?;
        let mut config = Self::new(token);

        if let Ok(url) = std::env::var("RUBIKA_API_URL") {
            config.api_url = url;
        }
        if let Ok(interval) = std::env::var("RUBIKA_POLL_INTERVAL_MS") {
            let millis: u64 = interval
                .parse()
                .context("invalid RUBIKA_POLL_INTERVAL_MS")?;
            config.poll_interval = Duration::from_millis(millis);
        }
        if let Ok(backoff) = std::env::var("RUBIKA_ERROR_BACKOFF_SECS") {
            let secs: u64 = backoff
                .parse()
                .context("invalid RUBIKA_ERROR_BACKOFF_SECS")?;
            config.error_backoff = Duration::from_secs(secs);
        }
        if let Ok(limit) = std::env::var("RUBIKA_UPDATES_LIMIT") {
            config.updates_limit = limit.parse().context("invalid RUBIKA_UPDATES_LIMIT")?;
        }

        Ok(config)
    }

    /// Call after load() to check config before building the client.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            bail!("bot token is empty");
        }
        if self.updates_limit == 0 {
            bail!("updates limit must be positive");
        }
        Ok(())
    }
}
