//! Bot configuration loaded from the environment.

use std::env;
use std::time::Duration;

use anyhow::{Context as _, anyhow, bail};
use rusty_pagination::parse::{parse_duration, parse_flag};
use rusty_pagination::{AfterTimeout, SessionConfig};

/// Settings read once at startup.
///
/// Command handlers drop their session handles, so the timeout is the only
/// thing that ever ends a session; zero is refused here. Sessions are always
/// posted as public channel messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    pub pagination_timeout: Duration,
    pub after_timeout: AfterTimeout,
}

impl BotConfig {
    /// Read `DISCORD_TOKEN` and the optional `PAGINATION_*` overrides.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let token = lookup("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let defaults = SessionConfig::default();

        let pagination_timeout = match lookup("PAGINATION_TIMEOUT") {
            Some(raw) => parse_duration(&raw)
                .ok_or_else(|| anyhow!("PAGINATION_TIMEOUT `{raw}` is not a duration like 90s or 2m"))?,
            None => defaults.timeout,
        };
        if pagination_timeout.is_zero() {
            bail!("PAGINATION_TIMEOUT must be greater than zero");
        }

        let after_timeout = match lookup("PAGINATION_AFTER_TIMEOUT") {
            Some(raw) => raw.parse::<AfterTimeout>().context("PAGINATION_AFTER_TIMEOUT")?,
            None => defaults.after_timeout,
        };

        if let Some(raw) = lookup("PAGINATION_EPHEMERAL") {
            let ephemeral = parse_flag(&raw)
                .ok_or_else(|| anyhow!("PAGINATION_EPHEMERAL `{raw}` is not a boolean"))?;
            if ephemeral {
                bail!("PAGINATION_EPHEMERAL is not supported: channel messages are always public");
            }
        }

        let config = Self {
            token,
            pagination_timeout,
            after_timeout,
        };
        config
            .session_config()
            .validate()
            .context("invalid pagination settings")?;
        Ok(config)
    }

    /// Fresh session configuration carrying the bot-wide defaults.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_timeout(self.pagination_timeout)
            .with_after_timeout(self.after_timeout)
    }
}
