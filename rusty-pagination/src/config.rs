//! Per-session configuration values.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::controls::LONGEST_ID_SUFFIX;
use crate::error::ValidationError;
use crate::validate;

/// Default timeout for pagination sessions.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
/// Lifetime of the platform's interaction token; edits are impossible afterwards.
pub const INTERACTION_TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);
/// Generic message shown when a pagination session expired.
pub const DEFAULT_TIMEOUT_NOTICE: &str = "This pagination session expired. Run the command again.";

/// What happens to the message once the session times out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AfterTimeout {
    Delete,
    /// Disable every control and append the timeout notice.
    #[default]
    Disable,
}

impl FromStr for AfterTimeout {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(AfterTimeout::Delete),
            "disable" => Ok(AfterTimeout::Disable),
            other => Err(ValidationError::new(
                "after_timeout",
                format!("{other:?}"),
                "`delete` or `disable`",
            )),
        }
    }
}

impl fmt::Display for AfterTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AfterTimeout::Delete => f.write_str("delete"),
            AfterTimeout::Disable => f.write_str("disable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Not every transport can deliver ephemeral messages; the channel
    /// transport posts publicly and logs a warning.
    pub ephemeral: bool,
    /// Zero disables automatic expiry; the owner must then keep the session
    /// and call `stop` itself.
    pub timeout: Duration,
    pub start_page: usize,
    pub after_timeout: AfterTimeout,
    /// Upper bound for `timeout`.
    pub max_timeout: Duration,
    /// Prefix for control ids; generated when absent.
    pub custom_id: Option<String>,
    pub timeout_notice: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ephemeral: false,
            timeout: DEFAULT_TIMEOUT,
            start_page: 0,
            after_timeout: AfterTimeout::default(),
            max_timeout: INTERACTION_TOKEN_LIFETIME,
            custom_id: None,
            timeout_notice: DEFAULT_TIMEOUT_NOTICE.to_owned(),
        }
    }
}

impl SessionConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_start_page(mut self, page: usize) -> Self {
        self.start_page = page;
        self
    }

    pub fn with_after_timeout(mut self, policy: AfterTimeout) -> Self {
        self.after_timeout = policy;
        self
    }

    pub fn with_custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    pub fn with_ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::timeout(self.timeout, self.max_timeout)?;
        if let Some(custom_id) = &self.custom_id {
            validate::custom_id("custom_id", custom_id)?;
            validate::composed_id_length(custom_id, LONGEST_ID_SUFFIX)?;
        }
        Ok(())
    }
}
