use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound the framework accepts for the Touch ID reuse window.
pub const MAX_REUSE_DURATION: Duration = Duration::from_secs(300);

pub const ENV_TIMEOUT_MS: &str = "LOCALAUTH_TIMEOUT_MS";
pub const ENV_CANCEL_TITLE: &str = "LOCALAUTH_CANCEL_TITLE";
pub const ENV_FALLBACK_TITLE: &str = "LOCALAUTH_FALLBACK_TITLE";
pub const ENV_REUSE_SECS: &str = "LOCALAUTH_REUSE_SECS";

/// Per-evaluation settings applied to a fresh session before the request
/// is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateOptions {
    /// Give up and dismiss the prompt after this many milliseconds. `None`
    /// waits for the OS indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Replaces the prompt's "Cancel" button title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_title: Option<String>,
    /// Replaces the "Enter Password" fallback title. An empty string hides
    /// the fallback button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_title: Option<String>,
    /// Accept a Touch ID unlock this many seconds old without prompting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reuse_duration_secs: Option<f64>,
}

impl EvaluateOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_cancel_title(mut self, title: impl Into<String>) -> Self {
        self.cancel_title = Some(title.into());
        self
    }

    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = Some(title.into());
        self
    }

    pub fn with_reuse_duration(mut self, duration: Duration) -> Self {
        self.reuse_duration_secs = Some(duration.as_secs_f64());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// The reuse window clamped to `0..=MAX_REUSE_DURATION`.
    pub fn reuse_duration(&self) -> Option<Duration> {
        self.reuse_duration_secs.map(|secs| {
            if secs.is_finite() && secs > 0.0 {
                Duration::from_secs_f64(secs.min(MAX_REUSE_DURATION.as_secs_f64()))
            } else {
                Duration::ZERO
            }
        })
    }

    /// Reads `LOCALAUTH_*` environment variables. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms = match lookup(ENV_TIMEOUT_MS) {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_MS,
                    value,
                }
            })?),
            None => None,
        };

        let reuse_duration_secs = match lookup(ENV_REUSE_SECS) {
            Some(value) => match value.trim().parse::<f64>() {
                Ok(secs) if secs.is_finite() && secs >= 0.0 => Some(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_REUSE_SECS,
                        value,
                    })
                }
            },
            None => None,
        };

        Ok(Self {
            timeout_ms,
            cancel_title: lookup(ENV_CANCEL_TITLE),
            fallback_title: lookup(ENV_FALLBACK_TITLE),
            reuse_duration_secs,
        })
    }
}
