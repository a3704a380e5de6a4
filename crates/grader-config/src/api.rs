//! Grading backend endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("autograder/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root URL of the grading backend, as configured.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset leaves the transport default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Base URL with a single trailing slash removed. A blank value falls back
    /// to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn base_url(&self) -> &str {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return DEFAULT_BASE_URL;
        }
        trimmed.strip_suffix('/').unwrap_or(trimmed)
    }

    /// Absolute URL for a backend route such as `/grade-answer`.
    #[must_use]
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url(), route.trim_start_matches('/'))
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check that the base URL is an absolute `http(s)` URL with a host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for any other scheme, a missing
    /// host, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url();
        let rest = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{url}' must start with http:// or https://"),
            })?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.starts_with(':') {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{url}' has no host"),
            });
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero when set".into(),
            });
        }

        Ok(())
    }
}
