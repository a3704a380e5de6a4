//! # grader-config
//!
//! Layered configuration loading for AutoGrader using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Explicit overrides passed by the caller (e.g. `--api-url`)
//! 2. `AUTOGRADER_API_BASE_URL`, then its older spelling `AUTOGRADER_BASE_URL`
//! 3. Environment variables (`AUTOGRADER_*` prefix, `__` as separator)
//! 4. Project-level `.autograder/config.toml`
//! 5. User-level `~/.config/autograder/config.toml`
//! 6. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AUTOGRADER_API__TIMEOUT_SECS` -> `api.timeout_secs`,
//! `AUTOGRADER_CONSOLE__TOAST_TTL_MS` -> `console.toast_ttl_ms`, etc.
//! The backend URL also has a flat alias, `AUTOGRADER_API_BASE_URL`, which is the
//! one variable deployments normally set. A blank value counts as unset, so
//! `AUTOGRADER_API_BASE_URL=` leaves the lower layers (or the default) in place.
//!
//! # Usage
//!
//! ```no_run
//! use grader_config::GraderConfig;
//!
//! let config = GraderConfig::load().expect("config");
//! println!("grading backend: {}", config.api.base_url());
//! ```

mod api;
mod console;
mod defaults;
mod error;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use console::ConsoleConfig;
pub use defaults::DefaultsConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the grading backend URL.
pub const API_BASE_URL_ENV: &str = "AUTOGRADER_API_BASE_URL";

/// Name the evaluation scripts used for the backend URL. Loses to
/// [`API_BASE_URL_ENV`] when both are set.
pub const LEGACY_BASE_URL_ENV: &str = "AUTOGRADER_BASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraderConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl GraderConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT read `.env`; the binary does that before calling in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration and force the backend URL when `api_base_url` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load_with_api_override(api_base_url: Option<&str>) -> Result<Self, ConfigError> {
        let mut figment = Self::figment();
        if let Some(url) = api_base_url.filter(|url| !url.trim().is_empty()) {
            figment = figment.merge(Serialized::default("api.base_url", url));
        }
        Self::extract(figment)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".autograder/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(
            Env::prefixed("AUTOGRADER_")
                .ignore(&["API_BASE_URL", "BASE_URL", "LOG"])
                .split("__"),
        );

        // Layer 4: the flat backend URL variables, blank ones skipped
        for name in [LEGACY_BASE_URL_ENV, API_BASE_URL_ENV] {
            if let Some(url) = Self::non_blank_env(name) {
                figment = figment.merge(Serialized::default("api.base_url", url));
            }
        }
        figment
    }

    fn non_blank_env(name: &str) -> Option<String> {
        Env::var(name).filter(|value| !value.trim().is_empty())
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.console.toast_ttl_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "console.toast_ttl_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("autograder").join("config.toml"))
    }
}
