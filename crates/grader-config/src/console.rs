//! Console presentation settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_toast_ttl_ms() -> u64 {
    grader_core::messages::TOAST_TTL_MS
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConsoleConfig {
    /// How long a toast stays visible, in milliseconds.
    #[serde(default = "default_toast_ttl_ms")]
    pub toast_ttl_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            toast_ttl_ms: default_toast_ttl_ms(),
        }
    }
}

impl ConsoleConfig {
    #[must_use]
    pub const fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}
