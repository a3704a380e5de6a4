//! Self-expiring notifications.

use std::time::{Duration, Instant};

use grader_core::ToastTone;

/// A notification that disappears `ttl` after it was shown.
///
/// Each toast owns its expiry, so a newer toast replacing an older one always
/// gets its full lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub tone: ToastTone,
    shown_at: Instant,
    ttl: Duration,
}

impl Toast {
    #[must_use]
    pub fn new(message: impl Into<String>, tone: ToastTone, shown_at: Instant, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            tone,
            shown_at,
            ttl,
        }
    }

    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.ttl
    }

    #[must_use]
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_until_ttl_elapses() {
        let start = Instant::now();
        let toast = Toast::new("saved", ToastTone::Success, start, Duration::from_millis(3600));

        assert!(toast.is_visible_at(start));
        assert!(toast.is_visible_at(start + Duration::from_millis(3599)));
        assert!(!toast.is_visible_at(start + Duration::from_millis(3600)));
        assert!(!toast.is_visible_at(start + Duration::from_secs(60)));
    }
}
