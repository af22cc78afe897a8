use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// A transient on-screen notification. Only the most recent toast is
/// shown; triggering a new one replaces whatever is visible.
#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_toast_is_visible() {
        let toast = Toast::new("hello");
        assert!(!toast.is_expired());
        assert_eq!(toast.message(), "hello");
    }

    #[test]
    fn test_old_toast_expires() {
        let toast = Toast {
            message: "old".into(),
            shown_at: Instant::now() - TOAST_TTL * 2,
        };
        assert!(toast.is_expired());
    }
}
