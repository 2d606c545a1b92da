//! Transient operator notices ("saved", "no previous image", ...).
//!
//! The editor never aborts on recoverable problems; it reports them here and
//! the front-end shows the latest notice for a short while.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

use crate::constants::status::NOTICE_DURATION;

/// How serious a notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single operator-visible message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    created: Instant,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            created: Instant::now(),
        }
    }

    /// Time since the notice was raised.
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Info => write!(f, "{}", self.message),
            Severity::Warning => write!(f, "⚠️ {}", self.message),
            Severity::Error => write!(f, "❌ {}", self.message),
        }
    }
}

/// Holds the most recent notice and expires it after a fixed time.
#[derive(Debug)]
pub struct StatusLine {
    latest: Option<Notice>,
    duration: Duration,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            latest: None,
            duration: NOTICE_DURATION,
        }
    }

    /// Set how long notices remain visible.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a notice and mirror it to the log.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let notice = Notice::new(severity, message);
        match severity {
            Severity::Info => log::info!("{}", notice.message),
            Severity::Warning => log::warn!("{}", notice.message),
            Severity::Error => log::error!("{}", notice.message),
        }
        self.latest = Some(notice);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    /// The latest notice if it has not expired yet.
    pub fn current(&self) -> Option<&Notice> {
        self.latest.as_ref().filter(|n| n.age() < self.duration)
    }

    /// The latest notice regardless of age.
    pub fn latest(&self) -> Option<&Notice> {
        self.latest.as_ref()
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_notice_wins() {
        let mut status = StatusLine::new();
        assert!(status.current().is_none());

        status.info("saved");
        status.warn("no previous image");
        let notice = status.current().unwrap();
        assert_eq!(notice.severity, Severity::Warning);
        assert_eq!(notice.message, "no previous image");
    }

    #[test]
    fn test_zero_duration_expires_immediately() {
        let mut status = StatusLine::new().with_duration(Duration::ZERO);
        status.error("disk full");
        assert!(status.current().is_none());
        assert_eq!(status.latest().map(|n| n.severity), Some(Severity::Error));
    }

    #[test]
    fn test_display_marks_severity() {
        assert_eq!(Notice::new(Severity::Info, "ok").to_string(), "ok");
        assert!(Notice::new(Severity::Warning, "hm").to_string().ends_with("hm"));
        assert_ne!(
            Notice::new(Severity::Error, "bad").to_string(),
            Notice::new(Severity::Info, "bad").to_string()
        );
    }

    #[test]
    fn test_clear() {
        let mut status = StatusLine::new();
        status.info("x");
        status.clear();
        assert!(status.latest().is_none());
    }
}
