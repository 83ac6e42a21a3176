//! Notification sinks.
//!
//! Executors and connectivity observers report to a [`Notifier`] that is
//! handed to them at construction. The sink decides how a notification
//! reaches a human: a toast, a log line, a test buffer.
//!
//! # Examples
//!
//! ```
//! use retry_rail::notify::{Notifier, RecordingNotifier, Severity};
//!
//! let sink = RecordingNotifier::new();
//! sink.warning("Retrying... (1/3)");
//! sink.error("Server error. Please try again later.");
//!
//! assert_eq!(sink.count(Severity::Warning), 1);
//! assert_eq!(sink.len(), 2);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity channel of a notification.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A single delivered notification.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Destination for user-facing notifications.
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);

    #[inline]
    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }

    #[inline]
    fn warning(&self, message: &str) {
        self.notify(Severity::Warning, message);
    }

    #[inline]
    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    #[inline]
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    #[inline]
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    #[inline]
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message);
    }
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    #[inline]
    fn notify(&self, _severity: Severity, _message: &str) {}
}

/// Keeps every notification in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic inside another notifier call cannot leave the Vec half-written.
    fn entries(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.entries().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries().last().cloned()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.entries().push(Notification {
            severity,
            message: message.to_owned(),
        });
    }
}

/// Routes notifications to `tracing`: success as `info`, warning as `warn`,
/// error as `error`.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

#[cfg(feature = "tracing")]
impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => tracing::info!(target: "retry_rail::notify", %message),
            Severity::Warning => tracing::warn!(target: "retry_rail::notify", %message),
            Severity::Error => tracing::error!(target: "retry_rail::notify", %message),
        }
    }
}
