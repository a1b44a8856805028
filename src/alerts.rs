//! User-facing notification queue.
//!
//! Alerts are display-only: no retry or callback semantics, no dedup, no cap
//! on size (unbounded growth is an accepted limitation of this core). The UI
//! dismisses by index, so indices must only be dereferenced immediately
//! before removal.

/// How an alert should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
    Info,
    Warning,
}

/// One user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

/// Insertion-ordered alert sequence.
#[derive(Debug, Default)]
pub struct AlertQueue {
    alerts: Vec<Alert>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert at the end of the queue.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.alerts.push(Alert {
            message: message.into(),
            severity,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning);
    }

    /// Remove the alert at `index`. Out-of-range indices are a silent no-op;
    /// callers must not rely on error signaling here.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.alerts.len() {
            self.alerts.remove(index);
        }
    }

    pub fn as_slice(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
