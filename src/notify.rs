//! Toast notifications
//!
//! One-shot, auto-dismissing messages pushed by request actions. A renderer
//! drains the queue each frame; nothing is persisted.

use chrono::{DateTime, Utc};

/// How long a toast stays up unless dismissed.
pub const TOAST_AUTO_DISMISS_MS: u64 = 3000;

/// Toast severity levels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: ToastSeverity,
    pub auto_dismiss_ms: Option<u64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default, Clone, Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Show a toast notification
    pub fn push(&mut self, message: impl Into<String>, severity: ToastSeverity) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            severity,
            auto_dismiss_ms: Some(TOAST_AUTO_DISMISS_MS),
            created_at: Utc::now(),
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastSeverity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastSeverity::Error)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastSeverity::Warning)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop toasts whose display time has elapsed at `now`.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.toasts.retain(|t| match t.auto_dismiss_ms {
            Some(ms) => (now - t.created_at).num_milliseconds() < ms as i64,
            None => true,
        });
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn ids_are_unique_and_drain_empties() {
        let mut queue = ToastQueue::default();
        let a = queue.success("saved");
        let b = queue.error("failed");
        assert_ne!(a, b);
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].severity, ToastSeverity::Success);
        assert!(queue.is_empty());
    }

    #[test]
    fn expire_drops_old_toasts() {
        let mut queue = ToastQueue::default();
        queue.warning("limit reached");
        let later = Utc::now() + Duration::milliseconds(TOAST_AUTO_DISMISS_MS as i64 + 1);
        queue.expire(later);
        assert!(queue.is_empty());
    }

    #[test]
    fn dismiss_removes_one() {
        let mut queue = ToastQueue::default();
        let a = queue.success("one");
        queue.success("two");
        queue.dismiss(a);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().map(|t| t.message.as_str()), Some("two"));
    }
}
