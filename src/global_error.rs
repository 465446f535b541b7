//! Process-wide error message for passive display.

use tokio::sync::watch;
use tracing::debug;

use crate::signal::Signal;

/// Single shared optional error string.
///
/// Any caller may overwrite it; the last write wins, so a reader cannot
/// assume the message belongs to its own call.
#[derive(Debug, Default)]
pub struct GlobalError {
    message: Signal<Option<String>>,
}

impl GlobalError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "Global error set");
        self.message.set(Some(message));
    }

    /// Clear the message. Subscribers are only notified if one was set.
    pub fn clear(&self) {
        self.message.update_if(|current| current.take().is_some());
    }

    pub fn get(&self) -> Option<String> {
        self.message.get()
    }

    pub fn is_set(&self) -> bool {
        self.message.with(Option::is_some)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.message.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let error = GlobalError::new();
        assert!(!error.is_set());
        error.set("db down");
        assert_eq!(error.get().as_deref(), Some("db down"));
        error.clear();
        assert_eq!(error.get(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let error = GlobalError::new();
        error.set("first");
        error.set("second");
        assert_eq!(error.get().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear_when_empty_does_not_notify() {
        let error = GlobalError::new();
        let mut rx = error.subscribe();
        error.clear();
        assert!(!rx.has_changed().unwrap());
        error.set("x");
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();
        error.clear();
        assert!(rx.has_changed().unwrap());
    }
}
