//! Observable values.
//!
//! A [`Signal`] holds a value and notifies subscribers after every
//! mutation. Notification happens synchronously inside the mutating call, so
//! a subscriber that checks `has_changed()` right after a mutation returns
//! always sees it.

use tokio::sync::watch;

/// A value with publish/subscribe change notification.
#[derive(Debug)]
pub struct Signal<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Signal<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Replace the value and notify subscribers. Returns the previous value.
    pub fn set(&self, value: T) -> T {
        self.tx.send_replace(value)
    }

    /// Mutate in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutate in place, notifying only if `f` returns true.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Subscribe to changes. The receiver starts with the current value
    /// marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_subscriber() {
        let signal = Signal::new(1);
        let mut rx = signal.subscribe();
        assert!(!rx.has_changed().unwrap());

        let previous = signal.set(2);
        assert_eq!(previous, 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[test]
    fn test_update_if_skips_notification() {
        let signal = Signal::new(vec![1]);
        let mut rx = signal.subscribe();

        let changed = signal.update_if(|v| {
            if v.contains(&1) {
                return false;
            }
            v.push(1);
            true
        });
        assert!(!changed);
        assert!(!rx.has_changed().unwrap());

        signal.update(|v| v.push(2));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), vec![1, 2]);
    }

    #[test]
    fn test_set_without_subscribers_still_stores() {
        let signal: Signal<Option<String>> = Signal::default();
        signal.set(Some("s-1".to_string()));
        assert_eq!(signal.get(), Some("s-1".to_string()));
        assert_eq!(signal.with(|v| v.as_deref().map(str::len)), Some(3));
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_change() {
        let signal = std::sync::Arc::new(Signal::new(0u32));
        let mut rx = signal.subscribe();
        let writer = signal.clone();
        tokio::spawn(async move {
            writer.set(7);
        });
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 7);
    }
}
