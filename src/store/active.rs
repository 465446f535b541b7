//! Transient focus pointers (not persisted).

use tokio::sync::watch;

use crate::signal::Signal;

/// In-memory pointer to the focused item, e.g. the active SessionId or the
/// ThreadId whose configuration card is open.
///
/// Moving the pointer has no side effects; refreshing whatever it points at
/// is the caller's job.
#[derive(Debug, Default)]
pub struct ActivePointer {
    current: Signal<Option<String>>,
}

impl ActivePointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&self, id: Option<&str>) {
        self.current.set(id.map(str::to_string));
    }

    pub fn get_active(&self) -> Option<String> {
        self.current.get()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.current.with(|current| current.as_deref() == Some(id))
    }

    /// Clear the pointer if it currently points at `id`.
    pub fn clear_if(&self, id: &str) -> bool {
        self.current.update_if(|current| {
            if current.as_deref() == Some(id) {
                *current = None;
                return true;
            }
            false
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.current.subscribe()
    }
}
