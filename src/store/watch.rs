//! Path subscriptions over the store's version channel.

use serde_json::Value;
use tokio::sync::watch;

use crate::form_state::FieldPath;

use super::FormStore;

/// Live view of one subtree (or the whole tree when `path` is `None`).
///
/// `current()` always re-reads the store. `changed()` resolves on the next
/// committed mutation that actually alters the watched subtree.
#[derive(Debug)]
pub struct Watch {
    store: FormStore,
    path: Option<FieldPath>,
    rx: watch::Receiver<u64>,
    last: Option<Value>,
}

impl Watch {
    pub(super) fn new(store: FormStore, path: Option<FieldPath>) -> Self {
        let rx = store.subscribe();
        let last = store.value_at(path.as_ref());
        Self { store, path, rx, last }
    }

    pub fn path(&self) -> Option<&FieldPath> {
        self.path.as_ref()
    }

    pub fn current(&self) -> Option<Value> {
        self.store.value_at(self.path.as_ref())
    }

    /// Whether any mutation was committed since the last `changed()`.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait until the watched subtree changes and return its new value.
    pub async fn changed(&mut self) -> Option<Value> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            let current = self.current();
            if current != self.last {
                self.last = current.clone();
                return current;
            }
        }
    }
}
