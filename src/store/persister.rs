//! Debounced persistence.
//!
//! One background task per store. Each committed mutation restarts a single
//! pending timer; when the window elapses with no newer mutation the current
//! snapshot is written. A failed write is logged and dropped.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::FormStore;
use crate::error::StoreError;

/// Default debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(crate::config::DEFAULT_DEBOUNCE_MS);

/// Handle to the persistence task. Dropping it stops the task without a
/// final write; call `flush()` first on shutdown.
#[derive(Debug)]
pub struct Persister {
    store: FormStore,
    handle: JoinHandle<()>,
}

/// Spawn the persistence task on the current tokio runtime.
pub fn spawn_persister(store: FormStore, window: Duration) -> Persister {
    // subscribe before spawning so mutations made before the first poll count
    let rx = store.subscribe();
    let handle = tokio::spawn(run(store.clone(), rx, window));
    tracing::debug!(key = store.key(), window_ms = window.as_millis() as u64, "Persister started");
    Persister { store, handle }
}

impl Persister {
    /// Write the current snapshot immediately if it has unsaved changes.
    pub fn flush(&self) -> Result<bool, StoreError> {
        self.store.persist_if_dirty()
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(store: FormStore, mut rx: watch::Receiver<u64>, window: Duration) {
    loop {
        if rx.changed().await.is_err() {
            return;
        }

        // settle: every newer version restarts the window
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = tokio::time::sleep(window) => break,
            }
        }

        // failures are already logged by the store
        let _ = store.persist_if_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_state::{FieldPath, FieldValue};
    use crate::registry::Registry;
    use crate::store::storage::{MemoryStorage, Storage};
    use std::sync::Arc;

    const KEY: &str = "gri-form-data";

    #[tokio::test(start_paused = true)]
    async fn test_debounce_restarts_on_change() {
        let storage = Arc::new(MemoryStorage::new());
        let store = FormStore::open(Registry::gri(), storage.clone(), KEY);
        let _persister = spawn_persister(store.clone(), Duration::from_millis(1000));
        let path = FieldPath::gri2("disclosure_2_1");

        store.set_field(&path, FieldValue::text("Acme")).unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(storage.get(KEY).unwrap().is_none());

        store.set_field(&path, FieldValue::text("Acme Corp")).unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(storage.get(KEY).unwrap().is_none());

        tokio::time::sleep(Duration::from_millis(500)).await;
        let saved = storage.get(KEY).unwrap().unwrap();
        assert!(saved.contains("Acme Corp"));
        assert!(!store.is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_failure_does_not_interrupt_editing() {
        let storage = Arc::new(MemoryStorage::with_quota(16));
        let store = FormStore::open(Registry::gri(), storage.clone(), KEY);
        let _persister = spawn_persister(store.clone(), Duration::from_millis(100));
        let path = FieldPath::gri2("disclosure_2_1");

        store.set_field(&path, FieldValue::text("Acme")).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(storage.get(KEY).unwrap().is_none());
        assert!(store.is_dirty());

        store.set_field(&path, FieldValue::text("Acme Corp")).unwrap();
        assert_eq!(store.get_all().gri2["disclosure_2_1"], FieldValue::text("Acme Corp"));
    }

    #[tokio::test]
    async fn test_flush_writes_immediately() {
        let storage = Arc::new(MemoryStorage::new());
        let store = FormStore::open(Registry::gri(), storage.clone(), KEY);
        let persister = spawn_persister(store.clone(), Duration::from_secs(60));

        assert!(!persister.flush().unwrap());
        store.toggle_material_topic("305").unwrap();
        assert!(persister.flush().unwrap());
        assert!(storage.get(KEY).unwrap().unwrap().contains("\"materialTopics\":[\"305\"]"));
    }
}
