//! Form State Store
//!
//! Holds the single form tree for an assessment. All mutations go through
//! `FormStore` methods; every committed mutation bumps a version published on
//! a tokio watch channel, which drives path watchers and the debounced
//! persister.
//!
//! Hydration reads the snapshot stored under the store's key once, at open.
//! A snapshot that is not a JSON object shaped like the form tree is removed
//! and defaults are used instead.

pub mod persister;
pub mod storage;
pub mod watch;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch as channel;

use crate::error::StoreError;
use crate::form_state::{FieldPath, FieldValue, FormState};
use crate::registry::Registry;
use crate::schema::{build_schema, Schema, ValidationError};

pub use persister::{spawn_persister, Persister, DEFAULT_DEBOUNCE};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use self::watch::Watch;

/// How the tree was initialised at open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Hydration {
    /// No stored snapshot (or storage unreadable).
    Defaults,
    /// Snapshot restored; `dropped` entries were no longer declared.
    Restored { dropped: usize },
    /// Stored snapshot was corrupt and has been removed.
    DiscardedCorrupt,
}

#[derive(Debug)]
struct StoreState {
    values: FormState,
    errors: BTreeMap<FieldPath, ValidationError>,
    dirty: bool,
    version: u64,
}

#[derive(Debug)]
struct Shared {
    schema: Schema,
    storage: Arc<dyn Storage>,
    key: String,
    hydration: Hydration,
    state: RwLock<StoreState>,
    /// Serializes storage writes so snapshots land in version order.
    write_gate: Mutex<()>,
    version_tx: channel::Sender<u64>,
}

/// Cloneable handle to one assessment's form state.
#[derive(Debug, Clone)]
pub struct FormStore {
    shared: Arc<Shared>,
}

impl FormStore {
    /// Build the schema, then hydrate from `storage[key]` if a snapshot exists.
    pub fn open(registry: &'static Registry, storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (schema, defaults) = build_schema(registry);
        let (values, hydration) = hydrate(&schema, defaults, storage.as_ref(), &key);
        let (version_tx, _) = channel::channel(0);

        Self {
            shared: Arc::new(Shared {
                schema,
                storage,
                key,
                hydration,
                state: RwLock::new(StoreState {
                    values,
                    errors: BTreeMap::new(),
                    dirty: false,
                    version: 0,
                }),
                write_gate: Mutex::new(()),
                version_tx,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.shared.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.shared.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_gate(&self) -> MutexGuard<'_, ()> {
        self.shared.write_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, state: &mut StoreState) {
        state.version += 1;
        state.dirty = true;
        self.shared.version_tx.send_replace(state.version);
    }

    pub fn schema(&self) -> &Schema {
        &self.shared.schema
    }

    pub fn registry(&self) -> &'static Registry {
        self.shared.schema.registry()
    }

    pub fn key(&self) -> &str {
        &self.shared.key
    }

    pub fn hydration(&self) -> Hydration {
        self.shared.hydration
    }

    /// Snapshot of the whole tree.
    pub fn get_all(&self) -> FormState {
        self.read().values.clone()
    }

    /// Run `f` against the tree without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&FormState) -> R) -> R {
        f(&self.read().values)
    }

    /// Subtree at `path` (whole tree for `None`) as JSON.
    pub fn value_at(&self, path: Option<&FieldPath>) -> Option<Value> {
        self.read().values.value_at(path)
    }

    /// Subscribe to a path.
    pub fn watch(&self, path: Option<FieldPath>) -> Watch {
        Watch::new(self.clone(), path)
    }

    /// Raw version channel; the value is the latest committed version.
    pub fn subscribe(&self) -> channel::Receiver<u64> {
        self.shared.version_tx.subscribe()
    }

    pub fn version(&self) -> u64 {
        self.read().version
    }

    pub fn is_dirty(&self) -> bool {
        self.read().dirty
    }

    /// Write one declared field. Returns whether the value changed.
    pub fn set_field(&self, path: &FieldPath, value: FieldValue) -> Result<bool, StoreError> {
        if self.shared.schema.rule(path).is_none() {
            return Err(StoreError::UnknownField(path.to_string()));
        }
        let mut state = self.write();
        let slot = state
            .values
            .field_slot(path)
            .ok_or_else(|| StoreError::UnknownField(path.to_string()))?;
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        self.commit(&mut state);
        Ok(true)
    }

    /// Add or remove a topic from `materialTopics`. Topic field values are
    /// left untouched. Returns whether the topic is now selected.
    pub fn toggle_material_topic(&self, code: &str) -> Result<bool, StoreError> {
        if !self.registry().is_topic_code(code) {
            return Err(StoreError::UnknownTopic(code.to_string()));
        }
        let mut state = self.write();
        let topics = &mut state.values.material_topics;
        let selected = match topics.iter().position(|t| t == code) {
            Some(idx) => {
                topics.remove(idx);
                false
            }
            None => {
                topics.push(code.to_string());
                true
            }
        };
        self.commit(&mut state);
        tracing::debug!(topic = code, selected, "Toggled material topic");
        Ok(selected)
    }

    /// Validate the subtree at `scope` (everything for `None`). Errors under
    /// the scope are replaced; errors elsewhere are kept.
    pub fn validate(&self, scope: Option<&FieldPath>) -> bool {
        let mut state = self.write();
        self.record_validation(&mut state, scope)
    }

    /// Validate the whole tree and read the result under one lock, so `f`
    /// sees exactly the tree the recorded errors were computed from.
    pub fn validate_all_with<R>(&self, f: impl FnOnce(&FormState, &[ValidationError]) -> R) -> (bool, R) {
        let mut state = self.write();
        let valid = self.record_validation(&mut state, None);
        let errors: Vec<ValidationError> = state.errors.values().cloned().collect();
        (valid, f(&state.values, &errors))
    }

    fn record_validation(&self, state: &mut StoreState, scope: Option<&FieldPath>) -> bool {
        let found = self.shared.schema.validate(&state.values, scope);
        let valid = found.is_empty();

        state
            .errors
            .retain(|path, _| scope.is_some_and(|s| !path.starts_with(s)));
        for error in found {
            state.errors.insert(error.path.clone(), error);
        }
        valid
    }

    /// Recorded field errors in path order.
    pub fn errors(&self) -> Vec<ValidationError> {
        self.read().errors.values().cloned().collect()
    }

    pub fn errors_under(&self, path: &FieldPath) -> Vec<ValidationError> {
        self.read()
            .errors
            .values()
            .filter(|e| e.path.starts_with(path))
            .cloned()
            .collect()
    }

    pub fn error_at(&self, path: &FieldPath) -> Option<ValidationError> {
        self.read().errors.get(path).cloned()
    }

    pub fn section_has_errors(&self, section: &str) -> bool {
        self.read().errors.values().any(|e| e.section() == Some(section))
    }

    /// Current tree as the persisted JSON text.
    pub fn snapshot_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.read().values)?)
    }

    /// Write the snapshot if there are unsaved changes. Returns whether a
    /// write happened. Failures are logged at warn and returned.
    pub fn persist_if_dirty(&self) -> Result<bool, StoreError> {
        // held until `dirty` is settled
        let _gate = self.write_gate();
        let (json, version) = {
            let state = self.read();
            if !state.dirty {
                return Ok(false);
            }
            (serde_json::to_string(&state.values)?, state.version)
        };

        if let Err(e) = self.shared.storage.set(&self.shared.key, &json) {
            tracing::warn!(key = %self.shared.key, error = %e, "Failed to persist form state");
            return Err(e.into());
        }

        let mut state = self.write();
        if state.version == version {
            state.dirty = false;
        }
        tracing::debug!(key = %self.shared.key, version, bytes = json.len(), "Persisted form state");
        Ok(true)
    }

    /// Remove the stored snapshot. The in-memory tree is kept; the next
    /// committed change is persisted again.
    pub fn clear_saved_data(&self) -> Result<(), StoreError> {
        let _gate = self.write_gate();
        self.shared.storage.remove(&self.shared.key)?;
        tracing::info!(key = %self.shared.key, "Cleared saved form data");
        Ok(())
    }
}

fn hydrate(schema: &Schema, defaults: FormState, storage: &dyn Storage, key: &str) -> (FormState, Hydration) {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::info!(key, "No saved form data, starting from defaults");
            return (defaults, Hydration::Defaults);
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Could not read saved form data, starting from defaults");
            return (defaults, Hydration::Defaults);
        }
    };

    match parse_snapshot(&raw) {
        Ok(stored) => {
            let (values, dropped) = schema.reconcile(stored);
            if dropped > 0 {
                tracing::debug!(key, dropped, "Dropped undeclared entries from saved form data");
            }
            tracing::info!(key, "Restored saved form data");
            (values, Hydration::Restored { dropped })
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding corrupt saved form data");
            if let Err(e) = storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove corrupt saved form data");
            }
            (defaults, Hydration::DiscardedCorrupt)
        }
    }
}

/// The snapshot must be a JSON object shaped like the form tree.
fn parse_snapshot(raw: &str) -> Result<FormState, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("saved form data is not an object"));
    }
    FormState::deserialize(value)
}
