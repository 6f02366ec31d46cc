//! Section navigation with validate-on-leave.
//!
//! Leaving a section validates that section's subtree without blocking the
//! move. "Validate All" records an overall status that resets to idle on the
//! next navigation.

use serde::Serialize;

use crate::form_state::FieldPath;
use crate::registry::{is_topic_standard, GRI1, GRI2, GRI3};
use crate::store::FormStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Idle,
    Valid,
    Invalid,
}

impl ValidationStatus {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ValidationStatus::Idle => None,
            ValidationStatus::Valid => Some("All sections valid"),
            ValidationStatus::Invalid => Some("Some fields have errors"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationOutcome {
    pub from: String,
    pub to: String,
    /// Result of validating the departed section; `None` when it has no fields.
    pub departed_valid: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    active: String,
    status: ValidationStatus,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts on GRI 2.
    pub fn new() -> Self {
        Self {
            active: GRI2.to_string(),
            status: ValidationStatus::Idle,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    /// Move to `to`, validating the section being left. `None` (and no
    /// state change) if `to` is not a section of the store's registry.
    pub fn navigate(&mut self, store: &FormStore, to: &str) -> Option<NavigationOutcome> {
        let known = matches!(to, GRI1 | GRI2 | GRI3) || (is_topic_standard(to) && store.registry().is_topic_code(to));
        if !known {
            return None;
        }

        let departed_valid = FieldPath::for_section(&self.active).map(|scope| store.validate(Some(&scope)));
        let from = std::mem::replace(&mut self.active, to.to_string());
        self.status = ValidationStatus::Idle;

        tracing::debug!(from = %from, to, ?departed_valid, "Navigated between sections");
        Some(NavigationOutcome {
            from,
            to: to.to_string(),
            departed_valid,
        })
    }

    /// Validate the whole tree and record the overall status.
    pub fn validate_all(&mut self, store: &FormStore) -> ValidationStatus {
        self.status = if store.validate(None) {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        };
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_state::FieldValue;
    use crate::registry::Registry;
    use crate::store::MemoryStorage;
    use std::sync::Arc;

    fn store() -> FormStore {
        FormStore::open(Registry::gri(), Arc::new(MemoryStorage::new()), "gri-form-data")
    }

    #[test]
    fn test_leaving_validates_departed_section_only() {
        let store = store();
        let mut nav = Navigator::new();
        let outcome = nav.navigate(&store, "gri3").unwrap();
        assert_eq!(outcome.from, "gri2");
        assert_eq!(outcome.departed_valid, Some(false));
        assert_eq!(store.errors().len(), 30);
        assert!(!store.section_has_errors("gri3"));
        assert_eq!(nav.active(), "gri3");
    }

    #[test]
    fn test_leaving_foundation_validates_nothing() {
        let store = store();
        let mut nav = Navigator::new();
        nav.navigate(&store, "gri1").unwrap();
        store.validate(None);
        let before = store.errors().len();
        let outcome = nav.navigate(&store, "305").unwrap();
        assert_eq!(outcome.departed_valid, None);
        assert_eq!(store.errors().len(), before);
    }

    #[test]
    fn test_unknown_target_is_ignored() {
        let store = store();
        let mut nav = Navigator::new();
        assert!(nav.navigate(&store, "999").is_none());
        assert!(nav.navigate(&store, "issb").is_none());
        assert_eq!(nav.active(), "gri2");
        assert!(store.errors().is_empty());
    }

    #[test]
    fn test_validate_all_status_resets_on_navigate() {
        let store = store();
        let mut nav = Navigator::new();
        assert_eq!(nav.validate_all(&store), ValidationStatus::Invalid);
        assert_eq!(nav.status().message(), Some("Some fields have errors"));

        for d in Registry::gri().disclosures().iter().filter(|d| d.required) {
            let path = FieldPath::for_disclosure(d.section, &d.field_key());
            store.set_field(&path, FieldValue::text("Reported")).unwrap();
        }
        assert_eq!(nav.validate_all(&store), ValidationStatus::Valid);
        nav.navigate(&store, "gri3").unwrap();
        assert_eq!(nav.status(), ValidationStatus::Idle);
    }
}
