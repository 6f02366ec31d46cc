// Engine Scenario Tests
//
// Purpose: End-to-end properties of registry, store, completion and report
// Run with: cargo test --test engine_scenarios

use std::collections::HashSet;
use std::sync::Arc;

use gri_assessment::report::build_outline;
use gri_assessment::store::Hydration;
use gri_assessment::{
    build_schema, code_to_field_key, compute_completion, section_completion, FieldPath, FieldValue, FormState,
    FormStore, MemoryStorage, Registry, Storage, ValidationErrorKind,
};

const KEY: &str = "gri-form-data";

fn fresh_store() -> FormStore {
    FormStore::open(Registry::gri(), Arc::new(MemoryStorage::new()), KEY)
}

fn fill(state: &mut FormState, section: &str, key: &str) {
    let values = match section {
        "gri2" => &mut state.gri2,
        "gri3" => &mut state.gri3,
        code => state.topics.entry(code.to_string()).or_default(),
    };
    values.insert(key.to_string(), FieldValue::text("x"));
}

// =========================================================================
// Section 1: Registry properties
// =========================================================================

#[test]
fn test_field_keys_are_injective() {
    let registry = Registry::gri();
    let keys: HashSet<String> = registry.disclosures().iter().map(|d| code_to_field_key(d.code)).collect();
    assert_eq!(keys.len(), registry.disclosures().len());
    assert!(registry.check_integrity().is_ok());
}

// =========================================================================
// Section 2: Completion properties
// =========================================================================

#[test]
fn test_completion_in_range_and_full_iff_filled() {
    let registry = Registry::gri();
    let (_, mut state) = build_schema(registry);
    state.material_topics = registry.topic_codes_with_disclosures().iter().map(|c| c.to_string()).collect();

    for section in registry.sections_with_disclosures() {
        assert_eq!(section_completion(registry, &state, section), 0, "{}", section);

        let keys: Vec<String> = registry.disclosures_in(section).map(|d| d.field_key()).collect();
        let (last, rest) = keys.split_last().unwrap();

        for key in rest {
            fill(&mut state, section, key);
        }
        let partial = section_completion(registry, &state, section);
        assert!(partial <= 100);
        if !rest.is_empty() {
            assert!(partial < 100, "{} reached 100 with one field empty", section);
        }

        fill(&mut state, section, last);
        assert_eq!(section_completion(registry, &state, section), 100, "{}", section);
    }
}

#[test]
fn test_unselected_topic_completion_is_zero() {
    let store = fresh_store();
    store.toggle_material_topic("305").unwrap();
    store
        .set_field(&FieldPath::topic_field("305", "disclosure_305_1"), FieldValue::text("1200"))
        .unwrap();
    assert_eq!(store.with_state(|s| section_completion(Registry::gri(), s, "305")), 14);

    store.toggle_material_topic("305").unwrap();
    let completion = store.with_state(|s| compute_completion(Registry::gri(), s));
    assert_eq!(completion["305"], 0);
    assert_eq!(
        store.value_at(Some(&FieldPath::topic_field("305", "disclosure_305_1"))),
        Some(serde_json::json!("1200"))
    );
}

// =========================================================================
// Section 3: State round-trip and toggles
// =========================================================================

#[test]
fn test_state_round_trip() {
    let store = fresh_store();
    store.set_field(&FieldPath::gri2("disclosure_2_1"), FieldValue::text("Acme Corp")).unwrap();
    store.toggle_material_topic("403").unwrap();
    store.toggle_material_topic("201").unwrap();

    let state = store.get_all();
    let json = serde_json::to_string(&state).unwrap();
    let back: FormState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.material_topics, vec!["403".to_string(), "201".to_string()]);
}

#[test]
fn test_toggle_twice_restores_topics() {
    let store = fresh_store();
    store.toggle_material_topic("201").unwrap();
    store
        .set_field(&FieldPath::topic_field("305", "disclosure_305_2"), FieldValue::text("80"))
        .unwrap();
    let before = store.get_all();

    assert!(store.toggle_material_topic("305").unwrap());
    assert!(!store.toggle_material_topic("305").unwrap());
    assert_eq!(store.get_all(), before);
}

// =========================================================================
// Section 4: Session scenarios
// =========================================================================

#[test]
fn test_fresh_session_defaults() {
    let store = fresh_store();
    assert_eq!(store.hydration(), Hydration::Defaults);

    let state = store.get_all();
    assert_eq!(state.gri2.len(), 30);
    assert_eq!(state.gri3.len(), 3);
    assert!(state.gri2.values().chain(state.gri3.values()).all(|v| *v == FieldValue::empty()));
    assert!(state.material_topics.is_empty());

    let topic_201: Vec<&str> = state.topics["201"].keys().map(String::as_str).collect();
    assert_eq!(
        topic_201,
        vec!["disclosure_201_1", "disclosure_201_2", "disclosure_201_3", "disclosure_201_4"]
    );
    assert!(state.topics["201"].values().all(|v| *v == FieldValue::empty()));
    assert_eq!(state.topics.len(), Registry::gri().topic_codes_with_disclosures().len());
}

#[test]
fn test_partial_gri2_fails_full_validation() {
    let store = fresh_store();
    store.set_field(&FieldPath::gri2("disclosure_2_1"), FieldValue::text("Acme Corp")).unwrap();

    assert!(!store.validate(None));
    let gri2_errors = store.errors_under(&FieldPath::for_section("gri2").unwrap());
    assert_eq!(gri2_errors.len(), 29);
    assert!(gri2_errors.iter().all(|e| e.kind == ValidationErrorKind::Required));
    assert!(store.error_at(&FieldPath::gri2("disclosure_2_1")).is_none());
}

#[test]
fn test_single_emissions_disclosure() {
    let store = fresh_store();
    store.toggle_material_topic("305").unwrap();
    store
        .set_field(&FieldPath::topic_field("305", "disclosure_305_1"), FieldValue::text("1200"))
        .unwrap();

    store.validate(None);
    assert!(store.errors_under(&FieldPath::topic("305")).is_empty());
    assert_eq!(store.with_state(|s| compute_completion(Registry::gri(), s))["305"], 14);

    let outline = store.with_state(|s| build_outline(Registry::gri(), s));
    let emissions: Vec<(&str, &str)> = outline
        .content_index
        .iter()
        .filter(|e| e.code.starts_with("305-"))
        .map(|e| (e.code, e.status()))
        .collect();
    assert_eq!(emissions.len(), 7);
    assert_eq!(emissions[0], ("305-1", "Reported"));
    assert!(emissions[1..].iter().all(|(_, status)| *status == "Not reported"));
}

#[test]
fn test_empty_material_topic_fails() {
    let store = fresh_store();
    store.toggle_material_topic("305").unwrap();

    assert!(!store.validate(None));
    let error = store.error_at(&FieldPath::topic("305")).unwrap();
    assert_eq!(
        error.kind,
        ValidationErrorKind::MaterialTopicEmpty {
            section: "305".to_string()
        }
    );
}

#[test]
fn test_corrupt_snapshot_falls_back_to_defaults() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY, "{\"gri2\": {\"disclosure_2_1\": ").unwrap();

    let store = FormStore::open(Registry::gri(), storage.clone(), KEY);
    assert_eq!(store.hydration(), Hydration::DiscardedCorrupt);
    assert_eq!(store.get_all(), store.schema().default_values());
    assert!(storage.get(KEY).unwrap().is_none());
}

#[test]
fn test_snapshot_survives_reopen() {
    let storage = Arc::new(MemoryStorage::new());
    let store = FormStore::open(Registry::gri(), storage.clone(), KEY);
    store.set_field(&FieldPath::gri3("disclosure_3_1"), FieldValue::text("Stakeholder survey")).unwrap();
    store.toggle_material_topic("302").unwrap();
    assert!(store.persist_if_dirty().unwrap());

    let reopened = FormStore::open(Registry::gri(), storage, KEY);
    assert_eq!(reopened.hydration(), Hydration::Restored { dropped: 0 });
    assert_eq!(reopened.get_all(), store.get_all());
}
