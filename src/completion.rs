//! Completion Calculator
//!
//! Per-section share of disclosures that satisfy the filled predicate.
//! Topic standards that are not material score 0 regardless of stored values.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::form_state::{is_filled, FormState};
use crate::registry::{code_to_field_key, is_topic_standard, Registry};

/// Completion of one section, 0..=100.
pub fn section_completion(registry: &Registry, state: &FormState, section: &str) -> u8 {
    if is_topic_standard(section) && !state.is_material(section) {
        return 0;
    }
    let total = registry.disclosure_count(section);
    if total == 0 {
        return 0;
    }
    let values = state.section_values(section);
    let filled = registry
        .disclosures_in(section)
        .filter(|d| is_filled(values.and_then(|v| v.get(&code_to_field_key(d.code)))))
        .count();
    percent(filled, total)
}

fn percent(filled: usize, total: usize) -> u8 {
    ((filled as f64 * 100.0 / total as f64).round()) as u8
}

/// Completion for every section with at least one disclosure.
pub fn compute_completion(registry: &Registry, state: &FormState) -> BTreeMap<String, u8> {
    registry
        .sections_with_disclosures()
        .into_iter()
        .map(|id| (id.to_string(), section_completion(registry, state, id)))
        .collect()
}

/// Completion summary row for the sidebar and API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCompletion {
    pub section: String,
    pub filled: usize,
    pub total: usize,
    pub percent: u8,
}

/// Detailed counts for one section (`filled` is 0 for inactive topics).
pub fn completion_detail(registry: &Registry, state: &FormState, section: &str) -> SectionCompletion {
    let total = registry.disclosure_count(section);
    let active = !is_topic_standard(section) || state.is_material(section);
    let filled = match (active, state.section_values(section)) {
        (true, Some(values)) => registry
            .disclosures_in(section)
            .filter(|d| is_filled(values.get(&d.field_key())))
            .count(),
        _ => 0,
    };
    SectionCompletion {
        section: section.to_string(),
        filled,
        total,
        percent: section_completion(registry, state, section),
    }
}
