//! Report traversal shared by the previewer and the export builder.
//!
//! Fixed order: GRI 2 by subsection, GRI 3, then material topics. Topic
//! blocks are grouped by series; the content index lists material topics
//! sorted by code. Both orders coincide for the GRI registry because the
//! series and their standards are ascending.

use serde::Serialize;

use crate::form_state::{is_filled, FieldPath, FieldValue, FormState};
use crate::registry::{DisclosureDefinition, Registry, GRI2, GRI3};

/// One disclosure as the report sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub path: FieldPath,
    /// Display text (value plus unit suffix); `None` when not reported.
    pub value: Option<String>,
}

impl DisclosureEntry {
    pub fn reported(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    pub name: &'static str,
    pub disclosures: Vec<DisclosureEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicBlock {
    pub code: String,
    pub name: String,
    pub disclosures: Vec<DisclosureEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicGroupBlock {
    pub name: &'static str,
    pub topics: Vec<TopicBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIndexEntry {
    pub standard: String,
    pub code: &'static str,
    pub label: &'static str,
    pub reported: bool,
}

impl ContentIndexEntry {
    pub fn status(&self) -> &'static str {
        if self.reported {
            "Reported"
        } else {
            "Not reported"
        }
    }
}

/// Everything a report rendering needs, in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutline {
    pub organization: Option<String>,
    pub reporting_period: Option<String>,
    pub gri2: Vec<Subsection>,
    pub gri3: Vec<DisclosureEntry>,
    /// Selected material topics, sorted by code: (code, display name).
    pub material_topics: Vec<(String, String)>,
    pub topic_groups: Vec<TopicGroupBlock>,
    pub content_index: Vec<ContentIndexEntry>,
}

/// Code of the organization name disclosure.
pub const ORGANIZATION_CODE: &str = "2-1";
/// Code of the reporting period disclosure.
pub const REPORTING_PERIOD_CODE: &str = "2-3";

/// Display text for a filled value: the value, then " <unit>" if any.
pub fn display_value(value: Option<&FieldValue>, unit: Option<&str>) -> Option<String> {
    if !is_filled(value) {
        return None;
    }
    let text = value?.to_string();
    Some(match unit {
        Some(unit) => format!("{} {}", text, unit),
        None => text,
    })
}

fn entry(d: &'static DisclosureDefinition, state: &FormState) -> DisclosureEntry {
    let path = FieldPath::for_disclosure(d.section, &d.field_key());
    let value = display_value(state.field(&path), d.unit);
    DisclosureEntry {
        code: d.code,
        label: d.label,
        path,
        value,
    }
}

fn plain_text(state: &FormState, code: &str) -> Option<String> {
    let value = state.gri2.get(&crate::registry::code_to_field_key(code));
    is_filled(value).then(|| value.map(ToString::to_string)).flatten()
}

pub fn build_outline(registry: &'static Registry, state: &FormState) -> ReportOutline {
    let mut content_index = Vec::new();
    let mut index = |standard: &str, entries: &[DisclosureEntry]| {
        content_index.extend(entries.iter().map(|e| ContentIndexEntry {
            standard: standard.to_string(),
            code: e.code,
            label: e.label,
            reported: e.reported(),
        }));
    };

    let gri2: Vec<Subsection> = registry
        .gri2_subsections()
        .iter()
        .map(|sub| Subsection {
            name: sub.name,
            disclosures: registry
                .disclosures_in(GRI2)
                .filter(|d| sub.contains(d.code))
                .map(|d| entry(d, state))
                .collect(),
        })
        .collect();
    let gri2_name = registry.section_name(GRI2);
    for sub in &gri2 {
        index(gri2_name.as_str(), sub.disclosures.as_slice());
    }

    let gri3: Vec<DisclosureEntry> = registry.disclosures_in(GRI3).map(|d| entry(d, state)).collect();
    index(registry.section_name(GRI3).as_str(), gri3.as_slice());

    let sorted = state.sorted_material_topics();
    let topic_block = |code: &str| TopicBlock {
        code: code.to_string(),
        name: registry.section_name(code),
        disclosures: registry.disclosures_in(code).map(|d| entry(d, state)).collect(),
    };

    for code in &sorted {
        let block = topic_block(code.as_str());
        index(block.name.as_str(), block.disclosures.as_slice());
    }

    let topic_groups = registry
        .groups()
        .iter()
        .filter_map(|group| {
            let topics: Vec<TopicBlock> = group
                .standards
                .iter()
                .filter(|code| sorted.iter().any(|s| s == *code))
                .map(|code| topic_block(*code))
                .collect();
            (!topics.is_empty()).then_some(TopicGroupBlock {
                name: group.name,
                topics,
            })
        })
        .collect();

    let material_topics = sorted
        .iter()
        .map(|code| (code.clone(), registry.section_name(code)))
        .collect();

    ReportOutline {
        organization: plain_text(state, ORGANIZATION_CODE),
        reporting_period: plain_text(state, REPORTING_PERIOD_CODE),
        gri2,
        gri3,
        material_topics,
        topic_groups,
        content_index,
    }
}
