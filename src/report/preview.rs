//! Live report preview.

use serde::Serialize;

use crate::form_state::FormState;
use crate::registry::Registry;

use super::traversal::{build_outline, ContentIndexEntry, DisclosureEntry};

pub const REPORT_TITLE: &str = "GRI Sustainability Report";
pub const ORGANIZATION_PLACEHOLDER: &str = "[Organization name will appear here]";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewItem {
    pub caption: String, // "GRI 305-1"
    pub label: &'static str,
    pub text: String,
    pub reported: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewGroup {
    pub name: String,
    pub items: Vec<PreviewItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTopicGroup {
    pub name: &'static str,
    pub topics: Vec<PreviewGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreview {
    pub title: &'static str,
    pub subtitle: String,
    pub subtitle_is_placeholder: bool,
    pub general: Vec<PreviewGroup>,
    pub material: Vec<PreviewItem>,
    /// Empty when no material topic is selected.
    pub topic_groups: Vec<PreviewTopicGroup>,
    pub content_index: Vec<ContentIndexEntry>,
}

/// Placeholder for an unreported disclosure: "[<Label> will appear here]".
pub fn label_placeholder(label: &str) -> String {
    let mut chars = label.chars();
    let capitalised: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("[{} will appear here]", capitalised)
}

fn item(entry: &DisclosureEntry) -> PreviewItem {
    PreviewItem {
        caption: format!("GRI {}", entry.code),
        label: entry.label,
        text: entry
            .value
            .clone()
            .unwrap_or_else(|| label_placeholder(entry.label)),
        reported: entry.reported(),
    }
}

pub fn build_preview(registry: &'static Registry, state: &FormState) -> ReportPreview {
    let outline = build_outline(registry, state);

    let (subtitle, subtitle_is_placeholder) = match outline.organization {
        Some(name) => (name, false),
        None => (ORGANIZATION_PLACEHOLDER.to_string(), true),
    };

    ReportPreview {
        title: REPORT_TITLE,
        subtitle,
        subtitle_is_placeholder,
        general: outline
            .gri2
            .iter()
            .map(|sub| PreviewGroup {
                name: sub.name.to_string(),
                items: sub.disclosures.iter().map(item).collect(),
            })
            .collect(),
        material: outline.gri3.iter().map(item).collect(),
        topic_groups: outline
            .topic_groups
            .iter()
            .map(|group| PreviewTopicGroup {
                name: group.name,
                topics: group
                    .topics
                    .iter()
                    .map(|topic| PreviewGroup {
                        name: topic.name.clone(),
                        items: topic.disclosures.iter().map(item).collect(),
                    })
                    .collect(),
            })
            .collect(),
        content_index: outline.content_index,
    }
}
