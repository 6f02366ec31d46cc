//! View models produced by the section renderer.
//!
//! Plain serializable data: the browser shell maps each control onto an
//! input widget and writes edits back through `FormStore::set_field` using
//! the control's `path`.

use serde::Serialize;

use crate::form_state::{FieldPath, FieldValue};

/// One section of the assessment form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SectionView {
    /// GRI 1: informational only, no fields.
    Foundation {
        title: &'static str,
        intro: &'static str,
        principles: &'static [&'static str],
        outro: &'static str,
    },
    /// GRI 2: controls grouped into fixed subsections.
    General {
        title: &'static str,
        description: String,
        subsections: Vec<ControlGroup>,
    },
    /// GRI 3: controls plus the material-topic checklist.
    MaterialTopics {
        title: &'static str,
        description: &'static str,
        controls: Vec<FieldControl>,
        checklist: MaterialChecklist,
    },
    /// One topic standard.
    Topic {
        code: String,
        title: String,
        description: Option<&'static str>,
        controls: Vec<FieldControl>,
        notice: Option<&'static str>,
    },
}

impl SectionView {
    /// All controls in display order.
    pub fn controls(&self) -> Vec<&FieldControl> {
        match self {
            SectionView::Foundation { .. } => Vec::new(),
            SectionView::General { subsections, .. } => {
                subsections.iter().flat_map(|g| g.controls.iter()).collect()
            }
            SectionView::MaterialTopics { controls, .. } | SectionView::Topic { controls, .. } => {
                controls.iter().collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlGroup {
    pub name: &'static str,
    pub controls: Vec<FieldControl>,
}

/// An input bound to one form path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldControl {
    pub path: FieldPath,
    pub code: &'static str,
    pub caption: String, // "GRI 2-1"
    pub label: &'static str,
    pub required: bool,
    pub input: ControlInput,
    pub value: FieldValue,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ControlInput {
    Textarea { placeholder: String, rows: u8 },
    Text { placeholder: String },
    Number { placeholder: &'static str, unit: Option<&'static str> },
    Select { placeholder: &'static str, options: &'static [&'static str] },
    Checkbox { caption: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialChecklist {
    pub heading: &'static str,
    pub hint: &'static str,
    pub groups: Vec<ChecklistGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistGroup {
    pub heading: String, // "Environmental (300 series)"
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub code: &'static str,
    pub name: String,
    pub checked: bool,
}
