//! Sidebar navigator: fixed universal sections, then selected material
//! topics grouped by series.

use serde::Serialize;

use crate::completion::section_completion;
use crate::form_state::FormState;
use crate::registry::{Registry, GRI1, GRI2, GRI3};
use crate::schema::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarEntry {
    pub id: String,
    pub label: String,
    /// `None` for GRI 1, which has no fields.
    pub completion: Option<u8>,
    pub has_errors: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarGroup {
    pub name: &'static str,
    pub entries: Vec<SidebarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    pub heading: &'static str,
    pub sections: Vec<SidebarEntry>,
    pub topic_heading: &'static str,
    pub topic_groups: Vec<SidebarGroup>,
}

const FIXED: &[(&str, &str)] = &[
    (GRI1, "GRI 1: Foundation"),
    (GRI2, "GRI 2: General"),
    (GRI3, "GRI 3: Material Topics"),
];

pub fn build_sidebar(registry: &Registry, state: &FormState, errors: &[ValidationError], active: &str) -> Sidebar {
    let entry = |id: &str, label: String, completion: Option<u8>| SidebarEntry {
        id: id.to_string(),
        label,
        completion,
        has_errors: errors.iter().any(|e| e.section() == Some(id)),
        active: id == active,
    };

    let sections = FIXED
        .iter()
        .map(|&(id, label)| {
            let completion = (id != GRI1).then(|| section_completion(registry, state, id));
            entry(id, label.to_string(), completion)
        })
        .collect();

    let topic_groups = registry
        .groups()
        .iter()
        .filter_map(|group| {
            let entries: Vec<SidebarEntry> = group
                .standards
                .iter()
                .filter(|code| state.is_material(code))
                .map(|&code| {
                    let label = registry
                        .section(code)
                        .map_or_else(|| code.to_string(), |m| m.short_name().to_string());
                    entry(code, label, Some(section_completion(registry, state, code)))
                })
                .collect();
            (!entries.is_empty()).then_some(SidebarGroup {
                name: group.name,
                entries,
            })
        })
        .collect();

    Sidebar {
        heading: "GRI Sections",
        sections,
        topic_heading: "Topic Standards",
        topic_groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_state::{FieldPath, FieldValue};
    use crate::schema::{build_schema, ValidationErrorKind};

    #[test]
    fn test_fixed_entries() {
        let (_, state) = build_schema(Registry::gri());
        let sidebar = build_sidebar(Registry::gri(), &state, &[], "gri2");
        let labels: Vec<&str> = sidebar.sections.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["GRI 1: Foundation", "GRI 2: General", "GRI 3: Material Topics"]);
        assert_eq!(sidebar.sections[0].completion, None);
        assert_eq!(sidebar.sections[1].completion, Some(0));
        assert!(sidebar.sections[1].active);
        assert!(sidebar.topic_groups.is_empty());
    }

    #[test]
    fn test_topic_groups_follow_series_order() {
        let (_, mut state) = build_schema(Registry::gri());
        state.material_topics = vec!["403".into(), "305".into(), "201".into(), "302".into()];
        state
            .topics
            .get_mut("305")
            .unwrap()
            .insert("disclosure_305_1".into(), FieldValue::text("1200"));
        let errors = vec![ValidationError::new(
            FieldPath::topic("403"),
            ValidationErrorKind::MaterialTopicEmpty {
                section: "403".to_string(),
            },
        )];

        let sidebar = build_sidebar(Registry::gri(), &state, &errors, "305");
        let names: Vec<&str> = sidebar.topic_groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Economic", "Environmental", "Social"]);

        let env = &sidebar.topic_groups[1].entries;
        assert_eq!(env[0].id, "302");
        assert_eq!(env[1].label, "305: Emissions 2016");
        assert_eq!(env[1].completion, Some(14));
        assert!(env[1].active);
        assert!(sidebar.topic_groups[2].entries[0].has_errors);
    }
}
