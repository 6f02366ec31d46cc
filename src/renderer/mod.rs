//! Section Renderer
//!
//! Turns the registry plus the current form tree into per-section view
//! models. Each control is bound to the store path it edits.

pub mod controls;
pub mod navigation;
pub mod sidebar;
pub mod view_models;

use crate::form_state::FormState;
use crate::registry::{is_topic_standard, Registry, GRI1, GRI2, GRI3};
use crate::schema::ValidationError;
use crate::store::FormStore;

pub use controls::{control_input, field_control};
pub use navigation::{NavigationOutcome, Navigator, ValidationStatus};
pub use sidebar::{build_sidebar, Sidebar, SidebarEntry, SidebarGroup};
pub use view_models::{
    ChecklistGroup, ChecklistItem, ControlGroup, ControlInput, FieldControl, MaterialChecklist, SectionView,
};

/// The eight GRI 1 reporting principles.
pub const REPORTING_PRINCIPLES: &[&str] = &[
    "Accuracy",
    "Balance",
    "Clarity",
    "Comparability",
    "Completeness",
    "Sustainability context",
    "Timeliness",
    "Verifiability",
];

pub const NO_TOPIC_DISCLOSURES: &str = "No specific disclosures defined for this standard. \
Use the management approach disclosure (GRI 3-3) to report on this topic.";

const GRI1_INTRO: &str = "GRI 1 establishes the reporting principles and requirements that \
organizations must comply with to report in accordance with the GRI Standards. It does not \
contain disclosure fields -- instead it defines the eight reporting principles:";

const GRI1_OUTRO: &str =
    "Navigate to GRI 2 (General Disclosures) or GRI 3 (Material Topics) to begin filling in your report.";

/// Render one section. `None` for ids the registry does not know.
pub fn render_section(
    registry: &'static Registry,
    state: &FormState,
    errors: &[ValidationError],
    section: &str,
) -> Option<SectionView> {
    match section {
        GRI1 => Some(SectionView::Foundation {
            title: "GRI 1: Foundation 2021",
            intro: GRI1_INTRO,
            principles: REPORTING_PRINCIPLES,
            outro: GRI1_OUTRO,
        }),
        GRI2 => Some(render_general(registry, state, errors)),
        GRI3 => Some(render_material_topics(registry, state, errors)),
        code if is_topic_standard(code) && registry.is_topic_code(code) => {
            Some(render_topic(registry, state, errors, code))
        }
        _ => None,
    }
}

/// Render against a store's current tree and recorded errors.
pub fn render_from_store(store: &FormStore, section: &str) -> Option<SectionView> {
    let errors = store.errors();
    store.with_state(|state| render_section(store.registry(), state, &errors, section))
}

fn render_general(registry: &'static Registry, state: &FormState, errors: &[ValidationError]) -> SectionView {
    let subsections = registry
        .gri2_subsections()
        .iter()
        .map(|sub| ControlGroup {
            name: sub.name,
            controls: registry
                .disclosures_in(GRI2)
                .filter(|d| sub.contains(d.code))
                .map(|d| field_control(d, state, errors))
                .collect(),
        })
        .filter(|group| !group.controls.is_empty())
        .collect();

    SectionView::General {
        title: "GRI 2: General Disclosures",
        description: format!(
            "{} disclosures covering organization profile, governance, strategy, and stakeholder engagement.",
            registry.disclosure_count(GRI2)
        ),
        subsections,
    }
}

fn render_material_topics(
    registry: &'static Registry,
    state: &FormState,
    errors: &[ValidationError],
) -> SectionView {
    let controls = registry
        .disclosures_in(GRI3)
        .map(|d| field_control(d, state, errors))
        .collect();

    let groups = registry
        .groups()
        .iter()
        .map(|group| ChecklistGroup {
            heading: format!("{} ({} series)", group.name, group.series),
            items: group
                .standards
                .iter()
                .map(|&code| ChecklistItem {
                    code,
                    name: registry.section_name(code),
                    checked: state.is_material(code),
                })
                .collect(),
        })
        .collect();

    SectionView::MaterialTopics {
        title: "GRI 3: Material Topics",
        description: "Process for determining and managing material topics.",
        controls,
        checklist: MaterialChecklist {
            heading: "Select Material Topics",
            hint: "Check the topics that are material to your organization. \
                   Selected topics will appear in the form for detailed disclosure.",
            groups,
        },
    }
}

fn render_topic(registry: &'static Registry, state: &FormState, errors: &[ValidationError], code: &str) -> SectionView {
    let meta = registry.section(code);
    let controls: Vec<FieldControl> = registry
        .disclosures_in(code)
        .map(|d| field_control(d, state, errors))
        .collect();
    let notice = controls.is_empty().then_some(NO_TOPIC_DISCLOSURES);

    SectionView::Topic {
        code: code.to_string(),
        title: registry.section_name(code),
        description: meta.map(|m| m.description).filter(|d| !d.is_empty()),
        controls,
        notice,
    }
}
