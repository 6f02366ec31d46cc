//! Disclosure Registry
//!
//! Immutable metadata describing every GRI disclosure: its code, label,
//! section, field type and display unit. Loaded once per process and shared
//! read-only by the schema builder, renderer, completion calculator and
//! report builders.
//!
//! Lookups are indexed with FxHashMap (small string keys, hot paths in
//! validation and report traversal).

pub mod tables;

use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Section id of GRI 1 (Foundation, no disclosures).
pub const GRI1: &str = "gri1";
/// Section id of GRI 2 (General Disclosures).
pub const GRI2: &str = "gri2";
/// Section id of GRI 3 (Material Topics).
pub const GRI3: &str = "gri3";

/// Input control / value kind of a disclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Textarea,
    Text,
    Number,
    Select,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Textarea => "textarea",
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Boolean => "boolean",
        }
    }
}

/// One reportable data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureDefinition {
    pub code: &'static str,
    pub label: &'static str,
    pub section: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

impl DisclosureDefinition {
    /// Form field key for this disclosure (e.g. `disclosure_305_1`).
    pub fn field_key(&self) -> String {
        code_to_field_key(self.code)
    }
}

/// Display metadata for a section (universal standard or topic standard).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMeta {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl SectionMeta {
    /// Name without the leading "GRI " (e.g. "305: Emissions 2016").
    pub fn short_name(&self) -> &'static str {
        self.name.strip_prefix("GRI ").unwrap_or(self.name)
    }
}

/// Topic standards of one series (200 / 300 / 400).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStandardGroup {
    pub name: &'static str,
    pub series: &'static str,
    pub standards: &'static [&'static str],
}

/// Fixed grouping of GRI 2 disclosures by number range (inclusive).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gri2Subsection {
    pub name: &'static str,
    pub first: u16,
    pub last: u16,
}

impl Gri2Subsection {
    /// Whether a GRI 2 code such as "2-14" falls in this subsection.
    pub fn contains(&self, code: &str) -> bool {
        code.strip_prefix("2-")
            .and_then(|n| n.parse::<u16>().ok())
            .is_some_and(|n| n >= self.first && n <= self.last)
    }
}

/// Convert a disclosure code to its form field key: "2-1" -> "disclosure_2_1".
pub fn code_to_field_key(code: &str) -> String {
    format!("disclosure_{}", code.replace('-', "_"))
}

/// Topic standard ids are exactly three ASCII digits.
pub fn is_topic_standard(section: &str) -> bool {
    section.len() == 3 && section.bytes().all(|b| b.is_ascii_digit())
}

/// Indexed view over the static tables.
#[derive(Debug)]
pub struct Registry {
    disclosures: &'static [DisclosureDefinition],
    sections: &'static [SectionMeta],
    groups: &'static [TopicStandardGroup],
    gri2_subsections: &'static [Gri2Subsection],
    by_code: FxHashMap<&'static str, usize>,
    by_section: FxHashMap<&'static str, Vec<usize>>,
}

static GRI_REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn new(
        disclosures: &'static [DisclosureDefinition],
        sections: &'static [SectionMeta],
        groups: &'static [TopicStandardGroup],
        gri2_subsections: &'static [Gri2Subsection],
    ) -> Self {
        let mut by_code = FxHashMap::default();
        let mut by_section: FxHashMap<&'static str, Vec<usize>> = FxHashMap::default();
        for (idx, d) in disclosures.iter().enumerate() {
            by_code.insert(d.code, idx);
            by_section.entry(d.section).or_default().push(idx);
        }
        Self {
            disclosures,
            sections,
            groups,
            gri2_subsections,
            by_code,
            by_section,
        }
    }

    /// The process-wide GRI Standards registry.
    pub fn gri() -> &'static Registry {
        GRI_REGISTRY.get_or_init(|| {
            let registry = Registry::new(
                tables::DISCLOSURES,
                tables::SECTIONS,
                tables::TOPIC_GROUPS,
                tables::GRI2_SUBSECTIONS,
            );
            tracing::debug!(
                disclosures = registry.disclosures.len(),
                sections = registry.sections.len(),
                "Loaded GRI disclosure registry"
            );
            registry
        })
    }

    pub fn disclosures(&self) -> &'static [DisclosureDefinition] {
        self.disclosures
    }

    pub fn sections(&self) -> &'static [SectionMeta] {
        self.sections
    }

    pub fn groups(&self) -> &'static [TopicStandardGroup] {
        self.groups
    }

    pub fn gri2_subsections(&self) -> &'static [Gri2Subsection] {
        self.gri2_subsections
    }

    pub fn disclosure(&self, code: &str) -> Option<&'static DisclosureDefinition> {
        let disclosures = self.disclosures;
        self.by_code.get(code).map(|&idx| &disclosures[idx])
    }

    pub fn section(&self, id: &str) -> Option<&'static SectionMeta> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Display name for a section, falling back to "GRI <id>".
    pub fn section_name(&self, id: &str) -> String {
        match self.section(id) {
            Some(meta) => meta.name.to_string(),
            None => format!("GRI {}", id),
        }
    }

    /// Disclosures of one section in registry order (code ascending).
    pub fn disclosures_in<'a>(&'a self, section: &str) -> impl Iterator<Item = &'static DisclosureDefinition> + 'a {
        let disclosures = self.disclosures;
        self.by_section
            .get(section)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&idx| &disclosures[idx])
    }

    pub fn disclosure_count(&self, section: &str) -> usize {
        self.by_section.get(section).map_or(0, |v| v.len())
    }

    /// All topic standard codes in group order.
    pub fn topic_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().flat_map(|g| g.standards.iter().copied())
    }

    /// Whether `code` is a topic standard listed in one of the groups.
    pub fn is_topic_code(&self, code: &str) -> bool {
        self.topic_codes().any(|c| c == code)
    }

    /// Topic standards that have at least one disclosure (these get a
    /// field group in the form state).
    pub fn topic_codes_with_disclosures(&self) -> Vec<&'static str> {
        self.topic_codes()
            .filter(|code| self.disclosure_count(code) > 0)
            .collect()
    }

    /// Section ids that own at least one disclosure, in section table order.
    pub fn sections_with_disclosures(&self) -> Vec<&'static str> {
        self.sections
            .iter()
            .map(|s| s.id)
            .filter(|id| self.disclosure_count(id) > 0)
            .collect()
    }

    /// Group containing a topic standard.
    pub fn group_of(&self, code: &str) -> Option<&'static TopicStandardGroup> {
        self.groups.iter().find(|g| g.standards.contains(&code))
    }

    /// Check the table invariants. Returns every violation found.
    pub fn check_integrity(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        let mut codes = FxHashSet::default();
        let mut keys = FxHashSet::default();
        for d in self.disclosures {
            if !codes.insert(d.code) {
                problems.push(format!("duplicate disclosure code {}", d.code));
            }
            if !keys.insert(d.field_key()) {
                problems.push(format!("field key collision for {}", d.code));
            }
            if self.section(d.section).is_none() {
                problems.push(format!("{} references unknown section {}", d.code, d.section));
            }
            if d.options.is_some() && d.field_type != FieldType::Select {
                problems.push(format!("{} has options but is not a select field", d.code));
            }
        }

        let mut grouped = FxHashSet::default();
        for code in self.topic_codes() {
            if !grouped.insert(code) {
                problems.push(format!("topic {} appears in more than one group", code));
            }
        }
        for d in self.disclosures {
            if is_topic_standard(d.section) && !grouped.contains(d.section) {
                problems.push(format!("topic {} is not in any group", d.section));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            problems.dedup();
            Err(problems)
        }
    }
}
