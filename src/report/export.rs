//! Export Builder
//!
//! Paginated, print-oriented document: cover page, GRI 2 page, GRI 3 page,
//! an optional Topic Standards page, and the content index. Export always
//! proceeds; outstanding validation errors become a warning banner on the
//! first body page.

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::form_state::FormState;
use crate::registry::{Registry, GRI2, GRI3};
use crate::schema::ValidationError;
use crate::store::FormStore;

use super::preview::REPORT_TITLE;
use super::traversal::{build_outline, ContentIndexEntry, DisclosureEntry};

pub const EXPORT_FILE_NAME: &str = "gri-sustainability-report.html";
pub const PAGE_SIZE: &str = "A4";
pub const AUTHOR: &str = "Sustainability Assessment Platform";
pub const BRANDING: &str = "Generated with Sustainability Assessment Platform";
pub const NOT_REPORTED: &str = "Not reported";
pub const WARNING_PREFIX: &str = "This report contains incomplete or invalid sections: ";
pub const CONTENT_INDEX_COLUMNS: &[&str] = &["GRI Standard", "Disclosure", "Title", "Status"];

const ORGANIZATION_FALLBACK: &str = "Organization Name";
const PERIOD_FALLBACK: &str = "Reporting Period";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typeface {
    pub family: &'static str,
    pub weights: &'static [u16],
}

pub const TYPEFACE: Typeface = Typeface {
    family: "Inter",
    weights: &[400, 600, 700],
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverPage {
    pub title: &'static str,
    pub organization: String,
    pub reporting_period: String,
    pub date: String,
    pub branding: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportItem {
    pub caption: String,
    pub label: &'static str,
    pub text: String,
    pub reported: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportGroup {
    pub name: String,
    pub items: Vec<ExportItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTopicGroup {
    pub name: &'static str,
    pub topics: Vec<ExportGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PageBody {
    General {
        title: &'static str,
        banner: Option<String>,
        subsections: Vec<ExportGroup>,
    },
    MaterialTopics {
        title: &'static str,
        items: Vec<ExportItem>,
        /// Display names of the selected topics, sorted by code.
        selected_topics: Vec<String>,
    },
    TopicStandards {
        title: &'static str,
        groups: Vec<ExportTopicGroup>,
    },
    ContentIndex {
        title: &'static str,
        columns: &'static [&'static str],
        rows: Vec<ContentIndexEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPage {
    pub number: u32,
    pub header: &'static str,
    pub footer: String,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub file_name: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub page_size: &'static str,
    pub typeface: Typeface,
    pub cover: CoverPage,
    pub pages: Vec<BodyPage>,
    /// Display names of sections with validation errors.
    pub invalid_sections: Vec<String>,
}

impl ExportDocument {
    pub fn banner(&self) -> Option<&str> {
        self.pages.iter().find_map(|p| match &p.body {
            PageBody::General { banner, .. } => banner.as_deref(),
            _ => None,
        })
    }
}

/// Long US date, e.g. "October 19, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Display names of the sections owning `errors`, in traversal order
/// (GRI 2, GRI 3, topic standards by code).
pub fn invalid_sections(registry: &Registry, errors: &[ValidationError]) -> Vec<String> {
    let owners: FxHashSet<&str> = errors.iter().filter_map(|e| e.section()).collect();
    let mut ordered: Vec<&str> = [GRI2, GRI3]
        .into_iter()
        .chain(registry.topic_codes())
        .filter(|id| owners.contains(id))
        .collect();

    let mut rest: Vec<&str> = owners.iter().copied().filter(|id| !ordered.contains(id)).collect();
    rest.sort_unstable();
    ordered.extend(rest);

    ordered.into_iter().map(|id| registry.section_name(id)).collect()
}

pub fn warning_banner(sections: &[String]) -> Option<String> {
    (!sections.is_empty()).then(|| format!("{}{}", WARNING_PREFIX, sections.join(", ")))
}

fn item(entry: &DisclosureEntry) -> ExportItem {
    ExportItem {
        caption: format!("GRI {}", entry.code),
        label: entry.label,
        text: entry.value.clone().unwrap_or_else(|| NOT_REPORTED.to_string()),
        reported: entry.reported(),
    }
}

/// Build the export document from a tree and its full validation result.
pub fn build_export(
    registry: &'static Registry,
    state: &FormState,
    errors: &[ValidationError],
    date: NaiveDate,
) -> ExportDocument {
    let outline = build_outline(registry, state);
    let invalid = invalid_sections(registry, errors);

    let cover = CoverPage {
        title: REPORT_TITLE,
        organization: outline
            .organization
            .clone()
            .unwrap_or_else(|| ORGANIZATION_FALLBACK.to_string()),
        reporting_period: outline
            .reporting_period
            .clone()
            .unwrap_or_else(|| PERIOD_FALLBACK.to_string()),
        date: format_long_date(date),
        branding: BRANDING,
    };

    let mut bodies = vec![
        PageBody::General {
            title: "GRI 2 - General Disclosures",
            banner: warning_banner(&invalid),
            subsections: outline
                .gri2
                .iter()
                .map(|sub| ExportGroup {
                    name: sub.name.to_string(),
                    items: sub.disclosures.iter().map(item).collect(),
                })
                .collect(),
        },
        PageBody::MaterialTopics {
            title: "GRI 3 - Material Topics",
            items: outline.gri3.iter().map(item).collect(),
            selected_topics: outline.material_topics.iter().map(|(_, name)| name.clone()).collect(),
        },
    ];

    if !outline.material_topics.is_empty() {
        bodies.push(PageBody::TopicStandards {
            title: "Topic Standards",
            groups: outline
                .topic_groups
                .iter()
                .map(|group| ExportTopicGroup {
                    name: group.name,
                    topics: group
                        .topics
                        .iter()
                        .map(|topic| ExportGroup {
                            name: topic.name.clone(),
                            items: topic.disclosures.iter().map(item).collect(),
                        })
                        .collect(),
                })
                .collect(),
        });
    }

    bodies.push(PageBody::ContentIndex {
        title: "GRI Content Index",
        columns: CONTENT_INDEX_COLUMNS,
        rows: outline.content_index,
    });

    // cover is page 1
    let pages = bodies
        .into_iter()
        .zip(2u32..)
        .map(|(body, number)| BodyPage {
            number,
            header: REPORT_TITLE,
            footer: format!("Page {}", number),
            body,
        })
        .collect();

    ExportDocument {
        file_name: EXPORT_FILE_NAME,
        title: REPORT_TITLE,
        author: AUTHOR,
        page_size: PAGE_SIZE,
        typeface: TYPEFACE,
        cover,
        pages,
        invalid_sections: invalid,
    }
}

/// Run full validation on the store (recording the errors) and build the
/// export from the same tree, under one lock.
pub fn prepare_export(store: &FormStore, date: NaiveDate) -> ExportDocument {
    let (valid, document) =
        store.validate_all_with(|state, errors| build_export(store.registry(), state, errors, date));
    tracing::info!(
        valid,
        invalid_sections = document.invalid_sections.len(),
        pages = document.pages.len() + 1,
        "Prepared report export"
    );
    document
}
