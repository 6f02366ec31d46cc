use crate::report::export::{ExportDocument, PageBody};
use crate::report::preview::{PreviewItem, ReportPreview};
use crate::report::traversal::ContentIndexEntry;

/// Markdown formatter for the preview and the export document
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format the live preview as markdown
    pub fn format_preview(preview: &ReportPreview) -> String {
        let mut md = String::with_capacity(8192);

        md.push_str(&format!("# {}\n\n", preview.title));
        if preview.subtitle_is_placeholder {
            md.push_str(&format!("*{}*\n\n", preview.subtitle));
        } else {
            md.push_str(&format!("**{}**\n\n", preview.subtitle));
        }

        md.push_str("## GRI 2 - General Disclosures\n\n");
        for group in &preview.general {
            md.push_str(&format!("### {}\n\n", group.name));
            for item in &group.items {
                Self::format_preview_item(&mut md, item);
            }
        }

        md.push_str("## GRI 3 - Material Topics\n\n");
        for item in &preview.material {
            Self::format_preview_item(&mut md, item);
        }

        if !preview.topic_groups.is_empty() {
            md.push_str("## Topic Standards\n\n");
            for group in &preview.topic_groups {
                md.push_str(&format!("### {}\n\n", group.name));
                for topic in &group.topics {
                    md.push_str(&format!("#### {}\n\n", topic.name));
                    for item in &topic.items {
                        Self::format_preview_item(&mut md, item);
                    }
                }
            }
        }

        md.push_str("## GRI Content Index\n\n");
        md.push_str("| Disclosure | Title | Status |\n");
        md.push_str("|------------|-------|--------|\n");
        for entry in &preview.content_index {
            md.push_str(&format!(
                "| GRI {} | {} | {} |\n",
                entry.code,
                escape_cell(entry.label),
                entry.status()
            ));
        }
        md.push('\n');

        md
    }

    fn format_preview_item(md: &mut String, item: &PreviewItem) {
        md.push_str(&format!("**{}** {}\n\n", item.caption, item.label));
        if item.reported {
            md.push_str(&format!("{}\n\n", item.text));
        } else {
            md.push_str(&format!("*{}*\n\n", item.text));
        }
    }

    /// Format the export document as markdown (one section per page)
    pub fn format_export(doc: &ExportDocument) -> String {
        let mut md = String::with_capacity(8192);

        md.push_str(&format!("# {}\n\n", doc.cover.title));
        md.push_str(&format!("**{}**  \n", doc.cover.organization));
        md.push_str(&format!("{}  \n", doc.cover.reporting_period));
        md.push_str(&format!("{}\n\n", doc.cover.date));
        md.push_str(&format!("*{}*\n\n", doc.cover.branding));

        for page in &doc.pages {
            md.push_str("---\n\n");
            match &page.body {
                PageBody::General {
                    title,
                    banner,
                    subsections,
                } => {
                    if let Some(banner) = banner {
                        md.push_str(&format!("> ⚠ {}\n\n", banner));
                    }
                    md.push_str(&format!("## {}\n\n", title));
                    for group in subsections {
                        md.push_str(&format!("### {}\n\n", group.name));
                        for item in &group.items {
                            md.push_str(&format!("**{}** {}  \n{}\n\n", item.caption, item.label, item.text));
                        }
                    }
                }
                PageBody::MaterialTopics {
                    title,
                    items,
                    selected_topics,
                } => {
                    md.push_str(&format!("## {}\n\n", title));
                    for item in items {
                        md.push_str(&format!("**{}** {}  \n{}\n\n", item.caption, item.label, item.text));
                    }
                    if !selected_topics.is_empty() {
                        md.push_str("### Selected Material Topics\n\n");
                        for name in selected_topics {
                            md.push_str(&format!("- {}\n", name));
                        }
                        md.push('\n');
                    }
                }
                PageBody::TopicStandards { title, groups } => {
                    md.push_str(&format!("## {}\n\n", title));
                    for group in groups {
                        md.push_str(&format!("### {}\n\n", group.name));
                        for topic in &group.topics {
                            md.push_str(&format!("#### {}\n\n", topic.name));
                            for item in &topic.items {
                                md.push_str(&format!("**{}** {}  \n{}\n\n", item.caption, item.label, item.text));
                            }
                        }
                    }
                }
                PageBody::ContentIndex { title, columns, rows } => {
                    md.push_str(&format!("## {}\n\n", title));
                    Self::format_index_table(&mut md, columns, rows);
                }
            }
            md.push_str(&format!("*{}*\n\n", page.footer));
        }

        md
    }

    fn format_index_table(md: &mut String, columns: &[&str], rows: &[ContentIndexEntry]) {
        md.push_str(&format!("| {} |\n", columns.join(" | ")));
        md.push_str(&format!("|{}\n", "---|".repeat(columns.len())));
        for row in rows {
            md.push_str(&format!(
                "| {} | GRI {} | {} | {} |\n",
                escape_cell(&row.standard),
                row.code,
                escape_cell(row.label),
                row.status()
            ));
        }
        md.push('\n');
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_state::FieldValue;
    use crate::registry::Registry;
    use crate::report::export::build_export;
    use crate::report::preview::build_preview;
    use crate::schema::build_schema;
    use chrono::NaiveDate;

    #[test]
    fn test_format_preview() {
        let (_, mut state) = build_schema(Registry::gri());
        state.gri2.insert("disclosure_2_1".into(), FieldValue::text("Acme Corp"));
        let md = MarkdownFormatter::format_preview(&build_preview(Registry::gri(), &state));

        assert!(md.starts_with("# GRI Sustainability Report\n\n**Acme Corp**"));
        assert!(md.contains("### The Organization"));
        assert!(md.contains("| GRI 2-1 | Organizational details | Reported |"));
        assert!(md.contains("| GRI 2-2 |"));
        assert!(!md.contains("## Topic Standards"));
    }

    #[test]
    fn test_format_export() {
        let (schema, mut state) = build_schema(Registry::gri());
        state.material_topics.push("305".into());
        let errors = schema.validate(&state, None);
        let doc = build_export(Registry::gri(), &state, &errors, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let md = MarkdownFormatter::format_export(&doc);

        assert!(md.contains("**Organization Name**"));
        assert!(md.contains("October 19, 2026"));
        assert!(md.contains("> ⚠ This report contains incomplete or invalid sections: "));
        assert!(md.contains("- GRI 305: Emissions 2016"));
        assert!(md.contains("| GRI Standard | Disclosure | Title | Status |"));
        assert!(md.contains("*Page 5*"));
    }
}
