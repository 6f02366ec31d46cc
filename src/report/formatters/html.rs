use crate::report::export::{ExportDocument, ExportItem, PageBody};

/// HTML formatter for the export document
pub struct HtmlFormatter;

/// Escape text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl HtmlFormatter {
    /// Format the export as a standalone print document with embedded CSS
    pub fn format(doc: &ExportDocument) -> String {
        let mut html = String::with_capacity(32 * 1024);

        let weights: Vec<String> = doc.typeface.weights.iter().map(u16::to_string).collect();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(doc.title)));
        html.push_str(&format!("<meta name=\"author\" content=\"{}\">\n", escape(doc.author)));
        html.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"https://fonts.googleapis.com/css2?family={}:wght@{}&display=swap\">\n",
            doc.typeface.family,
            weights.join(";")
        ));
        html.push_str("<style>\n");
        html.push_str(&format!("@page {{ size: {}; margin: 20mm 18mm; }}\n", doc.page_size));
        html.push_str(&format!(
            "body {{ font-family: '{}', sans-serif; font-weight: 400; color: #1f2937; font-size: 10pt; line-height: 1.5; margin: 0; }}\n",
            doc.typeface.family
        ));
        html.push_str(".page { page-break-after: always; break-after: page; position: relative; min-height: 250mm; padding-bottom: 12mm; }\n");
        html.push_str(".page:last-child { page-break-after: auto; break-after: auto; }\n");
        html.push_str(".cover { display: flex; flex-direction: column; justify-content: center; align-items: center; text-align: center; }\n");
        html.push_str(".cover h1 { font-size: 28pt; font-weight: 700; margin-bottom: 16px; }\n");
        html.push_str(".cover .org { font-size: 16pt; font-weight: 600; }\n");
        html.push_str(".cover .period, .cover .date { color: #4b5563; }\n");
        html.push_str(".cover .branding { position: absolute; bottom: 0; font-size: 8pt; color: #9ca3af; }\n");
        html.push_str(".header { font-size: 8pt; color: #9ca3af; border-bottom: 1px solid #e5e7eb; padding-bottom: 4px; margin-bottom: 16px; }\n");
        html.push_str(".footer { position: absolute; bottom: 0; right: 0; font-size: 8pt; color: #9ca3af; }\n");
        html.push_str("h2 { font-size: 14pt; font-weight: 700; margin: 0 0 12px; }\n");
        html.push_str("h3 { font-size: 10pt; font-weight: 600; text-transform: uppercase; color: #6b7280; margin: 18px 0 8px; }\n");
        html.push_str("h4 { font-size: 11pt; font-weight: 600; margin: 14px 0 6px; }\n");
        html.push_str(".warning { background: #fef3c7; border-left: 4px solid #f59e0b; padding: 10px 12px; margin-bottom: 16px; }\n");
        html.push_str(".disclosure { margin-bottom: 10px; break-inside: avoid; }\n");
        html.push_str(".disclosure .code { font-size: 8pt; color: #6b7280; }\n");
        html.push_str(".disclosure .label { font-weight: 600; }\n");
        html.push_str(".disclosure .value { white-space: pre-wrap; }\n");
        html.push_str(".not-reported { color: #9ca3af; font-style: italic; }\n");
        html.push_str("table { width: 100%; border-collapse: collapse; font-size: 8.5pt; }\n");
        html.push_str("th { text-align: left; font-weight: 600; border-bottom: 2px solid #d1d5db; padding: 6px 4px; }\n");
        html.push_str("td { border-bottom: 1px solid #e5e7eb; padding: 5px 4px; vertical-align: top; }\n");
        html.push_str("tr { break-inside: avoid; }\n");
        html.push_str("td.status { text-align: right; white-space: nowrap; }\n");
        html.push_str(".reported { color: #047857; font-weight: 600; }\n");
        html.push_str("</style>\n</head>\n<body>\n");

        // Cover
        html.push_str("<section class=\"page cover\">\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape(doc.cover.title)));
        html.push_str(&format!("<p class=\"org\">{}</p>\n", escape(&doc.cover.organization)));
        html.push_str(&format!("<p class=\"period\">{}</p>\n", escape(&doc.cover.reporting_period)));
        html.push_str(&format!("<p class=\"date\">{}</p>\n", escape(&doc.cover.date)));
        html.push_str(&format!("<p class=\"branding\">{}</p>\n", escape(doc.cover.branding)));
        html.push_str("</section>\n");

        for page in &doc.pages {
            html.push_str("<section class=\"page\">\n");
            html.push_str(&format!("<div class=\"header\">{}</div>\n", escape(page.header)));

            match &page.body {
                PageBody::General {
                    title,
                    banner,
                    subsections,
                } => {
                    if let Some(banner) = banner {
                        html.push_str(&format!("<div class=\"warning\">{}</div>\n", escape(banner)));
                    }
                    html.push_str(&format!("<h2>{}</h2>\n", escape(title)));
                    for group in subsections {
                        html.push_str(&format!("<h3>{}</h3>\n", escape(&group.name)));
                        for item in &group.items {
                            Self::format_item(&mut html, item);
                        }
                    }
                }
                PageBody::MaterialTopics {
                    title,
                    items,
                    selected_topics,
                } => {
                    html.push_str(&format!("<h2>{}</h2>\n", escape(title)));
                    for item in items {
                        Self::format_item(&mut html, item);
                    }
                    if !selected_topics.is_empty() {
                        html.push_str("<h3>Selected Material Topics</h3>\n<ul>\n");
                        for name in selected_topics {
                            html.push_str(&format!("<li>{}</li>\n", escape(name)));
                        }
                        html.push_str("</ul>\n");
                    }
                }
                PageBody::TopicStandards { title, groups } => {
                    html.push_str(&format!("<h2>{}</h2>\n", escape(title)));
                    for group in groups {
                        html.push_str(&format!("<h3>{}</h3>\n", escape(group.name)));
                        for topic in &group.topics {
                            html.push_str(&format!("<h4>{}</h4>\n", escape(&topic.name)));
                            for item in &topic.items {
                                Self::format_item(&mut html, item);
                            }
                        }
                    }
                }
                PageBody::ContentIndex { title, columns, rows } => {
                    html.push_str(&format!("<h2>{}</h2>\n", escape(title)));
                    html.push_str("<table>\n<thead>\n<tr>");
                    for column in columns.iter() {
                        html.push_str(&format!("<th>{}</th>", escape(column)));
                    }
                    html.push_str("</tr>\n</thead>\n<tbody>\n");
                    for row in rows {
                        let class = if row.reported { "reported" } else { "not-reported" };
                        html.push_str(&format!(
                            "<tr><td>{}</td><td>GRI {}</td><td>{}</td><td class=\"status {}\">{}</td></tr>\n",
                            escape(&row.standard),
                            escape(row.code),
                            escape(row.label),
                            class,
                            row.status()
                        ));
                    }
                    html.push_str("</tbody>\n</table>\n");
                }
            }

            html.push_str(&format!("<div class=\"footer\">{}</div>\n", escape(&page.footer)));
            html.push_str("</section>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn format_item(html: &mut String, item: &ExportItem) {
        html.push_str("<div class=\"disclosure\">\n");
        html.push_str(&format!("<div class=\"code\">{}</div>\n", escape(&item.caption)));
        html.push_str(&format!("<div class=\"label\">{}</div>\n", escape(item.label)));
        if item.reported {
            html.push_str(&format!("<div class=\"value\">{}</div>\n", escape(&item.text)));
        } else {
            html.push_str(&format!("<div class=\"not-reported\">{}</div>\n", escape(&item.text)));
        }
        html.push_str("</div>\n");
    }
}
