use serde::Serialize;
use serde_json;

/// JSON formatter for report view models (preview, outline, export)
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format as pretty-printed JSON
    pub fn format<T: Serialize>(view: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(view)
    }

    /// Format as compact JSON (no whitespace)
    pub fn format_compact<T: Serialize>(view: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::report::export::build_export;
    use crate::report::preview::build_preview;
    use crate::schema::build_schema;
    use chrono::NaiveDate;

    #[test]
    fn test_format_preview_json() {
        let (_, state) = build_schema(Registry::gri());
        let json = JsonFormatter::format(&build_preview(Registry::gri(), &state)).unwrap();

        assert!(json.contains("\"title\": \"GRI Sustainability Report\""));
        assert!(json.contains("\"subtitle_is_placeholder\": true"));
        assert!(json.contains("\"content_index\""));
    }

    #[test]
    fn test_format_export_compact() {
        let (_, state) = build_schema(Registry::gri());
        let doc = build_export(Registry::gri(), &state, &[], NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        let json = JsonFormatter::format_compact(&doc).unwrap();

        assert!(!json.contains("\n  "));
        assert!(json.contains("\"kind\":\"contentIndex\""));
        assert!(json.contains("\"page_size\":\"A4\""));
    }
}
