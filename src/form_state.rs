//! Form State
//!
//! The single value tree for a whole assessment:
//!
//! ```text
//! {
//!   "gri2":           { "disclosure_2_1": "...", ... },
//!   "gri3":           { "disclosure_3_1": "...", ... },
//!   "materialTopics": ["305", "201"],
//!   "topics":         { "201": { "disclosure_201_1": "" , ... }, ... }
//! }
//! ```
//!
//! Key names match the persisted browser-era snapshot so stored data stays
//! readable. Numbers are kept as text until validation coerces them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::StoreError;
use crate::registry::{GRI2, GRI3};

/// Key of the material topics list in the tree.
pub const MATERIAL_TOPICS: &str = "materialTopics";
/// Key of the topic field groups in the tree.
pub const TOPICS: &str = "topics";

/// A single field value.
///
/// Text covers textarea/text/select/number inputs ("" = unfilled).
/// Numbers only appear when a snapshot was written by another tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
    Null,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Number(_) => true,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Null => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Null => Ok(()),
        }
    }
}

/// The "filled" predicate: present, not null, not "", not false.
pub fn is_filled(value: Option<&FieldValue>) -> bool {
    value.is_some_and(FieldValue::is_filled)
}

/// Field key -> value for one section.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Whole-assessment value tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(default)]
    pub gri2: FieldMap,
    #[serde(default)]
    pub gri3: FieldMap,
    #[serde(default)]
    pub material_topics: Vec<String>,
    #[serde(default)]
    pub topics: BTreeMap<String, FieldMap>,
}

impl FormState {
    /// Values of a section: `gri2`, `gri3` or a topic code.
    pub fn section_values(&self, section: &str) -> Option<&FieldMap> {
        match section {
            GRI2 => Some(&self.gri2),
            GRI3 => Some(&self.gri3),
            code => self.topics.get(code),
        }
    }

    pub fn is_material(&self, code: &str) -> bool {
        self.material_topics.iter().any(|t| t == code)
    }

    /// Material topics sorted lexicographically (report order).
    pub fn sorted_material_topics(&self) -> Vec<String> {
        let mut topics = self.material_topics.clone();
        topics.sort();
        topics.dedup();
        topics
    }

    /// Leaf value at a field path, if the path names a field.
    pub fn field(&self, path: &FieldPath) -> Option<&FieldValue> {
        match path.segments() {
            [section, key] if section == GRI2 => self.gri2.get(key),
            [section, key] if section == GRI3 => self.gri3.get(key),
            [root, code, key] if root == TOPICS => self.topics.get(code)?.get(key),
            _ => None,
        }
    }

    /// Mutable slot for a field path. Topic groups are created on demand.
    pub(crate) fn field_slot(&mut self, path: &FieldPath) -> Option<&mut FieldValue> {
        match path.segments() {
            [section, key] if section == GRI2 => Some(self.gri2.entry(key.clone()).or_insert(FieldValue::Null)),
            [section, key] if section == GRI3 => Some(self.gri3.entry(key.clone()).or_insert(FieldValue::Null)),
            [root, code, key] if root == TOPICS => Some(
                self.topics
                    .entry(code.clone())
                    .or_default()
                    .entry(key.clone())
                    .or_insert(FieldValue::Null),
            ),
            _ => None,
        }
    }

    /// Subtree at a path as JSON (whole tree for the root path).
    pub fn value_at(&self, path: Option<&FieldPath>) -> Option<serde_json::Value> {
        let root = serde_json::to_value(self).ok()?;
        let Some(path) = path else {
            return Some(root);
        };
        let mut current = &root;
        for segment in path.segments() {
            current = match current {
                serde_json::Value::Object(map) => map.get(segment.as_str())?,
                serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }
}

/// Dotted path into the form tree: `gri2.disclosure_2_1`,
/// `topics.305.disclosure_305_1`, `topics.305`, `gri3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: SmallVec<[String; 3]>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let trimmed = raw.trim().trim_matches('.');
        if trimmed.is_empty() {
            return Err(StoreError::InvalidPath(raw.to_string()));
        }
        let segments: SmallVec<[String; 3]> = trimmed.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(StoreError::InvalidPath(raw.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn gri2(key: &str) -> Self {
        Self::from_segments([GRI2, key])
    }

    pub fn gri3(key: &str) -> Self {
        Self::from_segments([GRI3, key])
    }

    pub fn topic(code: &str) -> Self {
        Self::from_segments([TOPICS, code])
    }

    pub fn topic_field(code: &str, key: &str) -> Self {
        Self::from_segments([TOPICS, code, key])
    }

    /// Path of the field group holding a section's values
    /// (`gri2`, `gri3`, `topics.<code>`); `None` for sections without one.
    pub fn for_section(section: &str) -> Option<Self> {
        match section {
            GRI2 | GRI3 => Some(Self::from_segments([section])),
            code if crate::registry::is_topic_standard(code) => Some(Self::topic(code)),
            _ => None,
        }
    }

    /// Field path of a disclosure inside its section.
    pub fn for_disclosure(section: &str, key: &str) -> Self {
        match section {
            GRI2 | GRI3 => Self::from_segments([section, key]),
            code => Self::topic_field(code, key),
        }
    }

    fn from_segments<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            segments: parts.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments.iter().zip(prefix.segments.iter()).all(|(a, b)| a == b)
    }

    /// Section id that owns this path (`gri2`, `gri3`, or a topic code).
    pub fn section(&self) -> Option<&str> {
        match self.segments() {
            [root, code, ..] if root == TOPICS => Some(code.as_str()),
            [root, ..] if root == GRI2 || root == GRI3 => Some(root.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        FieldPath::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_predicate() {
        assert!(!is_filled(None));
        assert!(!is_filled(Some(&FieldValue::Null)));
        assert!(!is_filled(Some(&FieldValue::empty())));
        assert!(!is_filled(Some(&FieldValue::Flag(false))));
        assert!(is_filled(Some(&FieldValue::Flag(true))));
        assert!(is_filled(Some(&FieldValue::text("0"))));
        assert!(is_filled(Some(&FieldValue::Number(0.into()))));
    }

    #[test]
    fn test_field_value_untagged_json() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"["a", "", true, 12, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::text("a"),
                FieldValue::empty(),
                FieldValue::Flag(true),
                FieldValue::Number(12.into()),
                FieldValue::Null,
            ]
        );
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"["a","",true,12,null]"#);
    }

    #[test]
    fn test_path_parse_and_display() {
        let path = FieldPath::parse("topics.305.disclosure_305_1").unwrap();
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.to_string(), "topics.305.disclosure_305_1");
        assert_eq!(path.section(), Some("305"));
        assert!(path.starts_with(&FieldPath::topic("305")));
        assert!(!path.starts_with(&FieldPath::topic("30")));
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("gri2..x").is_err());
    }

    #[test]
    fn test_for_section() {
        assert_eq!(FieldPath::for_section("gri2").unwrap().to_string(), "gri2");
        assert_eq!(FieldPath::for_section("305").unwrap().to_string(), "topics.305");
        assert!(FieldPath::for_section("gri1").is_none());
    }

    #[test]
    fn test_material_topics_key_name() {
        let state = FormState {
            material_topics: vec!["305".to_string()],
            ..FormState::default()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["materialTopics"], serde_json::json!(["305"]));
    }

    #[test]
    fn test_value_at() {
        let mut state = FormState::default();
        state.gri2.insert("disclosure_2_1".into(), FieldValue::text("Acme"));
        state.material_topics.push("305".into());
        let path = FieldPath::gri2("disclosure_2_1");
        assert_eq!(state.value_at(Some(&path)), Some(serde_json::json!("Acme")));
        let topics = FieldPath::parse("materialTopics.0").unwrap();
        assert_eq!(state.value_at(Some(&topics)), Some(serde_json::json!("305")));
        assert_eq!(state.value_at(Some(&FieldPath::gri2("missing"))), None);
    }
}
