//! Schema Builder
//!
//! Compiles the disclosure registry once into a validator and the default
//! form tree. The validator walks the same field list the defaults were built
//! from, so the two can never disagree on which fields exist.

pub mod rules;

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::form_state::{is_filled, FieldMap, FieldPath, FieldValue, FormState};
use crate::registry::{is_topic_standard, FieldType, Registry, GRI2, GRI3};

pub use rules::parse_number;

/// What went wrong with a field or field group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationErrorKind {
    Required,
    NotANumber,
    Negative,
    InvalidType { expected: FieldType },
    MaterialTopicEmpty { section: String },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::Required => f.write_str("Required"),
            ValidationErrorKind::NotANumber => f.write_str("Must be a number"),
            ValidationErrorKind::Negative => f.write_str("Must be zero or positive"),
            ValidationErrorKind::InvalidType { expected } => write!(f, "Expected a {} value", expected.as_str()),
            ValidationErrorKind::MaterialTopicEmpty { section } => write!(
                f,
                "Material topic {} is selected but has no disclosures filled",
                section
            ),
        }
    }
}

/// A validation failure attached to a field path (`gri2.<key>`,
/// `topics.<code>.<key>`) or a topic group (`topics.<code>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub path: FieldPath,
    #[serde(flatten)]
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: FieldPath, kind: ValidationErrorKind) -> Self {
        let message = kind.to_string();
        Self { path, kind, message }
    }

    /// Section owning the error (`gri2`, `gri3` or a topic code).
    pub fn section(&self) -> Option<&str> {
        self.path.section()
    }
}

/// Compiled rule for one disclosure field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub code: &'static str,
    pub key: String,
    pub path: FieldPath,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldRule {
    pub fn default_value(&self) -> FieldValue {
        match self.field_type {
            FieldType::Boolean => FieldValue::Flag(false),
            _ => FieldValue::empty(),
        }
    }

    /// Topic code for topic fields, `None` for GRI 2/3.
    fn topic(&self) -> Option<&str> {
        self.path.section().filter(|s| is_topic_standard(s))
    }
}

/// Validator compiled from a registry.
#[derive(Debug)]
pub struct Schema {
    registry: &'static Registry,
    fields: Vec<FieldRule>,
    index: FxHashMap<FieldPath, usize>,
    topic_codes: Vec<&'static str>,
}

/// Build the validator and the default-value tree from a registry.
pub fn build_schema(registry: &'static Registry) -> (Schema, FormState) {
    let schema = Schema::new(registry);
    let defaults = schema.default_values();
    tracing::debug!(
        fields = schema.fields.len(),
        topics = schema.topic_codes.len(),
        "Built validation schema"
    );
    (schema, defaults)
}

impl Schema {
    pub fn new(registry: &'static Registry) -> Self {
        let mut fields = Vec::with_capacity(registry.disclosures().len());

        for section in [GRI2, GRI3] {
            for d in registry.disclosures_in(section) {
                let key = d.field_key();
                fields.push(FieldRule {
                    code: d.code,
                    path: FieldPath::for_disclosure(section, &key),
                    key,
                    field_type: d.field_type,
                    required: d.required,
                });
            }
        }

        let topic_codes = registry.topic_codes_with_disclosures();
        for code in &topic_codes {
            for d in registry.disclosures_in(code) {
                let key = d.field_key();
                fields.push(FieldRule {
                    code: d.code,
                    path: FieldPath::topic_field(code, &key),
                    key,
                    field_type: d.field_type,
                    required: d.required,
                });
            }
        }

        let index = fields
            .iter()
            .enumerate()
            .map(|(idx, rule)| (rule.path.clone(), idx))
            .collect();

        Self {
            registry,
            fields,
            index,
            topic_codes,
        }
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Rule for a leaf path, if the schema declares that field.
    pub fn rule(&self, path: &FieldPath) -> Option<&FieldRule> {
        self.index.get(path).map(|&idx| &self.fields[idx])
    }

    /// Topic standards that own a field group.
    pub fn topic_codes(&self) -> &[&'static str] {
        &self.topic_codes
    }

    /// Default tree: every field at its default, no material topics, one
    /// field group per topic standard with disclosures.
    pub fn default_values(&self) -> FormState {
        let mut state = FormState::default();
        for code in &self.topic_codes {
            state.topics.insert(code.to_string(), FieldMap::new());
        }
        for rule in &self.fields {
            if let Some(slot) = state.field_slot(&rule.path) {
                *slot = rule.default_value();
            }
        }
        state
    }

    /// Validate the tree, keeping only errors at or under `scope`.
    pub fn validate(&self, state: &FormState, scope: Option<&FieldPath>) -> Vec<ValidationError> {
        let in_scope = |path: &FieldPath| scope.map_or(true, |s| path.starts_with(s));
        let mut errors = Vec::new();

        for rule in &self.fields {
            if !in_scope(&rule.path) {
                continue;
            }
            // topic groups missing from the data are not validated
            if let Some(code) = rule.topic() {
                if !state.topics.contains_key(code) {
                    continue;
                }
            }
            if let Some(kind) = rules::check(rule, state.field(&rule.path)) {
                errors.push(ValidationError::new(rule.path.clone(), kind));
            }
        }

        let mut seen = FxHashSet::default();
        for code in &state.material_topics {
            if !seen.insert(code.as_str()) {
                continue;
            }
            let group = FieldPath::topic(code);
            if !in_scope(&group) {
                continue;
            }
            if let Some(kind) = self.check_material_topic(state, code) {
                errors.push(ValidationError::new(group, kind));
            }
        }

        tracing::debug!(
            scope = %scope.map(|s| s.to_string()).unwrap_or_else(|| "<all>".to_string()),
            errors = errors.len(),
            "Validated form state"
        );
        errors
    }

    /// A selected topic with disclosures must have at least one filled.
    fn check_material_topic(&self, state: &FormState, code: &str) -> Option<ValidationErrorKind> {
        let values = state.topics.get(code)?;
        if self.registry.disclosure_count(code) == 0 {
            return None;
        }
        let any_filled = self
            .registry
            .disclosures_in(code)
            .any(|d| is_filled(values.get(&d.field_key())));
        (!any_filled).then(|| ValidationErrorKind::MaterialTopicEmpty {
            section: code.to_string(),
        })
    }

    /// Reconcile an arbitrary stored tree against the schema: declared fields
    /// take the stored value, missing fields get defaults, undeclared fields
    /// and groups are dropped. Material topics keep their order; entries that
    /// are not topic standards are dropped.
    pub fn reconcile(&self, stored: FormState) -> (FormState, usize) {
        let mut state = self.default_values();
        let mut dropped = 0usize;

        let FormState {
            gri2,
            gri3,
            material_topics,
            topics,
        } = stored;

        let mut take = |path: FieldPath, value: FieldValue| match self.rule(&path) {
            Some(_) => {
                if let Some(slot) = state.field_slot(&path) {
                    *slot = value;
                }
            }
            None => dropped += 1,
        };

        for (key, value) in gri2 {
            take(FieldPath::gri2(&key), value);
        }
        for (key, value) in gri3 {
            take(FieldPath::gri3(&key), value);
        }
        for (code, fields) in topics {
            for (key, value) in fields {
                take(FieldPath::topic_field(&code, &key), value);
            }
        }

        let mut seen = FxHashSet::default();
        for code in material_topics {
            if self.registry.is_topic_code(&code) && seen.insert(code.clone()) {
                state.material_topics.push(code);
            } else {
                dropped += 1;
            }
        }

        (state, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DisclosureDefinition, SectionMeta, TopicStandardGroup};
    use std::sync::OnceLock;

    fn gri_schema() -> (Schema, FormState) {
        build_schema(Registry::gri())
    }

    static FLAGS: &[DisclosureDefinition] = &[
        DisclosureDefinition {
            code: "2-1",
            label: "Organization name",
            section: GRI2,
            field_type: FieldType::Text,
            required: true,
            options: None,
            unit: None,
        },
        DisclosureDefinition {
            code: "2-2",
            label: "Has external assurance",
            section: GRI2,
            field_type: FieldType::Boolean,
            required: false,
            options: None,
            unit: None,
        },
        DisclosureDefinition {
            code: "2-3",
            label: "Reporting basis",
            section: GRI2,
            field_type: FieldType::Select,
            required: true,
            options: Some(&["Calendar year", "Fiscal year"]),
            unit: None,
        },
    ];
    static FLAG_SECTIONS: &[SectionMeta] = &[SectionMeta {
        id: GRI2,
        name: "GRI 2: General Disclosures 2021",
        description: "",
    }];
    static NO_GROUPS: &[TopicStandardGroup] = &[];

    fn flag_registry() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| Registry::new(FLAGS, FLAG_SECTIONS, NO_GROUPS, &[]))
    }

    #[test]
    fn test_defaults_shape() {
        let (_, defaults) = gri_schema();
        assert_eq!(defaults.gri2.len(), 30);
        assert_eq!(defaults.gri3.len(), 3);
        assert!(defaults.gri2.values().all(|v| *v == FieldValue::empty()));
        assert!(defaults.material_topics.is_empty());

        let topic_201 = &defaults.topics["201"];
        let keys: Vec<&str> = topic_201.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["disclosure_201_1", "disclosure_201_2", "disclosure_201_3", "disclosure_201_4"]
        );
        assert_eq!(defaults.topics.len(), Registry::gri().topic_codes_with_disclosures().len());
    }

    #[test]
    fn test_boolean_defaults_false() {
        let (_, defaults) = build_schema(flag_registry());
        assert_eq!(defaults.gri2["disclosure_2_2"], FieldValue::Flag(false));
        assert_eq!(defaults.gri2["disclosure_2_1"], FieldValue::empty());
    }

    #[test]
    fn test_defaults_fail_required_only() {
        let (schema, defaults) = gri_schema();
        let errors = schema.validate(&defaults, None);
        // every required field is in GRI 2/3; topic fields are optional
        assert_eq!(errors.len(), 33);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::Required));
        assert!(errors.iter().all(|e| matches!(e.section(), Some(GRI2) | Some(GRI3))));
    }

    #[test]
    fn test_scope_filters_errors() {
        let (schema, defaults) = gri_schema();
        let scope = FieldPath::for_section(GRI3).unwrap();
        let errors = schema.validate(&defaults, Some(&scope));
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.path.starts_with(&scope)));
    }

    #[test]
    fn test_material_topic_empty() {
        let (schema, mut state) = gri_schema();
        state.material_topics.push("305".to_string());
        let errors = schema.validate(&state, Some(&FieldPath::topic("305")));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path.to_string(), "topics.305");
        assert_eq!(
            errors[0].kind,
            ValidationErrorKind::MaterialTopicEmpty {
                section: "305".to_string()
            }
        );

        state
            .topics
            .get_mut("305")
            .unwrap()
            .insert("disclosure_305_1".to_string(), FieldValue::text("1200"));
        assert!(schema.validate(&state, Some(&FieldPath::topic("305"))).is_empty());
    }

    #[test]
    fn test_material_topic_without_group_is_skipped() {
        let (schema, mut state) = gri_schema();
        state.material_topics.push("305".to_string());
        state.topics.remove("305");
        assert!(schema.validate(&state, Some(&FieldPath::topic("305"))).is_empty());
    }

    #[test]
    fn test_negative_topic_number() {
        let (schema, mut state) = gri_schema();
        state
            .topics
            .get_mut("305")
            .unwrap()
            .insert("disclosure_305_1".to_string(), FieldValue::text("-5"));
        let errors = schema.validate(&state, Some(&FieldPath::topic("305")));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Negative);
        assert_eq!(errors[0].message, "Must be zero or positive");
    }

    #[test]
    fn test_select_options_not_enforced() {
        let (schema, mut state) = build_schema(flag_registry());
        state.gri2.insert("disclosure_2_1".into(), FieldValue::text("Acme"));
        state.gri2.insert("disclosure_2_3".into(), FieldValue::text("Lunar year"));
        assert!(schema.validate(&state, None).is_empty());
    }

    #[test]
    fn test_reconcile_drops_unknown_and_fills_missing() {
        let (schema, _) = gri_schema();
        let mut stored = FormState::default();
        stored.gri2.insert("disclosure_2_1".into(), FieldValue::text("Acme"));
        stored.gri2.insert("disclosure_2_99".into(), FieldValue::text("stale"));
        stored.material_topics = vec!["305".into(), "305".into(), "999".into()];

        let (state, dropped) = schema.reconcile(stored);
        assert_eq!(state.gri2["disclosure_2_1"], FieldValue::text("Acme"));
        assert_eq!(state.gri2["disclosure_2_2"], FieldValue::empty());
        assert!(!state.gri2.contains_key("disclosure_2_99"));
        assert_eq!(state.material_topics, vec!["305".to_string()]);
        assert_eq!(state.gri3.len(), 3);
        assert_eq!(dropped, 3);
    }

    #[test]
    fn test_error_serializes_flat() {
        let error = ValidationError::new(
            FieldPath::topic("305"),
            ValidationErrorKind::MaterialTopicEmpty {
                section: "305".to_string(),
            },
        );
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["path"], "topics.305");
        assert_eq!(json["kind"], "materialTopicEmpty");
        assert_eq!(json["section"], "305");
    }
}
