//! Field control construction.

use crate::form_state::{FieldPath, FieldValue, FormState};
use crate::registry::{DisclosureDefinition, FieldType};
use crate::schema::ValidationError;

use super::view_models::{ControlInput, FieldControl};

const TEXTAREA_ROWS: u8 = 3;

/// Input widget for a field type.
pub fn control_input(d: &DisclosureDefinition) -> ControlInput {
    match d.field_type {
        FieldType::Textarea => ControlInput::Textarea {
            placeholder: text_placeholder(d.label),
            rows: TEXTAREA_ROWS,
        },
        FieldType::Text => ControlInput::Text {
            placeholder: text_placeholder(d.label),
        },
        FieldType::Number => ControlInput::Number {
            placeholder: "0",
            unit: d.unit,
        },
        FieldType::Select => ControlInput::Select {
            placeholder: "Select an option...",
            options: d.options.unwrap_or(&[]),
        },
        FieldType::Boolean => ControlInput::Checkbox { caption: "Yes" },
    }
}

fn text_placeholder(label: &str) -> String {
    format!("Enter {}...", label.to_lowercase())
}

/// Control for one disclosure bound to `section`'s field group.
pub fn field_control(
    d: &'static DisclosureDefinition,
    state: &FormState,
    errors: &[ValidationError],
) -> FieldControl {
    let path = FieldPath::for_disclosure(d.section, &d.field_key());
    let value = match state.field(&path) {
        Some(FieldValue::Null) | None => empty_value(d.field_type),
        Some(v) => v.clone(),
    };
    let error = errors.iter().find(|e| e.path == path).map(|e| e.message.clone());

    FieldControl {
        caption: format!("GRI {}", d.code),
        code: d.code,
        label: d.label,
        required: d.required,
        input: control_input(d),
        value,
        error,
        path,
    }
}

fn empty_value(field_type: FieldType) -> FieldValue {
    match field_type {
        FieldType::Boolean => FieldValue::Flag(false),
        _ => FieldValue::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::schema::ValidationErrorKind;

    #[test]
    fn test_placeholders() {
        let registry = Registry::gri();
        let name = registry.disclosure("2-1").unwrap();
        assert_eq!(
            control_input(name),
            ControlInput::Textarea {
                placeholder: format!("Enter {}...", name.label.to_lowercase()),
                rows: 3
            }
        );

        let emissions = registry.disclosure("305-1").unwrap();
        match control_input(emissions) {
            ControlInput::Number { placeholder, unit } => {
                assert_eq!(placeholder, "0");
                assert_eq!(unit, emissions.unit);
                assert!(unit.is_some());
            }
            other => panic!("unexpected input {:?}", other),
        }
    }

    #[test]
    fn test_control_carries_value_and_error() {
        let registry = Registry::gri();
        let d = registry.disclosure("305-1").unwrap();
        let mut state = FormState::default();
        let path = FieldPath::topic_field("305", "disclosure_305_1");
        state.topics.entry("305".into()).or_default().insert("disclosure_305_1".into(), FieldValue::text("-1"));
        let errors = vec![ValidationError::new(path.clone(), ValidationErrorKind::Negative)];

        let control = field_control(d, &state, &errors);
        assert_eq!(control.path, path);
        assert_eq!(control.caption, "GRI 305-1");
        assert_eq!(control.value, FieldValue::text("-1"));
        assert_eq!(control.error.as_deref(), Some("Must be zero or positive"));
    }

    #[test]
    fn test_missing_value_renders_empty() {
        let d = Registry::gri().disclosure("2-3").unwrap();
        let control = field_control(d, &FormState::default(), &[]);
        assert_eq!(control.value, FieldValue::empty());
        assert!(control.error.is_none());
        assert!(control.required);
    }
}
