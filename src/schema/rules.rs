//! Per-field validation rules.
//!
//! | fieldType              | required                    | optional             |
//! |------------------------|-----------------------------|----------------------|
//! | textarea / text/select | non-empty string            | any string, ""       |
//! | number                 | numeric literal >= 0        | numeric >= 0, or ""  |
//! | boolean                | boolean (default false)     | boolean              |
//!
//! Select options are not enforced: any string is accepted.

use crate::form_state::FieldValue;
use crate::registry::FieldType;

use super::{FieldRule, ValidationErrorKind};

/// Parse a stored number literal. Rejects empty, non-numeric and non-finite input.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Check one field value against its rule.
pub(crate) fn check(rule: &FieldRule, value: Option<&FieldValue>) -> Option<ValidationErrorKind> {
    match rule.field_type {
        FieldType::Textarea | FieldType::Text | FieldType::Select => check_string(rule, value),
        FieldType::Number => check_number(rule, value),
        FieldType::Boolean => check_boolean(rule, value),
    }
}

fn check_string(rule: &FieldRule, value: Option<&FieldValue>) -> Option<ValidationErrorKind> {
    match value {
        Some(FieldValue::Text(s)) if s.is_empty() && rule.required => Some(ValidationErrorKind::Required),
        Some(FieldValue::Text(_)) => None,
        None | Some(FieldValue::Null) if rule.required => Some(ValidationErrorKind::Required),
        None | Some(FieldValue::Null) => None,
        Some(_) => Some(ValidationErrorKind::InvalidType {
            expected: rule.field_type,
        }),
    }
}

fn check_number(rule: &FieldRule, value: Option<&FieldValue>) -> Option<ValidationErrorKind> {
    let number = match value {
        Some(FieldValue::Text(s)) if s.is_empty() => {
            return rule.required.then_some(ValidationErrorKind::NotANumber);
        }
        None | Some(FieldValue::Null) => {
            return rule.required.then_some(ValidationErrorKind::NotANumber);
        }
        Some(FieldValue::Text(s)) => parse_number(s),
        Some(FieldValue::Number(n)) => n.as_f64().filter(|n| n.is_finite()),
        Some(FieldValue::Flag(_)) => {
            return Some(ValidationErrorKind::InvalidType {
                expected: FieldType::Number,
            });
        }
    };

    match number {
        None => Some(ValidationErrorKind::NotANumber),
        Some(n) if n < 0.0 => Some(ValidationErrorKind::Negative),
        Some(_) => None,
    }
}

fn check_boolean(_rule: &FieldRule, value: Option<&FieldValue>) -> Option<ValidationErrorKind> {
    match value {
        None | Some(FieldValue::Null) | Some(FieldValue::Flag(_)) => None,
        Some(_) => Some(ValidationErrorKind::InvalidType {
            expected: FieldType::Boolean,
        }),
    }
}
