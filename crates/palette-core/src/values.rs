//! `FormValues`: the stringly-typed draft map behind a form, and the
//! invariants it's expected to uphold (one entry per resolved field,
//! an unset field's draft is always the empty string).

use crate::schema::{FieldKind, FormField};
use indexmap::IndexMap;
use serde_json::Value;

/// Mapping from property name to its in-progress string draft.
pub type FormValues = IndexMap<String, String>;

/// Build a fresh `FormValues` for `fields`, seeding each draft from the
/// schema default (converted to the kind's string representation) or
/// `""` when there is none.
pub fn init_values(fields: &[FormField]) -> FormValues {
    fields
        .iter()
        .map(|f| (f.name.clone(), default_draft(f)))
        .collect()
}

fn default_draft(field: &FormField) -> String {
    let Some(default) = &field.property.default else {
        return String::new();
    };
    match &field.property.kind {
        FieldKind::Bool => match default {
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        },
        FieldKind::Number => match default {
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        },
        FieldKind::Text | FieldKind::Enum(_) | FieldKind::Date(_) => match default {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        FieldKind::ArrayText | FieldKind::ArrayEnum(_) => match default {
            Value::Array(items) => items
                .iter()
                .map(value_to_plain_string)
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        },
        FieldKind::ArrayObj(_) => match default {
            Value::Array(_) => default.to_string(),
            _ => "[]".to_string(),
        },
    }
}

fn value_to_plain_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A required field is unset iff its draft trims to empty; for
/// `arrayObj`, also unset when the parsed array is empty.
pub fn is_unset(kind: &FieldKind, draft: &str) -> bool {
    if draft.trim().is_empty() {
        return true;
    }
    if let FieldKind::ArrayObj(_) = kind {
        let parsed: Option<Vec<Value>> = serde_json::from_str(draft).ok();
        return parsed.map(|v| v.is_empty()).unwrap_or(true);
    }
    false
}

/// Count of required fields still unset, and whether the form is
/// complete — used for the `X of N required` header and for deciding
/// whether Execute may proceed.
pub fn required_progress(fields: &[FormField], values: &FormValues) -> (usize, usize) {
    let required: Vec<&FormField> = fields.iter().filter(|f| f.required).collect();
    let filled = required
        .iter()
        .filter(|f| {
            values
                .get(&f.name)
                .map(|draft| !is_unset(&f.property.kind, draft))
                .unwrap_or(false)
        })
        .count();
    (filled, required.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaProperty;

    fn field(name: &str, kind: FieldKind, required: bool, default: Option<Value>) -> FormField {
        FormField {
            name: name.to_string(),
            property: SchemaProperty {
                kind,
                description: None,
                examples: Vec::new(),
                default,
            },
            required,
        }
    }

    #[test]
    fn init_values_covers_every_field() {
        let fields = vec![
            field("url", FieldKind::Text, true, None),
            field("limit", FieldKind::Number, false, Some(serde_json::json!(10))),
        ];
        let values = init_values(&fields);
        assert_eq!(values.get("url"), Some(&String::new()));
        assert_eq!(values.get("limit"), Some(&"10".to_string()));
    }

    #[test]
    fn required_progress_counts_unset_fields() {
        let fields = vec![
            field("a", FieldKind::Text, true, None),
            field("b", FieldKind::Text, true, None),
        ];
        let mut values = init_values(&fields);
        assert_eq!(required_progress(&fields, &values), (0, 2));
        values.insert("a".to_string(), "x".to_string());
        assert_eq!(required_progress(&fields, &values), (1, 2));
    }

    #[test]
    fn array_obj_empty_json_array_is_unset() {
        assert!(is_unset(
            &FieldKind::ArrayObj(Box::new(crate::schema::ObjectSchema {
                properties: IndexMap::new(),
                required: Default::default(),
            })),
            "[]"
        ));
    }

    #[test]
    fn whitespace_only_draft_is_unset() {
        assert!(is_unset(&FieldKind::Text, "   "));
    }
}
