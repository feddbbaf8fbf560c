//! Schema-to-args: the single choke point that turns a completed
//! `FormValues` into the typed JSON arguments a tool call sends.

use crate::schema::{FieldKind, FormField};
use crate::values::FormValues;
use serde_json::{Map, Number, Value};

/// Convert `values` into the JSON-RPC `arguments` object for `fields`.
/// Drafts that trim to empty are omitted — they are "unset".
pub fn values_to_args(fields: &[FormField], values: &FormValues) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields {
        let Some(draft) = values.get(&field.name) else {
            continue;
        };
        if draft.trim().is_empty() {
            continue;
        }
        if let Some(value) = draft_to_value(&field.property.kind, draft) {
            out.insert(field.name.clone(), value);
        }
    }
    out
}

fn draft_to_value(kind: &FieldKind, draft: &str) -> Option<Value> {
    match kind {
        FieldKind::Number => parse_number(draft),
        FieldKind::Bool => Some(Value::Bool(draft == "true")),
        FieldKind::ArrayText | FieldKind::ArrayEnum(_) => Some(parse_array_of_strings(draft)),
        FieldKind::ArrayObj(_) => serde_json::from_str::<Value>(draft).ok(),
        FieldKind::Date(_) | FieldKind::Text | FieldKind::Enum(_) => {
            Some(Value::String(draft.to_string()))
        }
    }
}

fn parse_number(draft: &str) -> Option<Value> {
    if let Ok(i) = draft.parse::<i64>() {
        return Some(Value::from(i));
    }
    draft
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Attempt JSON-decode first (so a sub-form's own JSON-encoded array
/// survives unchanged); otherwise split on comma, trim, drop empties.
fn parse_array_of_strings(draft: &str) -> Value {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(draft) {
        return Value::Array(items);
    }
    let items: Vec<Value> = draft
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Value::String(s.to_string()))
        .collect();
    Value::Array(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaProperty;

    fn field(name: &str, kind: FieldKind) -> FormField {
        FormField {
            name: name.to_string(),
            property: SchemaProperty {
                kind,
                description: None,
                examples: Vec::new(),
                default: None,
            },
            required: false,
        }
    }

    #[test]
    fn empty_draft_is_omitted() {
        let fields = vec![field("q", FieldKind::Text)];
        let mut values = FormValues::new();
        values.insert("q".to_string(), String::new());
        let args = values_to_args(&fields, &values);
        assert!(args.is_empty());
    }

    #[test]
    fn number_parses_integer_without_decimal_point() {
        let fields = vec![field("limit", FieldKind::Number)];
        let mut values = FormValues::new();
        values.insert("limit".to_string(), "10".to_string());
        let args = values_to_args(&fields, &values);
        assert_eq!(args.get("limit"), Some(&Value::from(10)));
    }

    #[test]
    fn non_numeric_number_draft_is_silently_omitted() {
        let fields = vec![field("limit", FieldKind::Number)];
        let mut values = FormValues::new();
        values.insert("limit".to_string(), "ten".to_string());
        let args = values_to_args(&fields, &values);
        assert!(args.get("limit").is_none());
    }

    #[test]
    fn bool_true_only_on_exact_match() {
        let fields = vec![field("flag", FieldKind::Bool)];
        let mut values = FormValues::new();
        values.insert("flag".to_string(), "true".to_string());
        assert_eq!(
            values_to_args(&fields, &values).get("flag"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn array_enum_comma_separated_becomes_json_array() {
        let fields = vec![field(
            "category_in",
            FieldKind::ArrayEnum(vec!["article".to_string(), "email".to_string()]),
        )];
        let mut values = FormValues::new();
        values.insert("category_in".to_string(), "article, email".to_string());
        let args = values_to_args(&fields, &values);
        assert_eq!(
            args.get("category_in"),
            Some(&Value::Array(vec![
                Value::String("article".to_string()),
                Value::String("email".to_string())
            ]))
        );
    }

    #[test]
    fn array_obj_json_literal_decodes_to_array() {
        let fields = vec![field(
            "highlights",
            FieldKind::ArrayObj(Box::new(crate::schema::ObjectSchema {
                properties: Default::default(),
                required: Default::default(),
            })),
        )];
        let mut values = FormValues::new();
        values.insert(
            "highlights".to_string(),
            r#"[{"text":"Note"}]"#.to_string(),
        );
        let args = values_to_args(&fields, &values);
        assert_eq!(
            args.get("highlights"),
            Some(&serde_json::json!([{"text": "Note"}]))
        );
    }

    #[test]
    fn date_passes_through_unchanged() {
        let fields = vec![field("since", FieldKind::Date(crate::schema::DateFormat::Date))];
        let mut values = FormValues::new();
        values.insert("since".to_string(), "2024-01-01".to_string());
        let args = values_to_args(&fields, &values);
        assert_eq!(args.get("since"), Some(&Value::String("2024-01-01".to_string())));
    }
}
