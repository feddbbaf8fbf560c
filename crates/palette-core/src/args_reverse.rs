//! The inverse of [`crate::args::values_to_args`]: given a previously
//! submitted JSON value, reconstruct the draft string an editor would
//! show for it. Needed only when re-opening an existing `arrayObj` item
//! for editing.

use crate::schema::FieldKind;
use serde_json::Value;

pub fn value_to_draft(kind: &FieldKind, value: &Value) -> String {
    match (kind, value) {
        (FieldKind::Bool, Value::Bool(b)) => b.to_string(),
        (FieldKind::Number, Value::Number(n)) => n.to_string(),
        (FieldKind::ArrayText | FieldKind::ArrayEnum(_), Value::Array(items)) => items
            .iter()
            .map(plain_string)
            .collect::<Vec<_>>()
            .join(", "),
        (FieldKind::ArrayObj(_), Value::Array(_)) => value.to_string(),
        (_, Value::String(s)) => s.clone(),
        (_, Value::Null) => String::new(),
        (_, other) => other.to_string(),
    }
}

fn plain_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_enum_value_joins_with_comma_space() {
        let draft = value_to_draft(
            &FieldKind::ArrayEnum(vec!["a".to_string()]),
            &json!(["article", "email"]),
        );
        assert_eq!(draft, "article, email");
    }

    #[test]
    fn number_value_round_trips_without_trailing_zero() {
        assert_eq!(value_to_draft(&FieldKind::Number, &json!(10)), "10");
    }

    #[test]
    fn null_becomes_empty_draft() {
        assert_eq!(value_to_draft(&FieldKind::Text, &Value::Null), "");
    }
}
