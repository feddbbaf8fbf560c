//! Schema resolver: collapses nullable unions, inlines `$ref`
//! lookups against a tool's `$defs`, and classifies each property into
//! one of the eight [`FieldKind`] editor shapes.
//!
//! The resolver is a pure function; callers cache its result per field
//! at tool-selection time rather than re-resolving on every paint.

use crate::schema::{DateFormat, FieldKind, ObjectSchema, RawSchema, SchemaProperty};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// Resolve a raw schema node into its classified, descriptive form.
pub fn resolve_property(raw: &RawSchema, defs: &IndexMap<String, RawSchema>) -> SchemaProperty {
    let resolved = dereference(raw, defs);
    SchemaProperty {
        kind: classify(&resolved, defs),
        description: resolved.description.clone(),
        examples: resolved.examples.clone().unwrap_or_default(),
        default: resolved.default.clone(),
    }
}

/// Follow `$ref` chains and collapse a two-member nullable `anyOf` into
/// its non-null member, preserving the outermost `description` if the
/// `$ref`/`anyOf` wrapper itself carried one.
fn dereference(raw: &RawSchema, defs: &IndexMap<String, RawSchema>) -> RawSchema {
    let outer_description = raw.description.clone();
    let mut current = raw.clone();
    let mut hops = 0;

    loop {
        // Guard against a cyclical $defs table; a real catalog never
        // has one, but a resolver must not hang on a malformed tool.
        if hops > 32 {
            break;
        }
        hops += 1;

        if let Some(ref_path) = current.reference.clone() {
            match defs.get(ref_name(&ref_path)) {
                Some(target) => {
                    current = target.clone();
                    continue;
                }
                // Schema resolution ambiguity: an unresolvable $ref
                // degrades to plain text rather than failing hard.
                None => {
                    current = RawSchema {
                        ty: Some("string".to_string()),
                        ..RawSchema::default()
                    };
                    break;
                }
            }
        }

        if let Some(variants) = current.any_of.clone() {
            let non_null: Vec<RawSchema> = variants
                .into_iter()
                .filter(|v| v.ty.as_deref() != Some("null"))
                .collect();
            if non_null.len() == 1 {
                current = non_null.into_iter().next().expect("len checked above");
                current.any_of = None;
                continue;
            }
            break;
        }

        break;
    }

    if outer_description.is_some() {
        current.description = outer_description;
    }
    current
}

/// The definition name from a `#/$defs/Name` (or `#/definitions/Name`) pointer.
fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

fn classify(raw: &RawSchema, defs: &IndexMap<String, RawSchema>) -> FieldKind {
    if let Some(sub) = array_obj_item(raw, defs) {
        return FieldKind::ArrayObj(Box::new(sub));
    }
    if let Some(fmt) = date_format(raw) {
        return FieldKind::Date(fmt);
    }
    if let Some(choices) = array_enum_choices(raw, defs) {
        return FieldKind::ArrayEnum(choices);
    }
    if raw.ty.as_deref() == Some("array") {
        return FieldKind::ArrayText;
    }
    if raw.ty.as_deref() == Some("boolean") {
        return FieldKind::Bool;
    }
    if let Some(values) = &raw.enum_values {
        return FieldKind::Enum(enum_choices(values));
    }
    if matches!(raw.ty.as_deref(), Some("integer") | Some("number")) {
        return FieldKind::Number;
    }
    FieldKind::Text
}

fn array_obj_item(raw: &RawSchema, defs: &IndexMap<String, RawSchema>) -> Option<ObjectSchema> {
    if raw.ty.as_deref() != Some("array") {
        return None;
    }
    let item = dereference(raw.items.as_deref()?, defs);
    if item.properties.is_none() {
        return None;
    }
    Some(object_schema(&item, defs))
}

fn date_format(raw: &RawSchema) -> Option<DateFormat> {
    if raw.ty.as_deref() != Some("string") {
        return None;
    }
    match raw.format.as_deref() {
        Some("date") => Some(DateFormat::Date),
        Some("date-time") => Some(DateFormat::DateTime),
        _ => None,
    }
}

fn array_enum_choices(raw: &RawSchema, defs: &IndexMap<String, RawSchema>) -> Option<Vec<String>> {
    if raw.ty.as_deref() != Some("array") {
        return None;
    }
    let item = dereference(raw.items.as_deref()?, defs);
    let values = item.enum_values.as_ref()?;
    Some(enum_choices(values))
}

fn enum_choices(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

fn object_schema(raw: &RawSchema, defs: &IndexMap<String, RawSchema>) -> ObjectSchema {
    let properties = raw
        .properties
        .clone()
        .unwrap_or_default()
        .into_iter()
        .map(|(name, prop)| (name, resolve_property(&prop, defs)))
        .collect();
    let required: IndexSet<String> = raw.required.clone().unwrap_or_default().into_iter().collect();
    ObjectSchema {
        properties,
        required,
    }
}
