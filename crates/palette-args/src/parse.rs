//! Flattens matched CLI flags into the same string-draft shape the
//! interactive form editors produce, then hands them to
//! `palette_core::args::values_to_args` — the single choke point both
//! front ends share.

use clap::ArgMatches;
use palette_core::args::values_to_args;
use palette_core::schema::{FieldKind, ToolDef};
use palette_core::values::FormValues;
use serde_json::{Map, Value};

/// Build the JSON-RPC `arguments` object for `tool` from its matched
/// sub-command flags.
pub fn matches_to_args(tool: &ToolDef, matches: &ArgMatches) -> Map<String, Value> {
    let fields = tool.resolve_fields();
    let mut values = FormValues::new();
    for field in &fields {
        let draft = match &field.property.kind {
            FieldKind::Bool => matches.get_flag(&field.name).to_string(),
            FieldKind::ArrayText | FieldKind::ArrayEnum(_) => matches
                .get_many::<String>(&field.name)
                .map(|vals| vals.cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default(),
            _ => matches
                .get_one::<String>(&field.name)
                .cloned()
                .unwrap_or_default(),
        };
        values.insert(field.name.clone(), draft);
    }
    values_to_args(&fields, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::build_subcommand;
    use indexmap::{IndexMap, IndexSet};
    use palette_core::schema::RawSchema;

    fn text_tool(required: bool) -> ToolDef {
        let mut properties = IndexMap::new();
        properties.insert(
            "url".to_string(),
            RawSchema {
                ty: Some("string".to_string()),
                ..Default::default()
            },
        );
        let mut reqs = IndexSet::new();
        if required {
            reqs.insert("url".to_string());
        }
        ToolDef {
            name: "reader_create_document".to_string(),
            description: None,
            properties,
            required: reqs,
            defs: IndexMap::new(),
        }
    }

    #[test]
    fn text_flag_becomes_string_argument() {
        let tool = text_tool(true);
        let command = build_subcommand(&tool);
        let matches = command
            .try_get_matches_from(vec!["reader_create_document", "--url", "https://example.com"])
            .unwrap();
        let args = matches_to_args(&tool, &matches);
        assert_eq!(args.get("url"), Some(&Value::String("https://example.com".to_string())));
    }

    #[test]
    fn unset_optional_flag_is_omitted() {
        let tool = text_tool(false);
        let command = build_subcommand(&tool);
        let matches = command.try_get_matches_from(vec!["reader_create_document"]).unwrap();
        let args = matches_to_args(&tool, &matches);
        assert!(args.get("url").is_none());
    }

    #[test]
    fn repeated_array_enum_flag_joins_into_json_array() {
        let mut properties = IndexMap::new();
        properties.insert(
            "category_in".to_string(),
            RawSchema {
                ty: Some("array".to_string()),
                items: Some(Box::new(RawSchema {
                    enum_values: Some(vec![
                        serde_json::json!("article"),
                        serde_json::json!("email"),
                    ]),
                    ..Default::default()
                })),
                ..Default::default()
            },
        );
        let tool = ToolDef {
            name: "reader_search_documents".to_string(),
            description: None,
            properties,
            required: IndexSet::new(),
            defs: IndexMap::new(),
        };
        let command = build_subcommand(&tool);
        let matches = command
            .try_get_matches_from(vec![
                "reader_search_documents",
                "--category-in",
                "article",
                "--category-in",
                "email",
            ])
            .unwrap();
        let args = matches_to_args(&tool, &matches);
        assert_eq!(
            args.get("category_in"),
            Some(&serde_json::json!(["article", "email"]))
        );
    }
}
