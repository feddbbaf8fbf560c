//! Builds one `clap` sub-command per tool, one flag per property.

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command};
use palette_core::schema::{FieldKind, ToolDef};

/// A tool's `snake_case` property name becomes a `kebab-case` long flag.
fn flag_name(property_name: &str) -> String {
    property_name.replace('_', "-")
}

/// Build the sub-command for one tool: every property becomes a long
/// flag named after it, required flags marked as such, array-typed
/// properties accept repetition.
pub fn build_subcommand(tool: &ToolDef) -> Command {
    let mut command = Command::new(tool.name.clone());
    if let Some(description) = &tool.description {
        command = command.about(description.clone());
    }

    for field in tool.resolve_fields() {
        let mut arg = Arg::new(field.name.clone()).long(flag_name(&field.name));
        if let Some(description) = &field.property.description {
            arg = arg.help(description.clone());
        }
        arg = match &field.property.kind {
            FieldKind::Bool => arg.action(ArgAction::SetTrue),
            FieldKind::Enum(choices) => arg
                .value_parser(PossibleValuesParser::new(choices.clone()))
                .num_args(1)
                .required(field.required),
            FieldKind::ArrayText => arg.action(ArgAction::Append).num_args(1),
            FieldKind::ArrayEnum(choices) => arg
                .value_parser(PossibleValuesParser::new(choices.clone()))
                .action(ArgAction::Append)
                .num_args(1),
            FieldKind::ArrayObj(_) => arg.num_args(1).required(field.required).help(
                field
                    .property
                    .description
                    .clone()
                    .unwrap_or_default()
                    + " (JSON array literal, e.g. '[{\"text\":\"Note\"}]')",
            ),
            FieldKind::Text | FieldKind::Number | FieldKind::Date(_) => {
                arg.num_args(1).required(field.required)
            }
        };
        command = command.arg(arg);
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::{IndexMap, IndexSet};
    use palette_core::schema::RawSchema;

    fn tool_with(name: &str, ty: &str, required: bool) -> ToolDef {
        let mut properties = IndexMap::new();
        properties.insert(
            name.to_string(),
            RawSchema {
                ty: Some(ty.to_string()),
                ..Default::default()
            },
        );
        let mut reqs = IndexSet::new();
        if required {
            reqs.insert(name.to_string());
        }
        ToolDef {
            name: "demo".to_string(),
            description: None,
            properties,
            required: reqs,
            defs: IndexMap::new(),
        }
    }

    #[test]
    fn snake_case_property_becomes_kebab_case_flag() {
        let tool = tool_with("category_in", "string", false);
        let command = build_subcommand(&tool);
        let flag = command.get_arguments().find(|a| a.get_id() == "category_in").unwrap();
        assert!(flag.get_long_and_visible_aliases().unwrap().contains(&"category-in"));
    }

    #[test]
    fn required_text_field_is_required_in_command() {
        let tool = tool_with("url", "string", true);
        let command = build_subcommand(&tool);
        let flag = command.get_arguments().find(|a| a.get_id() == "url").unwrap();
        assert!(flag.is_required_set());
    }

    #[test]
    fn bool_field_is_a_switch_not_a_value_arg() {
        let tool = tool_with("archive", "boolean", false);
        let command = build_subcommand(&tool);
        let matches = command.try_get_matches_from(vec!["demo", "--archive"]).unwrap();
        assert!(matches.get_flag("archive"));
    }
}
