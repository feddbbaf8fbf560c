//! Form view input: palette
//! navigation, field editor dispatch, and the `arrayObj` sub-form
//! push/pop that neither view alone can express.

use super::{editor, Outcome};
use crate::input::text_edit;
use palette_core::args::values_to_args;
use palette_core::schema::FieldKind;
use palette_core::state::{
    AppState, FieldEditor, FormOrigin, FormStackEntry, FormState, LoadingState, View, ACTION_ROW,
};
use palette_term::KeyEvent;
use serde_json::Value;

pub fn handle(state: &mut AppState, key: &KeyEvent) -> Outcome {
    let is_editing = state
        .form
        .as_ref()
        .map(|f| f.editing.is_some())
        .unwrap_or(false);
    if is_editing {
        return handle_editing(state, key);
    }
    handle_palette(state, key)
}

fn handle_editing(state: &mut AppState, key: &KeyEvent) -> Outcome {
    let is_array_obj = matches!(
        state.form.as_ref().and_then(|f| f.editing.as_ref()),
        Some((_, FieldEditor::ArrayObjList { .. }))
    );
    if is_array_obj {
        return handle_array_obj_editor(state, key);
    }

    let Some(form) = state.form.as_mut() else {
        return Outcome::Continue;
    };
    let Some((_, editor_state)) = form.editing.as_mut() else {
        return Outcome::Continue;
    };
    match editor::handle(editor_state, key) {
        editor::EditorOutcome::Continue => {}
        editor::EditorOutcome::Cancel => form.editing = None,
        editor::EditorOutcome::Confirm(draft) => commit_field(form, draft),
    }
    Outcome::Continue
}

/// Write the confirmed draft, exit edit mode, reset the filter, and
/// auto-advance the palette cursor to the next unfilled required field.
fn commit_field(form: &mut FormState, draft: String) {
    let Some((idx, _)) = form.editing.take() else {
        return;
    };
    if let Some(field) = form.fields.get(idx) {
        form.values.insert(field.name.clone(), draft);
    }
    form.search_query.clear();
    form.refilter();
    if let Some(next) = form.first_unfilled_required() {
        if let Some(pos) = form.filtered_indices.iter().position(|&i| i == next as i64) {
            form.list_cursor = pos;
        }
    }
}

fn handle_array_obj_editor(state: &mut AppState, key: &KeyEvent) -> Outcome {
    let Some(form) = state.form.as_mut() else {
        return Outcome::Continue;
    };
    let Some((idx, FieldEditor::ArrayObjList { cursor })) = form.editing.clone() else {
        return Outcome::Continue;
    };
    let Some(field) = form.fields.get(idx).cloned() else {
        return Outcome::Continue;
    };
    let FieldKind::ArrayObj(schema) = field.property.kind.clone() else {
        return Outcome::Continue;
    };
    let draft = form.values.get(&field.name).cloned().unwrap_or_else(|| "[]".to_string());
    let mut items: Vec<Value> = serde_json::from_str(&draft).unwrap_or_default();

    match key.name.as_str() {
        "up" => set_list_cursor(form, idx, step(cursor, items.len(), -1)),
        "down" => set_list_cursor(form, idx, step(cursor, items.len(), 1)),
        "backspace" if cursor < items.len() => {
            items.remove(cursor);
            form.values.insert(field.name.clone(), serde_json::to_string(&items).unwrap_or_default());
            set_list_cursor(form, idx, cursor.min(items.len().saturating_sub(1)));
        }
        "escape" => form.editing = None,
        "return" => descend(state, &field.name, &schema, cursor, &items),
        _ => {}
    }
    Outcome::Continue
}

fn step(cursor: usize, len: usize, delta: i32) -> usize {
    let total = len as i32 + 1;
    ((cursor as i32 + delta).rem_euclid(total.max(1))) as usize
}

fn set_list_cursor(form: &mut FormState, idx: usize, cursor: usize) {
    form.editing = Some((idx, FieldEditor::ArrayObjList { cursor }));
}

fn descend(
    state: &mut AppState,
    array_field_name: &str,
    schema: &palette_core::ObjectSchema,
    cursor: usize,
    items: &[Value],
) {
    let Some(mut parent) = state.form.take() else {
        return;
    };
    let editing_existing = cursor < items.len();
    let initial = if editing_existing {
        items[cursor].as_object()
    } else {
        None
    };
    let origin = if editing_existing {
        FormOrigin::EditingItem
    } else {
        FormOrigin::AppendingItem
    };
    let label = format!("{array_field_name} item");
    let subform = FormState::new_subform(schema, label, origin, initial);

    parent.editing = None;
    let entry = FormStackEntry {
        tool_name: parent.tool_name.clone(),
        fields: parent.fields,
        values: parent.values,
        origin: parent.origin,
        array_field_name: array_field_name.to_string(),
        edit_index: editing_existing.then_some(cursor),
    };
    let mut next = subform;
    let mut stack = parent.stack;
    stack.push(entry);
    next.stack = stack;
    state.form = Some(next);
}

fn handle_palette(state: &mut AppState, key: &KeyEvent) -> Outcome {
    match key.name.as_str() {
        "escape" => return escape(state),
        "tab" => jump_to_next_required(state),
        "o" if form_search_empty(state) => toggle_optional(state),
        "return" => return confirm_or_open(state),
        "up" => move_list_cursor(state, -1),
        "down" => move_list_cursor(state, 1),
        "left" => {
            if let Some(form) = state.form.as_mut() {
                text_edit::move_left(&mut form.search_cursor);
            }
        }
        "right" => move_search_cursor_right(state),
        "backspace" => backspace(state),
        "paste" => {
            let raw = key.raw.clone();
            if let Some(form) = state.form.as_mut() {
                text_edit::insert_str(&mut form.search_query, &mut form.search_cursor, &raw);
                form.refilter();
            }
        }
        name if name.chars().count() == 1 && !key.ctrl && name != "o" => {
            insert_search_char(state, name.chars().next().expect("len checked"));
        }
        "o" => insert_search_char(state, 'o'),
        _ => {}
    }
    Outcome::Continue
}

fn form_search_empty(state: &AppState) -> bool {
    state
        .form
        .as_ref()
        .map(|f| f.search_query.trim().is_empty())
        .unwrap_or(true)
}

fn move_search_cursor_right(state: &mut AppState) {
    if let Some(form) = state.form.as_mut() {
        let len = form.search_query.chars().count();
        if form.search_cursor < len {
            form.search_cursor += 1;
        }
    }
}

fn insert_search_char(state: &mut AppState, c: char) {
    if let Some(form) = state.form.as_mut() {
        text_edit::insert_char(&mut form.search_query, &mut form.search_cursor, c);
        form.refilter();
    }
}

fn backspace(state: &mut AppState) {
    let Some(form) = state.form.as_mut() else {
        return;
    };
    if !form.search_query.is_empty() {
        text_edit::backspace(&mut form.search_query, &mut form.search_cursor);
        form.refilter();
        return;
    }
    reopen_last_set_field(form);
}

/// Backspace on an empty search re-opens the most recently filled
/// field (declaration order, last match) for editing.
fn reopen_last_set_field(form: &mut FormState) {
    let idx = form
        .fields
        .iter()
        .enumerate()
        .rev()
        .find(|(_, f)| {
            form.values
                .get(&f.name)
                .map(|d| !palette_core::values::is_unset(&f.property.kind, d))
                .unwrap_or(false)
        })
        .map(|(i, _)| i);
    if let Some(idx) = idx {
        editor::open_field(form, idx);
    }
}

fn escape(state: &mut AppState) -> Outcome {
    let Some(form) = state.form.as_mut() else {
        return Outcome::Continue;
    };
    if !form.search_query.is_empty() {
        form.search_query.clear();
        form.search_cursor = 0;
        form.refilter();
        return Outcome::Continue;
    }
    if let Some(entry) = form.stack.pop() {
        let remaining = std::mem::take(&mut form.stack);
        state.form = Some(FormState::from_stack_entry(entry, remaining));
        return Outcome::Continue;
    }
    state.form = None;
    state.view = View::Commands;
    Outcome::Continue
}

fn jump_to_next_required(state: &mut AppState) {
    let Some(form) = state.form.as_mut() else {
        return;
    };
    match form.first_unfilled_required() {
        Some(idx) => {
            if let Some(pos) = form.filtered_indices.iter().position(|&i| i == idx as i64) {
                form.list_cursor = pos;
            }
        }
        None => {
            if let Some(pos) = form.filtered_indices.iter().position(|&i| i == ACTION_ROW) {
                form.list_cursor = pos;
            }
        }
    }
}

fn toggle_optional(state: &mut AppState) {
    if let Some(form) = state.form.as_mut() {
        form.show_optional = !form.show_optional;
        form.refilter();
    }
}

fn move_list_cursor(state: &mut AppState, delta: i64) {
    let Some(form) = state.form.as_mut() else {
        return;
    };
    let len = form.filtered_indices.len() as i64;
    if len == 0 {
        return;
    }
    let next = (form.list_cursor as i64 + delta).rem_euclid(len);
    form.list_cursor = next as usize;
}

fn confirm_or_open(state: &mut AppState) -> Outcome {
    let Some(form) = state.form.as_ref() else {
        return Outcome::Continue;
    };
    let current = form
        .filtered_indices
        .get(form.list_cursor)
        .copied()
        .unwrap_or(ACTION_ROW);

    if current == ACTION_ROW {
        if !form.is_complete() {
            if let Some(form) = state.form.as_mut() {
                form.show_required = true;
            }
            return Outcome::Continue;
        }
        return execute_or_pop(state);
    }

    if let Some(form) = state.form.as_mut() {
        editor::open_field(form, current as usize);
    }
    Outcome::Continue
}

/// Execute submits the current form as a tool call. Appending/editing
/// a sub-form item instead writes the item back into the parent and
/// pops the stack.
fn execute_or_pop(state: &mut AppState) -> Outcome {
    let Some(form) = state.form.take() else {
        return Outcome::Continue;
    };
    if form.stack.is_empty() {
        state.form = Some(form);
        state.view = View::Loading;
        state.loading = Some(LoadingState::default());
        return Outcome::Submit;
    }

    let item = Value::Object(values_to_args(&form.fields, &form.values));
    let edit_index = form.stack.last().and_then(|e| e.edit_index);
    let array_field_name = form.stack.last().map(|e| e.array_field_name.clone()).unwrap_or_default();
    let mut stack = form.stack;
    let entry = stack.pop().expect("stack non-empty checked above");
    let mut parent = FormState::from_stack_entry(entry, stack);

    let mut items: Vec<Value> = parent
        .values
        .get(&array_field_name)
        .and_then(|d| serde_json::from_str(d).ok())
        .unwrap_or_default();
    match edit_index {
        Some(i) if i < items.len() => items[i] = item,
        _ => items.push(item),
    }
    parent
        .values
        .insert(array_field_name, serde_json::to_string(&items).unwrap_or_default());
    state.form = Some(parent);
    Outcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::{IndexMap, IndexSet};
    use palette_core::schema::SchemaProperty;
    use palette_core::{FormField, ToolDef};
    use palette_term::parse_key;

    fn text_tool(name: &str, required: &[&str]) -> ToolDef {
        let mut properties = IndexMap::new();
        properties.insert(
            "url".to_string(),
            palette_core::schema::RawSchema {
                ty: Some("string".to_string()),
                ..Default::default()
            },
        );
        let required: IndexSet<String> = required.iter().map(|s| s.to_string()).collect();
        ToolDef {
            name: name.to_string(),
            description: None,
            properties,
            required,
            defs: IndexMap::new(),
        }
    }

    fn with_form(tool: &ToolDef) -> AppState {
        let mut state = AppState::new(vec![tool.clone()]);
        state.view = View::Form;
        state.form = Some(FormState::new(tool));
        state
    }

    #[test]
    fn escape_with_no_stack_returns_to_commands() {
        let tool = text_tool("t", &[]);
        let mut state = with_form(&tool);
        let outcome = handle(&mut state, &parse_key(b"\x1b"));
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(state.view, View::Commands);
        assert!(state.form.is_none());
    }

    #[test]
    fn enter_on_field_opens_editor() {
        let tool = text_tool("t", &["url"]);
        let mut state = with_form(&tool);
        handle(&mut state, &parse_key(b"\r"));
        assert!(state.form.as_ref().unwrap().editing.is_some());
    }

    #[test]
    fn typing_value_and_enter_commits_and_advances_to_execute() {
        let tool = text_tool("t", &["url"]);
        let mut state = with_form(&tool);
        handle(&mut state, &parse_key(b"\r")); // open url editor
        for b in b"https://example.com" {
            handle(&mut state, &parse_key(&[*b]));
        }
        handle(&mut state, &parse_key(b"\r")); // confirm
        let form = state.form.as_ref().unwrap();
        assert_eq!(form.values.get("url").unwrap(), "https://example.com");
        assert!(form.editing.is_none());
        assert!(form.is_complete());
    }

    #[test]
    fn execute_on_complete_top_level_form_submits() {
        let tool = text_tool("t", &["url"]);
        let mut state = with_form(&tool);
        state
            .form
            .as_mut()
            .unwrap()
            .values
            .insert("url".to_string(), "x".to_string());
        // cursor defaults to 0 (the field row); jump to the action row.
        jump_to_next_required(&mut state);
        let outcome = handle(&mut state, &parse_key(b"\r"));
        assert_eq!(outcome, Outcome::Submit);
        assert_eq!(state.view, View::Loading);
    }

    #[test]
    fn execute_with_missing_required_arms_show_required() {
        let tool = text_tool("t", &["url"]);
        let mut state = with_form(&tool);
        let action_pos = {
            let form = state.form.as_ref().unwrap();
            form.filtered_indices
                .iter()
                .position(|&i| i == ACTION_ROW)
                .unwrap()
        };
        state.form.as_mut().unwrap().list_cursor = action_pos;
        let outcome = handle(&mut state, &parse_key(b"\r"));
        assert_eq!(outcome, Outcome::Continue);
        assert!(state.form.as_ref().unwrap().show_required);
    }

    #[test]
    fn array_obj_descend_and_save_writes_item_into_parent() {
        let mut properties = IndexMap::new();
        properties.insert(
            "text".to_string(),
            palette_core::schema::SchemaProperty {
                kind: FieldKind::Text,
                description: None,
                examples: Vec::new(),
                default: None,
            },
        );
        let sub_schema = palette_core::ObjectSchema {
            properties,
            required: IndexSet::new(),
        };
        let field = FormField {
            name: "highlights".to_string(),
            property: SchemaProperty {
                kind: FieldKind::ArrayObj(Box::new(sub_schema)),
                description: None,
                examples: Vec::new(),
                default: None,
            },
            required: false,
        };
        let mut form = FormState::new_subform(
            &palette_core::ObjectSchema {
                properties: IndexMap::new(),
                required: IndexSet::new(),
            },
            "root".to_string(),
            FormOrigin::ToolInvocation,
            None,
        );
        form.fields = vec![field];
        form.values.insert("highlights".to_string(), "[]".to_string());
        form.refilter();

        let mut state = AppState::new(vec![]);
        state.view = View::Form;
        state.form = Some(form);
        editor::open_field(state.form.as_mut().unwrap(), 0);

        handle(&mut state, &parse_key(b"\r")); // descend into Add new item
        assert!(state.form.as_ref().unwrap().stack.len() == 1);

        // fill the sub-form's only field and hit Execute (Add).
        handle(&mut state, &parse_key(b"\r")); // open "text" editor
        for b in b"Note" {
            handle(&mut state, &parse_key(&[*b]));
        }
        handle(&mut state, &parse_key(b"\r")); // confirm text
        jump_to_next_required(&mut state);
        handle(&mut state, &parse_key(b"\r")); // Add

        let parent = state.form.as_ref().unwrap();
        assert!(parent.stack.is_empty());
        let highlights = parent.values.get("highlights").unwrap();
        let parsed: Value = serde_json::from_str(highlights).unwrap();
        assert_eq!(parsed, serde_json::json!([{"text": "Note"}]));
    }
}
