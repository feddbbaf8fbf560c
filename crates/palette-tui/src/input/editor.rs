//! Form editor input: builds each field
//! kind's initial editor state and interprets its keys through to
//! confirm or cancel. `arrayObj`'s enter-to-descend behavior is handled
//! by `input::form` instead, since it replaces the whole form rather
//! than writing a draft.

use super::text_edit;
use palette_core::date::DateParts;
use palette_core::schema::FieldKind;
use palette_core::state::{FieldEditor, FormState, TagCursor};
use palette_term::KeyEvent;
use serde_json::Value;
use std::collections::BTreeSet;

/// What happened to the field editor this key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Continue,
    Confirm(String),
    Cancel,
}

/// Open the editor for `form.fields[idx]`, seeded from its current draft.
pub fn open_field(form: &mut FormState, idx: usize) {
    let Some(field) = form.fields.get(idx) else {
        return;
    };
    let draft = form.values.get(&field.name).cloned().unwrap_or_default();
    form.editing = Some((idx, build_editor(&field.property.kind, &draft)));
}

fn build_editor(kind: &FieldKind, draft: &str) -> FieldEditor {
    match kind {
        FieldKind::Text | FieldKind::Number => FieldEditor::Text {
            cursor: draft.chars().count(),
            buf: draft.to_string(),
        },
        FieldKind::Bool => {
            let options = vec!["true".to_string(), "false".to_string()];
            let cursor = if draft == "false" { 1 } else { 0 };
            FieldEditor::Choice { options, cursor }
        }
        FieldKind::Enum(choices) => {
            let cursor = choices.iter().position(|c| c == draft).unwrap_or(0);
            FieldEditor::Choice {
                options: choices.clone(),
                cursor,
            }
        }
        FieldKind::ArrayEnum(choices) => {
            let current = parse_tags(draft);
            let selected = choices
                .iter()
                .enumerate()
                .filter(|(_, c)| current.iter().any(|v| v == *c))
                .map(|(i, _)| i)
                .collect();
            FieldEditor::MultiChoice {
                options: choices.clone(),
                cursor: 0,
                selected,
            }
        }
        FieldKind::ArrayText => FieldEditor::TagList {
            items: parse_tags(draft),
            cursor: TagCursor::Input,
            input: String::new(),
            input_cursor: 0,
        },
        FieldKind::Date(format) => {
            let parts = DateParts::parse(draft, *format).unwrap_or_else(|| DateParts::today(*format));
            FieldEditor::Date { parts }
        }
        FieldKind::ArrayObj(_) => FieldEditor::ArrayObjList { cursor: 0 },
    }
}

/// Parse a draft into its tag list: JSON-decode first (so a value
/// written by a sub-form round-trips), otherwise comma-split.
fn parse_tags(draft: &str) -> Vec<String> {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(draft) {
        return items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();
    }
    draft
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Interpret `key` against the active editor. Returns `Continue` for
/// `ArrayObjList` (its enter/backspace behavior lives in `input::form`).
pub fn handle(editor: &mut FieldEditor, key: &KeyEvent) -> EditorOutcome {
    match editor {
        FieldEditor::Text { buf, cursor } => handle_text(buf, cursor, key),
        FieldEditor::Choice { options, cursor } => handle_choice(options, cursor, key),
        FieldEditor::MultiChoice {
            options,
            cursor,
            selected,
        } => handle_multi_choice(options, cursor, selected, key),
        FieldEditor::TagList {
            items,
            cursor,
            input,
            input_cursor,
        } => handle_tag_list(items, cursor, input, input_cursor, key),
        FieldEditor::Date { parts } => handle_date(parts, key),
        FieldEditor::ArrayObjList { .. } => EditorOutcome::Continue,
    }
}

fn handle_text(buf: &mut String, cursor: &mut usize, key: &KeyEvent) -> EditorOutcome {
    match key.name.as_str() {
        "return" => EditorOutcome::Confirm(buf.clone()),
        "escape" => EditorOutcome::Cancel,
        "backspace" => {
            text_edit::backspace(buf, cursor);
            EditorOutcome::Continue
        }
        "left" => {
            text_edit::move_left(cursor);
            EditorOutcome::Continue
        }
        "right" => {
            text_edit::move_right(buf, cursor);
            EditorOutcome::Continue
        }
        "wordLeft" => {
            text_edit::word_left(buf, cursor);
            EditorOutcome::Continue
        }
        "wordRight" => {
            text_edit::word_right(buf, cursor);
            EditorOutcome::Continue
        }
        "wordBackspace" => {
            text_edit::word_backspace(buf, cursor);
            EditorOutcome::Continue
        }
        "paste" => {
            text_edit::insert_str(buf, cursor, &key.raw);
            EditorOutcome::Continue
        }
        name if name.chars().count() == 1 && !key.ctrl => {
            text_edit::insert_char(buf, cursor, name.chars().next().expect("len checked"));
            EditorOutcome::Continue
        }
        _ => EditorOutcome::Continue,
    }
}

fn handle_choice(options: &[String], cursor: &mut usize, key: &KeyEvent) -> EditorOutcome {
    match key.name.as_str() {
        "up" => {
            step_cursor(cursor, options.len(), -1);
            EditorOutcome::Continue
        }
        "down" => {
            step_cursor(cursor, options.len(), 1);
            EditorOutcome::Continue
        }
        "return" => EditorOutcome::Confirm(options.get(*cursor).cloned().unwrap_or_default()),
        "escape" => EditorOutcome::Cancel,
        _ => EditorOutcome::Continue,
    }
}

fn handle_multi_choice(
    options: &[String],
    cursor: &mut usize,
    selected: &mut BTreeSet<usize>,
    key: &KeyEvent,
) -> EditorOutcome {
    match key.name.as_str() {
        "up" => {
            step_cursor(cursor, options.len(), -1);
            EditorOutcome::Continue
        }
        "down" => {
            step_cursor(cursor, options.len(), 1);
            EditorOutcome::Continue
        }
        " " => {
            if !selected.remove(cursor) {
                selected.insert(*cursor);
            }
            EditorOutcome::Continue
        }
        "return" => {
            selected.insert(*cursor);
            EditorOutcome::Confirm(commit_multi_choice(options, selected))
        }
        "escape" => EditorOutcome::Confirm(commit_multi_choice(options, selected)),
        _ => EditorOutcome::Continue,
    }
}

fn commit_multi_choice(options: &[String], selected: &BTreeSet<usize>) -> String {
    options
        .iter()
        .enumerate()
        .filter(|(i, _)| selected.contains(i))
        .map(|(_, o)| o.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

fn step_cursor(cursor: &mut usize, len: usize, delta: i32) {
    if len == 0 {
        return;
    }
    let len = len as i32;
    *cursor = (*cursor as i32 + delta).rem_euclid(len) as usize;
}

fn handle_tag_list(
    items: &mut Vec<String>,
    cursor: &mut TagCursor,
    input: &mut String,
    input_cursor: &mut usize,
    key: &KeyEvent,
) -> EditorOutcome {
    let on_input = matches!(cursor, TagCursor::Input);
    match key.name.as_str() {
        "up" => {
            move_tag_cursor(items.len(), cursor, -1);
            EditorOutcome::Continue
        }
        "down" => {
            move_tag_cursor(items.len(), cursor, 1);
            EditorOutcome::Continue
        }
        "return" => match *cursor {
            TagCursor::Input if input.trim().is_empty() => {
                EditorOutcome::Confirm(items.join(", "))
            }
            TagCursor::Input => {
                items.push(std::mem::take(input));
                *input_cursor = 0;
                EditorOutcome::Continue
            }
            TagCursor::Item(i) => {
                if i < items.len() {
                    *input = items.remove(i);
                    *input_cursor = input.chars().count();
                }
                *cursor = TagCursor::Input;
                EditorOutcome::Continue
            }
        },
        "backspace" => match *cursor {
            TagCursor::Item(i) => {
                if i < items.len() {
                    items.remove(i);
                }
                *cursor = if items.is_empty() {
                    TagCursor::Input
                } else {
                    TagCursor::Item(i.min(items.len() - 1))
                };
                EditorOutcome::Continue
            }
            TagCursor::Input => {
                text_edit::backspace(input, input_cursor);
                EditorOutcome::Continue
            }
        },
        "escape" => EditorOutcome::Confirm(items.join(", ")),
        "left" if on_input => {
            text_edit::move_left(input_cursor);
            EditorOutcome::Continue
        }
        "right" if on_input => {
            text_edit::move_right(input, input_cursor);
            EditorOutcome::Continue
        }
        "paste" if on_input => {
            text_edit::insert_str(input, input_cursor, &key.raw);
            EditorOutcome::Continue
        }
        name if on_input && name.chars().count() == 1 && !key.ctrl => {
            text_edit::insert_char(input, input_cursor, name.chars().next().expect("len checked"));
            EditorOutcome::Continue
        }
        _ => EditorOutcome::Continue,
    }
}

fn move_tag_cursor(item_count: usize, cursor: &mut TagCursor, delta: i32) {
    let total = item_count as i32 + 1;
    let pos = match *cursor {
        TagCursor::Item(i) => i as i32,
        TagCursor::Input => item_count as i32,
    };
    let next = (pos + delta).rem_euclid(total.max(1));
    *cursor = if next == item_count as i32 {
        TagCursor::Input
    } else {
        TagCursor::Item(next as usize)
    };
}

fn handle_date(parts: &mut DateParts, key: &KeyEvent) -> EditorOutcome {
    match key.name.as_str() {
        "left" => {
            parts.move_cursor(-1);
            EditorOutcome::Continue
        }
        "right" => {
            parts.move_cursor(1);
            EditorOutcome::Continue
        }
        "up" => {
            parts.adjust(1);
            EditorOutcome::Continue
        }
        "down" => {
            parts.adjust(-1);
            EditorOutcome::Continue
        }
        "t" => {
            *parts = DateParts::today(parts.format);
            EditorOutcome::Continue
        }
        "backspace" => EditorOutcome::Confirm(String::new()),
        "return" => EditorOutcome::Confirm(parts.to_string_iso()),
        "escape" => EditorOutcome::Cancel,
        _ => EditorOutcome::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_core::schema::DateFormat;
    use palette_term::parse_key;

    #[test]
    fn text_editor_confirms_buffer_on_enter() {
        let mut editor = build_editor(&FieldKind::Text, "hello");
        let outcome = handle(&mut editor, &parse_key(b"\r"));
        assert_eq!(outcome, EditorOutcome::Confirm("hello".to_string()));
    }

    #[test]
    fn enum_editor_seeds_cursor_from_current_draft() {
        let editor = build_editor(
            &FieldKind::Enum(vec!["a".to_string(), "b".to_string()]),
            "b",
        );
        match editor {
            FieldEditor::Choice { cursor, .. } => assert_eq!(cursor, 1),
            _ => panic!("expected Choice"),
        }
    }

    #[test]
    fn multi_choice_space_toggles_and_enter_commits() {
        let mut editor = build_editor(
            &FieldKind::ArrayEnum(vec!["article".to_string(), "email".to_string()]),
            "",
        );
        handle(&mut editor, &parse_key(b" "));
        handle(&mut editor, &parse_key(b"\x1b[B"));
        let outcome = handle(&mut editor, &parse_key(b" "));
        assert_eq!(outcome, EditorOutcome::Continue);
        let outcome = handle(&mut editor, &parse_key(b"\r"));
        assert_eq!(outcome, EditorOutcome::Confirm("article, email".to_string()));
    }

    #[test]
    fn tag_list_adds_item_on_enter_and_confirms_on_escape() {
        let mut editor = build_editor(&FieldKind::ArrayText, "");
        for b in b"tag1" {
            handle(&mut editor, &parse_key(&[*b]));
        }
        handle(&mut editor, &parse_key(b"\r"));
        let outcome = handle(&mut editor, &parse_key(b"\x1b"));
        assert_eq!(outcome, EditorOutcome::Confirm("tag1".to_string()));
    }

    #[test]
    fn date_editor_today_then_arrow_up_increments_year() {
        let mut editor = build_editor(&FieldKind::Date(DateFormat::Date), "");
        let before = match &editor {
            FieldEditor::Date { parts } => parts.parts[0],
            _ => panic!("expected Date"),
        };
        handle(&mut editor, &parse_key(b"\x1b[A"));
        match &editor {
            FieldEditor::Date { parts } => assert_eq!(parts.parts[0], before + 1),
            _ => panic!("expected Date"),
        }
    }

    #[test]
    fn date_editor_backspace_clears_the_field() {
        let mut editor = build_editor(&FieldKind::Date(DateFormat::Date), "2024-01-01");
        let outcome = handle(&mut editor, &parse_key(&[0x7f]));
        assert_eq!(outcome, EditorOutcome::Confirm(String::new()));
    }
}
