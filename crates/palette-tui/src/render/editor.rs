//! Form editor: the field-kind-specific body shown
//! in place of the palette list while a field is being edited.

use crate::style::{bold, dim, green, with_block_cursor};
use palette_core::schema::{FieldKind, FormField};
use palette_core::state::{FieldEditor, TagCursor};

/// Render the editor body for `field` (whose current draft is `draft`,
/// needed only by the `arrayObj` list editor) in state `editor`.
pub fn render(
    field: &FormField,
    draft: &str,
    editor: &FieldEditor,
    width: usize,
    body_rows: usize,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(body_rows);
    lines.push(bold(&field.name));
    if let Some(desc) = &field.property.description {
        lines.push(dim(desc));
    }
    lines.push(String::new());

    match editor {
        FieldEditor::Text { buf, cursor } => render_text(field, buf, *cursor, &mut lines),
        FieldEditor::Choice { options, cursor } => render_choice(options, *cursor, &mut lines),
        FieldEditor::MultiChoice {
            options,
            cursor,
            selected,
        } => render_multi_choice(options, *cursor, selected, &mut lines),
        FieldEditor::TagList {
            items,
            cursor,
            input,
            input_cursor,
        } => render_tag_list(items, cursor, input, *input_cursor, &mut lines),
        FieldEditor::Date { parts } => render_date(parts, &mut lines),
        FieldEditor::ArrayObjList { cursor } => render_array_obj_list(draft, *cursor, &mut lines),
    }

    pad(&mut lines, body_rows);
    lines.iter_mut().for_each(|l| *l = palette_term::fit_width(l, width));
    lines
}

fn render_text(field: &FormField, buf: &str, cursor: usize, lines: &mut Vec<String>) {
    let placeholder = field
        .property
        .examples
        .first()
        .map(|v| v.to_string())
        .or_else(|| field.property.description.clone())
        .unwrap_or_else(|| match field.property.kind {
            FieldKind::Number => "enter a number".to_string(),
            _ => "enter a value".to_string(),
        });
    if buf.is_empty() {
        lines.push(format!("{}{}", with_block_cursor("", 0), dim(&placeholder)));
    } else {
        lines.push(with_block_cursor(buf, cursor));
    }
}

fn render_choice(options: &[String], cursor: usize, lines: &mut Vec<String>) {
    for (i, opt) in options.iter().enumerate() {
        let marker = if i == cursor { "❯ " } else { "  " };
        let line = format!("{marker}{opt}");
        lines.push(if i == cursor { bold(&line) } else { line });
    }
}

fn render_multi_choice(
    options: &[String],
    cursor: usize,
    selected: &std::collections::BTreeSet<usize>,
    lines: &mut Vec<String>,
) {
    for (i, opt) in options.iter().enumerate() {
        let marker = if i == cursor { "❯ " } else { "  " };
        let check = if selected.contains(&i) { "[x]" } else { "[ ]" };
        let line = format!("{marker}{check} {opt}");
        lines.push(if i == cursor { bold(&line) } else { line });
    }
}

fn render_tag_list(
    items: &[String],
    cursor: &TagCursor,
    input: &str,
    input_cursor: usize,
    lines: &mut Vec<String>,
) {
    for (i, item) in items.iter().enumerate() {
        let selected = *cursor == TagCursor::Item(i);
        let marker = if selected { "❯ " } else { "  " };
        let line = format!("{marker}{item}");
        lines.push(if selected { bold(&line) } else { line });
    }
    let on_input = *cursor == TagCursor::Input;
    let marker = if on_input { "❯ " } else { "  " };
    let field = with_block_cursor(input, input_cursor);
    let line = format!("{marker}{field}");
    lines.push(if on_input { bold(&line) } else { line });
}

fn render_date(parts: &palette_core::date::DateParts, lines: &mut Vec<String>) {
    let labels: &[&str] = if parts.len() == 5 {
        &["Year", "Month", "Day", "Hour", "Minute"]
    } else {
        &["Year", "Month", "Day"]
    };
    let mut row = String::new();
    for (i, (value, label)) in parts.parts.iter().zip(labels.iter()).enumerate() {
        let cell = format!("{value:04}");
        let cell = if i == parts.cursor {
            format!("[{cell}]")
        } else {
            format!(" {cell} ")
        };
        row.push_str(&cell);
        row.push(' ');
        let _ = label;
    }
    lines.push(row);
    lines.push(dim(&labels.join("    ")));
    lines.push(String::new());
    lines.push(dim(&parts.to_string_iso()));
}

fn render_array_obj_list(draft: &str, cursor: usize, lines: &mut Vec<String>) {
    let items = existing_items(draft);
    for (i, summary) in items.iter().enumerate() {
        let selected = i == cursor;
        let marker = if selected { "❯ " } else { "  " };
        let line = format!("{marker}{summary}");
        lines.push(if selected { bold(&line) } else { line });
    }
    let add_selected = cursor == items.len();
    let marker = if add_selected { "❯ " } else { "  " };
    let line = format!("{marker}{}", green("+ Add new item"));
    lines.push(if add_selected { bold(&line) } else { line });
}

/// Populated-key summaries of the existing items in an `arrayObj`
/// draft, for the item-list row labels.
fn existing_items(draft: &str) -> Vec<String> {
    let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(draft)
    else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| {
            let serde_json::Value::Object(map) = item else {
                return item.to_string();
            };
            map.iter()
                .filter(|(_, v)| !v.is_null() && *v != &serde_json::Value::String(String::new()))
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect()
}

fn pad(lines: &mut Vec<String>, rows: usize) {
    while lines.len() < rows {
        lines.push(String::new());
    }
    lines.truncate(rows);
}
