//! Form palette: the field-navigation list, the
//! Execute/Add/Save action row, and the value-preview logic shared by
//! every field row.

use crate::scroll::clamp_scroll;
use crate::style::{bold, dim, green, red, with_block_cursor};
use palette_core::state::{FormOrigin, FormState, ACTION_ROW};
use palette_core::values::is_unset;
use serde_json::Value;

/// Render the form palette body (field list + header). When a field
/// editor is active the caller (render::mod) splices the editor's own
/// content in below the header instead of calling this for the list.
pub fn render(form: &FormState, width: usize, body_rows: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(body_rows);
    lines.push(bold(&form.tool_name));

    let (filled, total) = form.required_progress();
    if total == 0 {
        lines.push(dim("No required fields"));
    } else if filled == total {
        lines.push(green(&format!("✓ {filled} of {total} required")));
    } else {
        lines.push(format!("{filled} of {total} required"));
    }
    lines.push(String::new());

    let show_search = form.fields.len() > 8 || !form.search_query.is_empty();
    if show_search {
        lines.push(format!(
            "Filter: {}",
            with_block_cursor(&form.search_query, form.search_cursor)
        ));
        lines.push(String::new());
    }

    let header_rows = lines.len();
    let footer_rows = 2; // description line + example line
    let list_budget = body_rows.saturating_sub(header_rows + footer_rows);

    let selected_row = form
        .filtered_indices
        .iter()
        .position(|&i| i == current_selection(form))
        .unwrap_or(0);
    let scroll_top = clamp_scroll(
        form.scroll_top,
        selected_row,
        list_budget,
        form.filtered_indices.len(),
    );
    let end = form.filtered_indices.len().min(scroll_top + list_budget);
    let visible = &form.filtered_indices[scroll_top..end];

    let optional_count = form.fields.iter().filter(|f| !f.required).count();
    let optional_set = form
        .fields
        .iter()
        .filter(|f| !f.required)
        .filter(|f| {
            form.values
                .get(&f.name)
                .map(|d| !is_unset(&f.property.kind, d))
                .unwrap_or(false)
        })
        .count();

    let mut printed_optional_header = false;
    for &idx in visible {
        if idx == ACTION_ROW {
            lines.push(render_action_row(form, idx == current_selection(form)));
            continue;
        }
        let field = &form.fields[idx as usize];
        if !field.required && !printed_optional_header && !form.show_optional && form.search_query.trim().is_empty() {
            lines.push(dim(&format!(
                "── {optional_count} optional ({optional_set} set) · 'o' to show ──"
            )));
            printed_optional_header = true;
        }
        let selected = idx == current_selection(form);
        let draft = form.values.get(&field.name).map(String::as_str).unwrap_or("");
        let name_col = render_name(&field.name, field.required, !is_unset(&field.property.kind, draft));
        let badge = dim(field.property.kind.badge());
        let preview_width = width.saturating_sub(field.name.len() + 20).max(8);
        let preview = value_preview(draft, preview_width);
        let marker = if selected { "❯ " } else { "  " };
        let line = format!("{marker}{name_col}  {preview}  {badge}");
        lines.push(if selected { bold(&line) } else { line });
    }

    pad(&mut lines, body_rows.saturating_sub(footer_rows));

    // Description + first example of the highlighted field.
    if let Some(field) = highlighted_field(form) {
        let desc = field.property.description.as_deref().unwrap_or("");
        lines.push(dim(desc));
        let example = field
            .property
            .examples
            .first()
            .map(|v| v.to_string())
            .unwrap_or_default();
        lines.push(if example.is_empty() {
            String::new()
        } else {
            dim(&format!("e.g. {example}"))
        });
    } else {
        lines.push(String::new());
        lines.push(String::new());
    }

    pad(&mut lines, body_rows);
    lines
}

fn current_selection(form: &FormState) -> i64 {
    form.filtered_indices
        .get(form.list_cursor)
        .copied()
        .unwrap_or(ACTION_ROW)
}

fn highlighted_field(form: &FormState) -> Option<&palette_core::FormField> {
    let idx = current_selection(form);
    if idx == ACTION_ROW {
        return None;
    }
    form.fields.get(idx as usize)
}

fn render_name(name: &str, required: bool, set: bool) -> String {
    let marker = if required {
        if set {
            green("*")
        } else {
            red("*")
        }
    } else {
        " ".to_string()
    };
    format!("{marker} {name:<20}")
}

fn render_action_row(form: &FormState, selected: bool) -> String {
    let label = match form.origin {
        FormOrigin::ToolInvocation => "Execute",
        FormOrigin::AppendingItem => "Add",
        FormOrigin::EditingItem => "Save",
    };
    let ready = form.is_complete();
    let text = if ready {
        format!("▶ {label}")
    } else if form.show_required {
        format!("▶ {label} (missing required fields)")
    } else {
        format!("▶ {label}")
    };
    let marker = if selected { "❯ " } else { "  " };
    let line = format!("{marker}{}", if ready { green(&text) } else { text });
    if selected {
        bold(&line)
    } else {
        line
    }
}

/// Value preview: empty drafts render as a dim
/// en dash; a valid JSON array renders its item count; long or
/// multi-line strings are summarized rather than shown whole.
pub fn value_preview(draft: &str, width: usize) -> String {
    if draft.trim().is_empty() {
        return dim("\u{2013}");
    }
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(draft) {
        return format!("[{} item(s)]", items.len());
    }
    let mut lines = draft.lines();
    let first = lines.next().unwrap_or("");
    let remaining = lines.count();
    if remaining > 0 {
        let truncated = truncate(first, width.saturating_sub(10));
        return format!("{truncated} [+{remaining} lines]");
    }
    truncate(draft, width)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(1);
    let truncated: String = s.chars().take(keep).collect();
    format!("{truncated}\u{2026}")
}

fn pad(lines: &mut Vec<String>, rows: usize) {
    while lines.len() < rows {
        lines.push(String::new());
    }
    lines.truncate(rows);
}
