//! Commands view: logo, search input, and the
//! filtered, grouped catalog list.

use crate::scroll::clamp_scroll;
use crate::style::{bold, dim, with_block_cursor};
use palette_core::state::{group_label, AppState};

const LOGO_LINES: [&str; 3] = [
    "╭──────────────────────────╮",
    "│   t o o l   p a l e t t e │",
    "╰──────────────────────────╯",
];

/// A synthesized row in the grouped, filtered command list: either a
/// non-selectable group separator or a selectable tool at position
/// `filtered_pos` (an index into `CommandsState::filtered`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    Header(&'static str),
    Item(usize),
}

/// Interleave group headers into `filtered` (indices into `tools`),
/// grouping by [`group_label`] and preserving catalog order within
/// each group's first appearance.
pub fn build_display_rows(tools: &[palette_core::ToolDef], filtered: &[usize]) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(filtered.len() + 3);
    let mut last_label: Option<&'static str> = None;
    for (pos, &tool_idx) in filtered.iter().enumerate() {
        let label = group_label(&tools[tool_idx].name);
        if Some(label) != last_label {
            rows.push(DisplayRow::Header(label));
            last_label = Some(label);
        }
        rows.push(DisplayRow::Item(pos));
    }
    rows
}

/// The 0-based row (within `display_rows`) of the item at `filtered_pos`.
pub fn row_of_item(display_rows: &[DisplayRow], filtered_pos: usize) -> usize {
    display_rows
        .iter()
        .position(|r| *r == DisplayRow::Item(filtered_pos))
        .unwrap_or(0)
}

/// Render the Commands view body (not including the outer frame).
pub fn render(state: &AppState, width: usize, body_rows: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(body_rows);
    for logo_line in LOGO_LINES {
        lines.push(bold(logo_line));
    }
    lines.push(String::new());

    let search_prefix = "Search: ";
    let search_line = format!(
        "{search_prefix}{}",
        with_block_cursor(&state.commands.query, state.commands.query_cursor)
    );
    lines.push(search_line);
    lines.push(String::new());

    let list_budget = body_rows.saturating_sub(lines.len() + 1); // reserve 1 for "(N more)"
    let display_rows = build_display_rows(&state.tools, &state.commands.filtered);

    if display_rows.is_empty() {
        lines.push(dim("No matching tools."));
        pad(&mut lines, body_rows);
        return lines;
    }

    let selected_row = row_of_item(&display_rows, state.commands.cursor);
    let scroll_top = clamp_scroll(
        state.commands.scroll_top,
        selected_row,
        list_budget,
        display_rows.len(),
    );

    let visible = &display_rows[scroll_top..display_rows.len().min(scroll_top + list_budget)];
    for row in visible {
        match row {
            DisplayRow::Header(label) => {
                lines.push(dim(&format!("── {label} ──")));
            }
            DisplayRow::Item(pos) => {
                let tool_idx = state.commands.filtered[*pos];
                let tool = &state.tools[tool_idx];
                let selected = *pos == state.commands.cursor;
                let marker = if selected { "❯ " } else { "  " };
                let name_width = 28usize.min(width.saturating_sub(4));
                let name = palette_term::fit_width(&tool.name, name_width);
                let desc = tool.description.as_deref().unwrap_or("");
                let line = format!("{marker}{name} {}", dim(desc));
                lines.push(if selected { bold(&line) } else { line });
            }
        }
    }

    let hidden_below = display_rows.len().saturating_sub(scroll_top + visible.len());
    if hidden_below > 0 {
        lines.push(dim(&format!("({hidden_below} more)")));
    }

    pad(&mut lines, body_rows);
    lines
}

/// Footer hint line: swaps to the quit-confirmation prompt while armed.
pub fn footer(state: &AppState) -> String {
    if state.commands.quit_confirm {
        "Press again to quit".to_string()
    } else {
        "↑↓ navigate · enter select · q quit".to_string()
    }
}

fn pad(lines: &mut Vec<String>, rows: usize) {
    while lines.len() < rows {
        lines.push(String::new());
    }
    lines.truncate(rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::{IndexMap, IndexSet};
    use palette_core::ToolDef;

    fn tool(name: &str) -> ToolDef {
        ToolDef {
            name: name.to_string(),
            description: Some("desc".to_string()),
            properties: IndexMap::new(),
            required: IndexSet::new(),
            defs: IndexMap::new(),
        }
    }

    #[test]
    fn display_rows_group_by_prefix() {
        let tools = vec![tool("reader_a"), tool("reader_b"), tool("other_c")];
        let rows = build_display_rows(&tools, &[0, 1, 2]);
        assert_eq!(
            rows,
            vec![
                DisplayRow::Header("Reader"),
                DisplayRow::Item(0),
                DisplayRow::Item(1),
                DisplayRow::Header("Other"),
                DisplayRow::Item(2),
            ]
        );
    }

    #[test]
    fn render_produces_exactly_body_rows_lines() {
        let tools = vec![tool("reader_a")];
        let mut state = AppState::new(tools);
        state.commands.cursor = 0;
        let lines = render(&state, 40, 12);
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn render_handles_empty_catalog_without_panic() {
        let state = AppState::new(vec![]);
        let lines = render(&state, 40, 10);
        assert_eq!(lines.len(), 10);
    }
}
