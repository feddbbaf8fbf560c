//! Top-level render dispatch: builds the breadcrumb and footer
//! for the active view, renders its body, and hands everything to
//! [`palette_term::render_layout`] for the flicker-free frame.

pub mod commands;
pub mod editor;
pub mod form;
pub mod loading;
pub mod results;

use palette_core::state::{AppState, FormState, View};
use palette_term::{render_layout, LayoutInput};

/// Render the full screen for `state` into exactly `rows` lines of
/// `cols` columns, ready to hand to [`palette_term::paint`].
pub fn render(state: &AppState, cols: u16, rows: u16) -> Vec<String> {
    let inner = (cols as usize).saturating_sub(5);
    let content_rows = (rows as usize).saturating_sub(4);

    let breadcrumb = build_breadcrumb(state);
    let footer = build_footer(state);
    let content = build_content(state, inner, content_rows);

    let input = LayoutInput {
        breadcrumb: &breadcrumb,
        content: &content,
        footer: &footer,
    };
    render_layout(&input, cols, rows)
}

fn build_content(state: &AppState, width: usize, body_rows: usize) -> Vec<String> {
    match state.view {
        View::Commands => commands::render(state, width, body_rows),
        View::Form => state
            .form
            .as_ref()
            .map(|form| render_form_or_editor(form, width, body_rows))
            .unwrap_or_else(|| vec![String::new(); body_rows]),
        View::Loading => state
            .loading
            .as_ref()
            .map(|loading| loading::render(loading, body_rows))
            .unwrap_or_else(|| vec![String::new(); body_rows]),
        View::Results => state
            .results
            .as_ref()
            .map(|results| results::render(results, width, body_rows))
            .unwrap_or_else(|| vec![String::new(); body_rows]),
    }
}

fn render_form_or_editor(form: &FormState, width: usize, body_rows: usize) -> Vec<String> {
    match &form.editing {
        Some((idx, field_editor)) => {
            let Some(field) = form.fields.get(*idx) else {
                return form::render(form, width, body_rows);
            };
            let draft = form.values.get(&field.name).map(String::as_str).unwrap_or("");
            editor::render(field, draft, field_editor, width, body_rows)
        }
        None => form::render(form, width, body_rows),
    }
}

fn build_breadcrumb(state: &AppState) -> String {
    let mut parts = vec!["Tool Palette".to_string()];
    if let Some(form) = &state.form {
        parts.push(form.tool_name.clone());
        for entry in &form.stack {
            parts.push(entry.array_field_name.clone());
        }
        if let Some((idx, _)) = &form.editing {
            if let Some(field) = form.fields.get(*idx) {
                parts.push(field.name.clone());
            }
        }
    } else if matches!(state.view, View::Loading | View::Results) {
        if let Some(results) = &state.results {
            if results.return_to_form {
                parts.push("Result".to_string());
            }
        }
    }
    parts.join(" \u{203a} ")
}

fn build_footer(state: &AppState) -> String {
    match state.view {
        View::Commands => commands::footer(state),
        View::Form => state
            .form
            .as_ref()
            .map(form_footer)
            .unwrap_or_default(),
        View::Loading => loading::footer().to_string(),
        View::Results => state
            .results
            .as_ref()
            .map(results::footer)
            .unwrap_or_default(),
    }
}

fn form_footer(form: &FormState) -> String {
    if form.editing.is_some() {
        "enter confirm · esc cancel".to_string()
    } else {
        "tab next required · o toggle optional · enter edit/execute · esc back".to_string()
    }
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
    fn commands_view_renders_exact_rows() {
        let state = AppState::new(vec![tool("reader_search")]);
        let lines = render(&state, 60, 20);
        assert_eq!(lines.len(), 20);
    }

    #[test]
    fn form_view_without_form_state_does_not_panic() {
        let mut state = AppState::new(vec![tool("reader_search")]);
        state.view = View::Form;
        let lines = render(&state, 60, 20);
        assert_eq!(lines.len(), 20);
    }

    #[test]
    fn breadcrumb_includes_tool_name_in_form_view() {
        let mut state = AppState::new(vec![tool("reader_search")]);
        state.view = View::Form;
        state.form = Some(FormState::new(&state.tools[0]));
        let breadcrumb = build_breadcrumb(&state);
        assert!(breadcrumb.contains("reader_search"));
    }
}
