//! Commands view input: search box editing, list
//! navigation, and selection into a new form.

use super::{editor, Outcome};
use crate::input::text_edit;
use palette_core::state::{AppState, LoadingState, View};
use palette_core::{FormState, ToolDef};
use palette_term::KeyEvent;

pub fn handle(state: &mut AppState, key: &KeyEvent) -> Outcome {
    if key.name == "escape" || (key.name == "c" && key.ctrl) {
        return escape_or_quit(state);
    }
    if key.name == "q" && state.commands.query.is_empty() {
        return escape_or_quit(state);
    }
    state.commands.quit_confirm = false;

    match key.name.as_str() {
        "up" => move_cursor(state, -1),
        "down" => move_cursor(state, 1),
        "pageUp" => move_cursor(state, -5),
        "pageDown" => move_cursor(state, 5),
        "left" => text_edit::move_left(&mut state.commands.query_cursor),
        "right" => {
            let len = state.commands.query.chars().count();
            if state.commands.query_cursor < len {
                state.commands.query_cursor += 1;
            }
        }
        "backspace" => {
            text_edit::backspace(&mut state.commands.query, &mut state.commands.query_cursor);
            refilter(state);
        }
        "return" => return select(state),
        "paste" => {
            let raw = key.raw.clone();
            text_edit::insert_str(&mut state.commands.query, &mut state.commands.query_cursor, &raw);
            refilter(state);
        }
        name if name.chars().count() == 1 && !key.ctrl => {
            let c = name.chars().next().expect("len checked");
            text_edit::insert_char(&mut state.commands.query, &mut state.commands.query_cursor, c);
            refilter(state);
        }
        _ => {}
    }
    Outcome::Continue
}

fn escape_or_quit(state: &mut AppState) -> Outcome {
    if !state.commands.query.is_empty() {
        state.commands.query.clear();
        state.commands.query_cursor = 0;
        refilter(state);
        return Outcome::Continue;
    }
    if state.commands.quit_confirm {
        return Outcome::Exit;
    }
    state.commands.quit_confirm = true;
    Outcome::Continue
}

fn move_cursor(state: &mut AppState, delta: i64) {
    let len = state.commands.filtered.len() as i64;
    if len == 0 {
        return;
    }
    let next = (state.commands.cursor as i64 + delta).clamp(0, len - 1);
    state.commands.cursor = next as usize;
}

fn refilter(state: &mut AppState) {
    let query = state.commands.query.trim().to_lowercase();
    state.commands.filtered = state
        .tools
        .iter()
        .enumerate()
        .filter(|(_, t)| matches_query(t, &query))
        .map(|(i, _)| i)
        .collect();
    if state.commands.cursor >= state.commands.filtered.len() {
        state.commands.cursor = state.commands.filtered.len().saturating_sub(1);
    }
    state.commands.scroll_top = 0;
}

fn matches_query(tool: &ToolDef, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    tool.name.to_lowercase().contains(query)
        || tool
            .description
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(query)
}

/// Build the form for the highlighted tool and transition into it,
/// auto-opening the first unfilled required field or skipping straight
/// to `Loading` for a tool with no properties at all.
fn select(state: &mut AppState) -> Outcome {
    let Some(&tool_idx) = state.commands.filtered.get(state.commands.cursor) else {
        return Outcome::Continue;
    };
    let mut form = FormState::new(&state.tools[tool_idx]);

    if form.fields.is_empty() {
        state.form = Some(form);
        state.view = View::Loading;
        state.loading = Some(LoadingState::default());
        return Outcome::Submit;
    }

    if let Some(idx) = form.first_unfilled_required() {
        editor::open_field(&mut form, idx);
    }
    state.form = Some(form);
    state.view = View::Form;
    Outcome::Continue
}
