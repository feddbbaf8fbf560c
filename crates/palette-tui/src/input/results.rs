//! Results view input: scroll, quit confirmation, and
//! returning to the form or the command list.

use super::Outcome;
use palette_core::state::{AppState, View};
use palette_term::KeyEvent;

const PAGE: usize = 10;
const HORIZONTAL_STEP: usize = 4;

pub fn handle(state: &mut AppState, key: &KeyEvent) -> Outcome {
    if key.name == "q" || (key.name == "c" && key.ctrl) {
        if let Some(results) = state.results.as_mut() {
            if results.quit_confirm {
                return Outcome::Exit;
            }
            results.quit_confirm = true;
        }
        return Outcome::Continue;
    }

    if let Some(results) = state.results.as_mut() {
        results.quit_confirm = false;
    }

    match key.name.as_str() {
        "escape" | "return" => return go_back(state),
        "up" => scroll(state, -1),
        "down" => scroll(state, 1),
        "pageUp" => scroll(state, -(PAGE as i64)),
        "pageDown" => scroll(state, PAGE as i64),
        "left" => scroll_x(state, -(HORIZONTAL_STEP as i64)),
        "right" => scroll_x(state, HORIZONTAL_STEP as i64),
        _ => {}
    }
    Outcome::Continue
}

fn scroll(state: &mut AppState, delta: i64) {
    if let Some(results) = state.results.as_mut() {
        let next = (results.scroll as i64 + delta).max(0);
        results.scroll = next as usize;
    }
}

fn scroll_x(state: &mut AppState, delta: i64) {
    if let Some(results) = state.results.as_mut() {
        let next = (results.scroll_x as i64 + delta).max(0);
        results.scroll_x = next as usize;
    }
}

fn go_back(state: &mut AppState) -> Outcome {
    let return_to_form = state
        .results
        .as_ref()
        .map(|r| r.return_to_form)
        .unwrap_or(false);
    state.results = None;
    if return_to_form && state.form.is_some() {
        state.view = View::Form;
    } else {
        state.form = None;
        state.view = View::Commands;
    }
    Outcome::Continue
}

/// Whether a just-completed call's form should be returned to on
/// escape/enter: true when the tool had parameters and the result was
/// non-empty.
pub fn should_return_to_form(form_origin_present: bool, result_is_empty: bool) -> bool {
    form_origin_present && !result_is_empty
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_core::state::ResultsState;

    fn results_state() -> ResultsState {
        ResultsState {
            result: Some(serde_json::json!({"a": 1})),
            error: None,
            scroll: 0,
            scroll_x: 0,
            return_to_form: false,
            quit_confirm: false,
        }
    }

    #[test]
    fn q_then_q_within_window_exits() {
        let mut state = AppState::new(vec![]);
        state.view = View::Results;
        state.results = Some(results_state());
        let first = handle(&mut state, &palette_term::parse_key(b"q"));
        assert_eq!(first, Outcome::Continue);
        assert!(state.results.as_ref().unwrap().quit_confirm);
        let second = handle(&mut state, &palette_term::parse_key(b"q"));
        assert_eq!(second, Outcome::Exit);
    }

    #[test]
    fn any_other_key_clears_quit_confirm() {
        let mut state = AppState::new(vec![]);
        state.view = View::Results;
        state.results = Some(results_state());
        handle(&mut state, &palette_term::parse_key(b"q"));
        handle(&mut state, &palette_term::parse_key(b"\x1b[B"));
        assert!(!state.results.as_ref().unwrap().quit_confirm);
    }

    #[test]
    fn scroll_does_not_go_negative() {
        let mut state = AppState::new(vec![]);
        state.view = View::Results;
        state.results = Some(results_state());
        handle(&mut state, &palette_term::parse_key(b"\x1b[A"));
        assert_eq!(state.results.as_ref().unwrap().scroll, 0);
    }

    #[test]
    fn escape_without_return_to_form_goes_to_commands() {
        let mut state = AppState::new(vec![]);
        state.view = View::Results;
        state.results = Some(results_state());
        handle(&mut state, &palette_term::parse_key(b"\x1b"));
        assert_eq!(state.view, View::Commands);
    }
}
