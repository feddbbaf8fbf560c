//! Core loop: single-threaded state ownership with two
//! background feeds merged over one channel — a dedicated stdin-reader
//! thread streaming raw bytes, and a short-lived tool-invocation thread
//! spun up once per `Submit`. Spinner and quit-confirm timers are paced
//! by the channel's receive timeout rather than a separate ticker
//! thread.

use crate::{input, render, spinner};
use palette_core::args::values_to_args;
use palette_core::error::CoreError;
use palette_core::json_print::is_empty_list_result;
use palette_core::ports::{CallResult, CallTool, ToolCallContent};
use palette_core::schema::ToolDef;
use palette_core::state::{AppState, LoadingState, ResultsState, View, EMPTY_LIST_SENTINEL};
use palette_term::{enter_full_screen, exit_full_screen, paint, parse_key, screen_size, TermError};
use serde_json::Value;
use std::io::Read;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

enum LoopEvent {
    Key(Vec<u8>),
    ToolResult(Result<CallResult, CoreError>),
}

/// Enter the full-screen interface, run until the user exits, and
/// restore the terminal on every path out — including an early return
/// from a terminal I/O error.
pub fn run(tools: Vec<ToolDef>, call_tool: Arc<dyn CallTool>) -> Result<(), TermError> {
    enter_full_screen()?;
    let result = run_loop(tools, call_tool);
    exit_full_screen()?;
    result
}

fn run_loop(tools: Vec<ToolDef>, call_tool: Arc<dyn CallTool>) -> Result<(), TermError> {
    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone());

    let mut state = AppState::new(tools);
    let mut quit_confirm_deadline: Option<Instant> = None;
    let mut last_spinner_tick = Instant::now();
    let mut last_message_tick = Instant::now();

    loop {
        let (cols, rows) = screen_size();
        paint(&render::render(&state, cols, rows))?;

        if state.should_exit {
            return Ok(());
        }

        match rx.recv_timeout(Duration::from_millis(spinner::SPINNER_INTERVAL_MS)) {
            Ok(LoopEvent::Key(bytes)) => {
                let key = parse_key(&bytes);
                match input::handle(&mut state, &key) {
                    input::Outcome::Continue => {}
                    input::Outcome::Exit => state.should_exit = true,
                    input::Outcome::Submit => dispatch_tool_call(&state, &call_tool, tx.clone()),
                }
            }
            Ok(LoopEvent::ToolResult(outcome)) => apply_tool_result(&mut state, outcome),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }

        tick_spinner(&mut state, &mut last_spinner_tick, &mut last_message_tick);
        tick_quit_confirm(&mut state, &mut quit_confirm_deadline);
    }
}

fn spawn_stdin_reader(tx: Sender<LoopEvent>) {
    thread::spawn(move || {
        let mut stdin = std::io::stdin();
        let mut buf = [0u8; 64];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(LoopEvent::Key(buf[..n].to_vec())).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

fn dispatch_tool_call(state: &AppState, call_tool: &Arc<dyn CallTool>, tx: Sender<LoopEvent>) {
    let Some(form) = &state.form else { return };
    let name = form.tool_name.clone();
    let arguments = Value::Object(values_to_args(&form.fields, &form.values));
    let call_tool = Arc::clone(call_tool);
    thread::spawn(move || {
        let outcome = call_tool.call_tool(&name, arguments);
        let _ = tx.send(LoopEvent::ToolResult(outcome));
    });
}

fn apply_tool_result(state: &mut AppState, outcome: Result<CallResult, CoreError>) {
    let form_has_params = state.form.as_ref().map(|f| !f.fields.is_empty()).unwrap_or(false);
    let results = match outcome {
        Err(e) => error_results(e.to_string(), form_has_params),
        Ok(call_result) if call_result.is_error => {
            error_results(error_text(&call_result), form_has_params)
        }
        Ok(call_result) => success_results(call_result, form_has_params),
    };
    state.results = Some(results);
    state.loading = None;
    state.view = View::Results;
}

fn error_results(message: String, form_has_params: bool) -> ResultsState {
    ResultsState {
        result: None,
        error: Some(message),
        scroll: 0,
        scroll_x: 0,
        return_to_form: input::results::should_return_to_form(form_has_params, false),
        quit_confirm: false,
    }
}

fn success_results(call_result: CallResult, form_has_params: bool) -> ResultsState {
    let (result, is_empty) = classify_result(call_result);
    ResultsState {
        result,
        error: None,
        scroll: 0,
        scroll_x: 0,
        return_to_form: input::results::should_return_to_form(form_has_params, is_empty),
        quit_confirm: false,
    }
}

/// Turn a successful `CallResult` into the renderer's `(value, is_empty)`
/// pair: no content at all and a value that collapses to JSON `null`
/// both read as the plain "Success" glyph rather than printing `null`.
fn classify_result(call_result: CallResult) -> (Option<Value>, bool) {
    if call_result.content.is_empty() {
        return (None, true);
    }
    let value = call_result.as_value();
    if value.is_null() {
        return (Some(Value::String(EMPTY_LIST_SENTINEL.to_string())), true);
    }
    let is_empty = is_empty_list_result(&value);
    (Some(value), is_empty)
}

fn error_text(call_result: &CallResult) -> String {
    let joined = call_result
        .content
        .iter()
        .filter_map(|c| match c {
            ToolCallContent::Text(t) => Some(t.clone()),
            ToolCallContent::Json(v) => Some(v.to_string()),
        })
        .collect::<Vec<_>>()
        .join("\n");
    if joined.is_empty() {
        "the tool reported an error".to_string()
    } else {
        joined
    }
}

fn tick_spinner(state: &mut AppState, last_frame: &mut Instant, last_message: &mut Instant) {
    if state.view != View::Loading {
        return;
    }
    let Some(loading) = state.loading.as_mut() else {
        return;
    };
    let now = Instant::now();
    if now.duration_since(*last_frame) >= Duration::from_millis(spinner::SPINNER_INTERVAL_MS) {
        loading.spinner_frame = loading.spinner_frame.wrapping_add(1);
        *last_frame = now;
    }
    if now.duration_since(*last_message) >= Duration::from_millis(spinner::MESSAGE_INTERVAL_MS) {
        loading.message_index = loading.message_index.wrapping_add(1);
        *last_message = now;
    }
}

/// Arms on the transition to `quitConfirm == true`, clears if the view
/// cleared it on its own (any other key), and auto-clears after 2s.
fn tick_quit_confirm(state: &mut AppState, deadline: &mut Option<Instant>) {
    let armed = active_quit_confirm(state);
    match (*deadline, armed) {
        (None, true) => *deadline = Some(Instant::now() + Duration::from_secs(2)),
        (Some(_), false) => *deadline = None,
        (Some(d), true) if Instant::now() >= d => {
            clear_active_quit_confirm(state);
            *deadline = None;
        }
        _ => {}
    }
}

fn active_quit_confirm(state: &AppState) -> bool {
    match state.view {
        View::Commands => state.commands.quit_confirm,
        View::Results => state.results.as_ref().map(|r| r.quit_confirm).unwrap_or(false),
        _ => false,
    }
}

fn clear_active_quit_confirm(state: &mut AppState) {
    match state.view {
        View::Commands => state.commands.quit_confirm = false,
        View::Results => {
            if let Some(results) = state.results.as_mut() {
                results.quit_confirm = false;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(content: Vec<ToolCallContent>) -> CallResult {
        CallResult { content, is_error: false }
    }

    #[test]
    fn classify_empty_content_is_success_none() {
        let (value, is_empty) = classify_result(ok(vec![]));
        assert_eq!(value, None);
        assert!(is_empty);
    }

    #[test]
    fn classify_null_text_becomes_sentinel() {
        let (value, is_empty) = classify_result(ok(vec![ToolCallContent::Text("null".to_string())]));
        assert_eq!(value, Some(Value::String(EMPTY_LIST_SENTINEL.to_string())));
        assert!(is_empty);
    }

    #[test]
    fn classify_empty_array_is_empty_but_not_sentinel() {
        let (value, is_empty) = classify_result(ok(vec![ToolCallContent::Json(Value::Array(vec![]))]));
        assert_eq!(value, Some(Value::Array(vec![])));
        assert!(is_empty);
    }

    #[test]
    fn classify_non_empty_value_passes_through() {
        let (value, is_empty) = classify_result(ok(vec![ToolCallContent::Json(serde_json::json!({"a": 1}))]));
        assert_eq!(value, Some(serde_json::json!({"a": 1})));
        assert!(!is_empty);
    }

    #[test]
    fn error_text_joins_text_entries() {
        let result = CallResult {
            content: vec![ToolCallContent::Text("bad input".to_string())],
            is_error: true,
        };
        assert_eq!(error_text(&result), "bad input");
    }

    #[test]
    fn error_text_falls_back_when_no_text_content() {
        let result = CallResult { content: vec![], is_error: true };
        assert_eq!(error_text(&result), "the tool reported an error");
    }

    #[test]
    fn quit_confirm_auto_clears_after_deadline() {
        let mut state = AppState::new(vec![]);
        state.commands.quit_confirm = true;
        let mut deadline = None;
        tick_quit_confirm(&mut state, &mut deadline);
        assert!(deadline.is_some());

        // Simulate the 2-second window having elapsed.
        deadline = Some(Instant::now() - Duration::from_millis(1));
        tick_quit_confirm(&mut state, &mut deadline);
        assert!(!state.commands.quit_confirm);
        assert!(deadline.is_none());
    }

    #[test]
    fn quit_confirm_cleared_by_view_clears_deadline() {
        let mut state = AppState::new(vec![]);
        state.commands.quit_confirm = true;
        let mut deadline = Some(Instant::now() + Duration::from_secs(2));
        state.commands.quit_confirm = false;
        tick_quit_confirm(&mut state, &mut deadline);
        assert!(deadline.is_none());
    }

    #[test]
    fn spinner_does_not_advance_outside_loading_view() {
        let mut state = AppState::new(vec![]);
        state.loading = Some(LoadingState::default());
        let mut last_frame = Instant::now() - Duration::from_secs(1);
        let mut last_message = Instant::now() - Duration::from_secs(1);
        tick_spinner(&mut state, &mut last_frame, &mut last_message);
        assert_eq!(state.loading.unwrap().spinner_frame, 0);
    }

    #[test]
    fn spinner_advances_once_interval_elapses_in_loading_view() {
        let mut state = AppState::new(vec![]);
        state.view = View::Loading;
        state.loading = Some(LoadingState::default());
        let mut last_frame = Instant::now() - Duration::from_secs(1);
        let mut last_message = Instant::now();
        tick_spinner(&mut state, &mut last_frame, &mut last_message);
        assert_eq!(state.loading.unwrap().spinner_frame, 1);
    }
}
