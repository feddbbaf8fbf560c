//! Results view: success/empty sentinels, the
//! pretty-printed result, or the error message, each with a header
//! indicator and (for the scrollable body) vertical/horizontal scroll.

use crate::style::{bold, dim, green, red};
use palette_core::json_print::{is_empty_list_result, pretty_print};
use palette_core::state::{ResultsState, EMPTY_LIST_SENTINEL};
use palette_term::ansi_slice;
use serde_json::Value;

const OK_GLYPH: &str = "✔";
const GHOST_GLYPH: &str = "ᴖᴥᴖ";

pub fn render(results: &ResultsState, width: usize, body_rows: usize) -> Vec<String> {
    if let Some(error) = &results.error {
        return render_scrollable_text(&wrap_plain(error, width), results, width, body_rows, true);
    }

    match &results.result {
        None => render_centered(OK_GLYPH, "Success", body_rows, false),
        Some(Value::String(s)) if s == EMPTY_LIST_SENTINEL => {
            render_centered(OK_GLYPH, "Success", body_rows, false)
        }
        Some(value) if is_empty_list_result(value) => {
            render_centered(GHOST_GLYPH, "No results found", body_rows, true)
        }
        Some(value) => {
            let lines = pretty_print(value);
            render_scrollable_text(&lines, results, width, body_rows, false)
        }
    }
}

fn render_centered(glyph: &str, caption: &str, body_rows: usize, dimmed: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(body_rows);
    let mid = body_rows / 2;
    for i in 0..body_rows {
        if i == mid.saturating_sub(1) {
            lines.push(bold(glyph));
        } else if i == mid {
            lines.push(if dimmed { dim(caption) } else { green(caption) });
        } else {
            lines.push(String::new());
        }
    }
    lines
}

fn render_scrollable_text(
    lines: &[String],
    results: &ResultsState,
    width: usize,
    body_rows: usize,
    is_error: bool,
) -> Vec<String> {
    let total = lines.len();
    let header_rows = 1;
    let viewport = body_rows.saturating_sub(header_rows);
    let scroll = results.scroll.min(total.saturating_sub(viewport).max(0));

    let window_end = total.min(scroll + viewport);
    let shown = scroll..window_end;

    let mut out = Vec::with_capacity(body_rows);
    let range_label = if total == 0 {
        "(0 of 0)".to_string()
    } else {
        format!("({}\u{2013}{} of {})", shown.start + 1, window_end, total)
    };
    out.push(dim(&range_label));

    for line in &lines[shown] {
        let scrolled = ansi_slice(line, results.scroll_x);
        let styled = if is_error { red(&scrolled) } else { scrolled };
        out.push(palette_term::fit_width(&styled, width));
    }
    while out.len() < body_rows {
        out.push(String::new());
    }
    out.truncate(body_rows);
    out
}

fn wrap_plain(s: &str, width: usize) -> Vec<String> {
    palette_term::wrap_text(s, width.max(1))
}

pub fn footer(results: &ResultsState) -> String {
    if results.quit_confirm {
        "Press again to quit".to_string()
    } else {
        "esc/enter back · \u{2191}\u{2193} scroll · \u{2190}\u{2192} scroll x".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> ResultsState {
        ResultsState {
            result: None,
            error: None,
            scroll: 0,
            scroll_x: 0,
            return_to_form: false,
            quit_confirm: false,
        }
    }

    #[test]
    fn none_result_renders_success() {
        let lines = render(&base(), 40, 10);
        assert!(lines.iter().any(|l| l.contains("Success")));
    }

    #[test]
    fn empty_list_renders_no_results() {
        let mut results = base();
        results.result = Some(json!([]));
        let lines = render(&results, 40, 10);
        assert!(lines.iter().any(|l| l.contains("No results")));
    }

    #[test]
    fn error_renders_in_error_styling() {
        let mut results = base();
        results.error = Some("boom".to_string());
        let lines = render(&results, 40, 10);
        assert!(lines.iter().any(|l| l.contains("boom")));
    }

    #[test]
    fn render_is_exactly_body_rows() {
        let mut results = base();
        results.result = Some(json!({"a": 1, "b": 2}));
        let lines = render(&results, 40, 10);
        assert_eq!(lines.len(), 10);
    }
}
