//! Loading view: spinner + rotating message.

use crate::spinner::{loading_message, spinner_frame};
use crate::style::{cyan, dim};
use palette_core::state::LoadingState;

pub fn render(loading: &LoadingState, body_rows: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(body_rows);
    let mid = body_rows / 2;
    for _ in 0..mid {
        lines.push(String::new());
    }
    let frame = spinner_frame(loading.spinner_frame);
    let message = loading_message(loading.message_index);
    lines.push(format!("  {} {}", cyan(frame), dim(message)));
    while lines.len() < body_rows {
        lines.push(String::new());
    }
    lines.truncate(body_rows);
    lines
}

pub fn footer() -> &'static str {
    "please wait…"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_produces_exact_row_count() {
        let loading = LoadingState::default();
        let lines = render(&loading, 10);
        assert_eq!(lines.len(), 10);
    }
}
