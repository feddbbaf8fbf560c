//! Layout primitives: the bordered frame every view paints into,
//! and greedy word-wrap for description text.

use crate::ansi::fit_width;

/// Inputs to [`render_layout`].
pub struct LayoutInput<'a> {
    pub breadcrumb: &'a str,
    pub content: &'a [String],
    pub footer: &'a str,
}

/// Render `input` into exactly `rows` lines: one breadcrumb header, a
/// top border, `rows - 4` bordered content rows, a bottom border, and
/// one footer row. Content beyond the available rows is truncated;
/// fewer rows than the budget are blank-padded.
pub fn render_layout(input: &LayoutInput<'_>, cols: u16, rows: u16) -> Vec<String> {
    let cols = cols as usize;
    let rows = rows as usize;
    let inner = cols.saturating_sub(5);
    let fill = cols.saturating_sub(3);

    let mut lines = Vec::with_capacity(rows);
    lines.push(fit_width(input.breadcrumb, cols));
    lines.push(format!("\u{256d}{}\u{256e}", "\u{2500}".repeat(fill)));

    let content_rows = rows.saturating_sub(4);
    for i in 0..content_rows {
        let body = input.content.get(i).map(String::as_str).unwrap_or("");
        lines.push(format!("\u{2502} {} \u{2502}", fit_width(body, inner)));
    }

    lines.push(format!("\u{2570}{}\u{256f}", "\u{2500}".repeat(fill)));
    lines.push(fit_width(input.footer, cols));
    lines
}

/// Greedy word-wrap of `s` to `width` printable columns, collapsing
/// runs of whitespace. Never returns an empty vector — an empty or
/// all-whitespace input yields a single empty line.
pub fn wrap_text(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in words {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        if current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_layout_produces_exactly_rows_lines() {
        let content = vec!["hello".to_string()];
        let input = LayoutInput {
            breadcrumb: "Commands",
            content: &content,
            footer: "q quit",
        };
        let lines = render_layout(&input, 40, 10);
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn render_layout_pads_missing_content_rows() {
        let input = LayoutInput {
            breadcrumb: "",
            content: &[],
            footer: "",
        };
        let lines = render_layout(&input, 20, 8);
        assert_eq!(lines.len(), 8);
        assert!(lines[2].starts_with('\u{2502}'));
    }

    #[test]
    fn wrap_text_never_returns_empty_vec() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
        assert_eq!(wrap_text("   ", 10), vec![String::new()]);
    }

    #[test]
    fn wrap_text_collapses_whitespace_runs() {
        let lines = wrap_text("hello    world", 40);
        assert_eq!(lines, vec!["hello world".to_string()]);
    }

    #[test]
    fn wrap_text_breaks_at_width() {
        let lines = wrap_text("one two three four", 7);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }
}
