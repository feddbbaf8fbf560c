//! Visible-width-aware string operations. A SGR escape (`ESC [ ... m`)
//! occupies zero printable columns; everything else is measured with
//! [`unicode_width`].

use unicode_width::UnicodeWidthChar;

/// Remove every SGR escape sequence from `s`, leaving only printable text.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Visible column width of `s`, ignoring escape sequences.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s)
        .chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum()
}

/// Slice `s` starting at printable column `offset`, preserving any SGR
/// codes encountered before the cut so the remainder keeps its styling.
pub fn ansi_slice(s: &str, offset: usize) -> String {
    let mut col = 0usize;
    let mut out = String::new();
    let mut pending_sgr = String::new();
    let mut chars = s.char_indices();
    let mut started = false;

    while let Some((_, c)) = chars.next() {
        if c == '\x1b' {
            let mut seq = String::from(c);
            for (_, c2) in chars.by_ref() {
                seq.push(c2);
                if c2.is_ascii_alphabetic() {
                    break;
                }
            }
            if started {
                out.push_str(&seq);
            } else {
                pending_sgr.push_str(&seq);
            }
            continue;
        }
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if col >= offset {
            if !started {
                out.push_str(&pending_sgr);
                started = true;
            }
            out.push(c);
        }
        col += w;
    }
    if !started {
        // offset lands past the end: still surface any trailing SGR so
        // an all-escape-sequence tail isn't silently dropped.
        out.push_str(&pending_sgr);
    }
    out
}

/// Truncate or space-pad `s` to exactly `width` printable columns,
/// re-emitting a trailing reset if the source carried any SGR codes.
pub fn fit_width(s: &str, width: usize) -> String {
    let had_escape = s.contains('\x1b');
    let mut col = 0usize;
    let mut out = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            let mut seq = String::from(c);
            seq.push(chars.next().expect("peeked"));
            for c2 in chars.by_ref() {
                seq.push(c2);
                if c2.is_ascii_alphabetic() {
                    break;
                }
            }
            out.push_str(&seq);
            continue;
        }
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if col + w > width {
            break;
        }
        out.push(c);
        col += w;
    }
    if col < width {
        out.push_str(&" ".repeat(width - col));
    }
    if had_escape {
        out.push_str("\x1b[0m");
    }
    out
}
