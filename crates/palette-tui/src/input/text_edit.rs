//! Shared single-line text editing operations: insert, delete, cursor
//! movement by character and by word. Every text-like editor (the
//! command search box, the form search box, and the `text`/`number`
//! field editor) shares this rather than re-implementing cursor math.

/// Insert `c` at `cursor` (a character index) and advance the cursor.
pub fn insert_char(buf: &mut String, cursor: &mut usize, c: char) {
    let byte_idx = char_to_byte(buf, *cursor);
    buf.insert(byte_idx, c);
    *cursor += 1;
}

/// Insert `text` at `cursor` (used for pastes) and advance past it.
pub fn insert_str(buf: &mut String, cursor: &mut usize, text: &str) {
    let byte_idx = char_to_byte(buf, *cursor);
    buf.insert_str(byte_idx, text);
    *cursor += text.chars().count();
}

/// Delete the character before the cursor.
pub fn backspace(buf: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    let start = char_to_byte(buf, *cursor - 1);
    let end = char_to_byte(buf, *cursor);
    buf.replace_range(start..end, "");
    *cursor -= 1;
}

/// Delete the character at the cursor (forward delete).
pub fn delete_forward(buf: &mut String, cursor: usize) {
    let char_count = buf.chars().count();
    if cursor >= char_count {
        return;
    }
    let start = char_to_byte(buf, cursor);
    let end = char_to_byte(buf, cursor + 1);
    buf.replace_range(start..end, "");
}

pub fn move_left(cursor: &mut usize) {
    if *cursor > 0 {
        *cursor -= 1;
    }
}

pub fn move_right(buf: &str, cursor: &mut usize) {
    let len = buf.chars().count();
    if *cursor < len {
        *cursor += 1;
    }
}

/// Move the cursor to the start of the previous word (Alt+Left / `wordLeft`).
pub fn word_left(buf: &str, cursor: &mut usize) {
    let chars: Vec<char> = buf.chars().collect();
    let mut pos = *cursor;
    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    while pos > 0 && !chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    *cursor = pos;
}

/// Move the cursor to the start of the next word (Alt+Right / `wordRight`).
pub fn word_right(buf: &str, cursor: &mut usize) {
    let chars: Vec<char> = buf.chars().collect();
    let len = chars.len();
    let mut pos = *cursor;
    while pos < len && !chars[pos].is_whitespace() {
        pos += 1;
    }
    while pos < len && chars[pos].is_whitespace() {
        pos += 1;
    }
    *cursor = pos;
}

/// Delete the word before the cursor (Alt+Backspace / `wordBackspace`).
pub fn word_backspace(buf: &mut String, cursor: &mut usize) {
    let chars: Vec<char> = buf.chars().collect();
    let mut pos = *cursor;
    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    while pos > 0 && !chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    let new_buf: String = chars[..pos]
        .iter()
        .chain(chars[*cursor..].iter())
        .collect();
    *buf = new_buf;
    *cursor = pos;
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_char_mid_buffer() {
        let mut buf = "ac".to_string();
        let mut cursor = 1;
        insert_char(&mut buf, &mut cursor, 'b');
        assert_eq!(buf, "abc");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut buf = "abc".to_string();
        let mut cursor = 0;
        backspace(&mut buf, &mut cursor);
        assert_eq!(buf, "abc");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn word_backspace_deletes_trailing_whitespace_then_word() {
        let mut buf = "hello   world".to_string();
        let mut cursor = 8;
        word_backspace(&mut buf, &mut cursor);
        assert_eq!(buf, "world");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn word_left_and_right_roundtrip() {
        let buf = "one two three";
        let mut cursor = 13;
        word_left(buf, &mut cursor);
        assert_eq!(cursor, 8);
        word_left(buf, &mut cursor);
        assert_eq!(cursor, 4);
        word_right(buf, &mut cursor);
        assert_eq!(cursor, 8);
    }

    #[test]
    fn insert_handles_multibyte_chars() {
        let mut buf = "héllo".to_string();
        let mut cursor = 2;
        insert_char(&mut buf, &mut cursor, 'X');
        assert_eq!(buf, "héXllo");
    }
}
