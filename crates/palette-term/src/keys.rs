//! Raw byte key decoder. Operates directly on the bytes read off
//! stdin rather than on `crossterm`'s own `Event` enum, so every
//! encoding this crate cares about — Kitty CSI-u, bracketed paste, the
//! legacy Alt+b/f word-navigation escapes — is classified in one place.

/// A decoded keypress or paste event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The raw bytes that produced this event (paste payload for
    /// `name == "paste"`, empty for synthetic/control events otherwise).
    pub raw: String,
    pub name: String,
    pub shift: bool,
    pub ctrl: bool,
}

impl KeyEvent {
    fn named(name: &str) -> Self {
        Self {
            raw: String::new(),
            name: name.to_string(),
            shift: false,
            ctrl: false,
        }
    }

    fn shifted(name: &str) -> Self {
        Self {
            raw: String::new(),
            name: name.to_string(),
            shift: true,
            ctrl: false,
        }
    }

    fn ctrled(name: &str) -> Self {
        Self {
            raw: String::new(),
            name: name.to_string(),
            shift: false,
            ctrl: true,
        }
    }

    fn char(c: char) -> Self {
        Self {
            raw: c.to_string(),
            name: c.to_string(),
            shift: false,
            ctrl: false,
        }
    }

    fn paste(payload: String) -> Self {
        Self {
            raw: payload,
            name: "paste".to_string(),
            shift: false,
            ctrl: false,
        }
    }
}

const PASTE_START: &[u8] = b"\x1b[200~";
const PASTE_END: &[u8] = b"\x1b[201~";

/// Decode one terminal input chunk into a [`KeyEvent`].
///
/// `bytes` is assumed to be exactly one logical input unit as delivered
/// by a single raw read (crossterm hands these over a byte at a time
/// under its own event loop; callers here instead accumulate a read
/// buffer and hand the whole chunk to this function, since bracketed
/// paste and Kitty CSI-u sequences can span many bytes in one burst).
pub fn parse_key(bytes: &[u8]) -> KeyEvent {
    if bytes.starts_with(PASTE_START) {
        return decode_paste(bytes);
    }

    if bytes.first() == Some(&0x1b) {
        return decode_escape(bytes);
    }

    if bytes.len() == 1 {
        return decode_single_byte(bytes[0]);
    }

    // Any unmatched multi-byte burst not beginning with ESC: treat as
    // paste for terminals lacking bracketed-paste support.
    decode_text_burst(bytes)
}

fn decode_text_burst(bytes: &[u8]) -> KeyEvent {
    let text = String::from_utf8_lossy(bytes).replace("\r\n", "\n");
    if text.chars().count() == 1 {
        return KeyEvent::char(text.chars().next().expect("len checked"));
    }
    KeyEvent::paste(text)
}

fn decode_paste(bytes: &[u8]) -> KeyEvent {
    let end = find_subslice(bytes, PASTE_END).unwrap_or(bytes.len());
    let payload = &bytes[PASTE_START.len()..end.max(PASTE_START.len())];
    let text = String::from_utf8_lossy(payload).replace("\r\n", "\n");
    KeyEvent::paste(text)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn decode_single_byte(b: u8) -> KeyEvent {
    match b {
        0x1b => KeyEvent::named("escape"),
        0x7f | 0x08 => KeyEvent::named("backspace"),
        b'\r' | b'\n' => KeyEvent::named("return"),
        b'\t' => KeyEvent::named("tab"),
        3 => KeyEvent::ctrled("c"),
        4 => KeyEvent::ctrled("d"),
        1..=31 => KeyEvent::ctrled(&((b + 96) as char).to_string()),
        _ => {
            let text = String::from_utf8_lossy(&[b]).to_string();
            KeyEvent::char(text.chars().next().unwrap_or(' '))
        }
    }
}

/// Decode an `ESC ...` sequence: CSI arrows/page keys, Alt combos,
/// legacy word-navigation, Kitty CSI-u, or a lone/doubled escape.
fn decode_escape(bytes: &[u8]) -> KeyEvent {
    if bytes == [0x1b] || bytes == [0x1b, 0x1b] {
        return KeyEvent::named("escape");
    }

    if bytes.len() >= 2 && bytes[1] == b'[' {
        return decode_csi(&bytes[2..]);
    }

    if bytes.len() >= 2 {
        return match bytes[1] {
            b'\r' | b'\n' => KeyEvent::shifted("return"),
            0x7f => KeyEvent::named("wordBackspace"),
            b'b' => KeyEvent::named("wordLeft"),
            b'f' => KeyEvent::named("wordRight"),
            _ => {
                let text = String::from_utf8_lossy(&bytes[1..]).to_string();
                KeyEvent::paste(text)
            }
        };
    }

    KeyEvent::named("escape")
}

/// Decode the body of a CSI sequence (everything after `ESC [`).
fn decode_csi(body: &[u8]) -> KeyEvent {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim_end_matches(|c: char| !c.is_ascii_alphabetic() && c != '~');

    match trimmed {
        "A" => return KeyEvent::named("up"),
        "B" => return KeyEvent::named("down"),
        "C" => return KeyEvent::named("right"),
        "D" => return KeyEvent::named("left"),
        "Z" => return KeyEvent::shifted("tab"),
        "5~" => return KeyEvent::named("pageUp"),
        "6~" => return KeyEvent::named("pageDown"),
        "1;3D" => return KeyEvent::named("wordLeft"),
        "1;3C" => return KeyEvent::named("wordRight"),
        _ => {}
    }

    if let Some(u_body) = trimmed.strip_suffix('u') {
        return decode_kitty_u(u_body);
    }
    if let Some(tilde_body) = trimmed.strip_suffix('~') {
        return decode_kitty_tilde(tilde_body);
    }

    KeyEvent::named("escape")
}

/// `ESC [ <code> (;<modifiers>)? u` — Kitty's disambiguate-keyboard form.
fn decode_kitty_u(body: &str) -> KeyEvent {
    let mut parts = body.split(';');
    let code: u32 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let modifiers: u32 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let shift = (modifiers.saturating_sub(1)) & 0b1 != 0;

    match code {
        13 if shift => KeyEvent::shifted("return"),
        13 => KeyEvent::named("return"),
        9 if shift => KeyEvent::shifted("tab"),
        9 => KeyEvent::named("tab"),
        27 => KeyEvent::named("escape"),
        127 => KeyEvent::named("backspace"),
        _ => KeyEvent::named("escape"),
    }
}

/// `ESC [ <code>;<modifiers>~` — Kitty's legacy-compatible form, used
/// here only for the shift+return spelling ("insert a newline" in a
/// multi-line field vs. "submit").
fn decode_kitty_tilde(body: &str) -> KeyEvent {
    let fields: Vec<&str> = body.split(';').collect();
    let marker: u32 = fields.first().and_then(|s| s.parse().ok()).unwrap_or(0);

    // `27` here is the CSI-u "alternate key code" marker, not the key
    // itself — the real key code is the third field (e.g. `27;2;13~`
    // is shift+Return, key code 13).
    let (code, modifiers) = if marker == 27 {
        let modifiers: u32 = fields.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
        let code: u32 = fields.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);
        (code, modifiers)
    } else {
        let modifiers: u32 = fields.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
        (marker, modifiers)
    };
    let shift = (modifiers.saturating_sub(1)) & 0b1 != 0;

    match code {
        13 if shift => KeyEvent::shifted("return"),
        13 => KeyEvent::named("return"),
        _ => KeyEvent::named("escape"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_decode() {
        assert_eq!(parse_key(b"\x1b[A").name, "up");
        assert_eq!(parse_key(b"\x1b[D").name, "left");
    }

    #[test]
    fn page_keys_decode() {
        assert_eq!(parse_key(b"\x1b[5~").name, "pageUp");
        assert_eq!(parse_key(b"\x1b[6~").name, "pageDown");
    }

    #[test]
    fn shift_tab_via_csi_z() {
        let e = parse_key(b"\x1b[Z");
        assert_eq!(e.name, "tab");
        assert!(e.shift);
    }

    #[test]
    fn alt_enter_inserts_shifted_return() {
        let e = parse_key(b"\x1b\r");
        assert_eq!(e.name, "return");
        assert!(e.shift);
    }

    #[test]
    fn legacy_alt_word_navigation() {
        assert_eq!(parse_key(b"\x1bb").name, "wordLeft");
        assert_eq!(parse_key(b"\x1bf").name, "wordRight");
        assert_eq!(parse_key(b"\x1b\x7f").name, "wordBackspace");
    }

    #[test]
    fn kitty_csi_u_shift_return() {
        let e = parse_key(b"\x1b[13;2u");
        assert_eq!(e.name, "return");
        assert!(e.shift);
    }

    #[test]
    fn kitty_tilde_shift_return() {
        let e = parse_key(b"\x1b[27;2;13~");
        assert_eq!(e.name, "return");
        assert!(e.shift);
    }

    #[test]
    fn kitty_plain_return_and_tab() {
        assert_eq!(parse_key(b"\x1b[13u").name, "return");
        assert_eq!(parse_key(b"\x1b[9u").name, "tab");
        let shift_tab = parse_key(b"\x1b[9;2u");
        assert_eq!(shift_tab.name, "tab");
        assert!(shift_tab.shift);
    }

    #[test]
    fn kitty_escape_and_backspace() {
        assert_eq!(parse_key(b"\x1b[27u").name, "escape");
        assert_eq!(parse_key(b"\x1b[127u").name, "backspace");
    }

    #[test]
    fn bracketed_paste_normalizes_crlf() {
        let e = parse_key(b"\x1b[200~hello\r\nworld\x1b[201~");
        assert_eq!(e.name, "paste");
        assert_eq!(e.raw, "hello\nworld");
    }

    #[test]
    fn ctrl_letters_decode_with_offset() {
        let e = parse_key(&[23]); // Ctrl+W
        assert_eq!(e.name, "w");
        assert!(e.ctrl);
    }

    #[test]
    fn ctrl_c_and_d_are_named_explicitly() {
        assert_eq!(parse_key(&[3]).name, "c");
        assert_eq!(parse_key(&[4]).name, "d");
    }

    #[test]
    fn lone_and_double_escape_both_decode_to_escape() {
        assert_eq!(parse_key(&[0x1b]).name, "escape");
        assert_eq!(parse_key(&[0x1b, 0x1b]).name, "escape");
    }

    #[test]
    fn unmatched_multibyte_non_escape_input_is_paste() {
        let e = parse_key("héllo".as_bytes());
        assert_eq!(e.name, "paste");
    }

    #[test]
    fn printable_ascii_is_a_char_event() {
        let e = parse_key(b"a");
        assert_eq!(e.name, "a");
        assert!(!e.ctrl);
    }
}
