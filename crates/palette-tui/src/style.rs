//! SGR escape constants shared by every view renderer. Kept in one
//! place so the palette used across Commands/Form/Results stays
//! consistent (raw codes, matching `palette-core::json_print`'s style
//! rather than pulling in a styling crate for a handful of constants).

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[2m";
pub const BOLD: &str = "\x1b[1m";
pub const CYAN: &str = "\x1b[36m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const REVERSE: &str = "\x1b[7m";

pub fn dim(s: &str) -> String {
    format!("{DIM}{s}{RESET}")
}

pub fn bold(s: &str) -> String {
    format!("{BOLD}{s}{RESET}")
}

pub fn cyan(s: &str) -> String {
    format!("{CYAN}{s}{RESET}")
}

pub fn green(s: &str) -> String {
    format!("{GREEN}{s}{RESET}")
}

pub fn red(s: &str) -> String {
    format!("{RED}{s}{RESET}")
}

pub fn yellow(s: &str) -> String {
    format!("{YELLOW}{s}{RESET}")
}

/// An inline block-cursor, rendered as reverse-video on the character
/// under `pos` (or a trailing reverse-video space when `pos` is past
/// the end of `s`).
pub fn with_block_cursor(s: &str, pos: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if pos >= chars.len() {
        return format!("{s}{REVERSE} {RESET}");
    }
    let before: String = chars[..pos].iter().collect();
    let at = chars[pos];
    let after: String = chars[pos + 1..].iter().collect();
    format!("{before}{REVERSE}{at}{RESET}{after}")
}
