//! Full-screen terminal lifecycle and the flicker-free paint routine.
//! Uses `crossterm` for the portable raw-mode / alternate-screen
//! / bracketed-paste / Kitty-protocol toggle sequences and for raw byte
//! reads; painting itself is a handful of direct ANSI writes, never a
//! full-screen clear.

use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Enables the Kitty disambiguate-keyboard protocol (query/pop are a
/// matched pair; crossterm has no typed wrapper for this one).
const KITTY_ENABLE: &str = "\x1b[>1u";
const KITTY_DISABLE: &str = "\x1b[<1u";
const BRACKETED_PASTE_ENABLE: &str = "\x1b[?2004h";
const BRACKETED_PASTE_DISABLE: &str = "\x1b[?2004l";

static TERM_ACTIVE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Acquire the alternate screen, hide the cursor, and enable bracketed
/// paste and Kitty keyboard disambiguation. Idempotent: calling this
/// twice without an intervening [`exit_full_screen`] is a no-op.
pub fn enter_full_screen() -> Result<(), TermError> {
    if TERM_ACTIVE.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, cursor::Hide)?;
    out.write_all(BRACKETED_PASTE_ENABLE.as_bytes())?;
    out.write_all(KITTY_ENABLE.as_bytes())?;
    out.flush()?;
    install_signal_restore();
    Ok(())
}

/// Reverse every step of [`enter_full_screen`] in opposite order. Safe
/// to call from a panic hook or signal handler — it swallows write
/// errors on the way out rather than risk leaving the terminal raw.
pub fn exit_full_screen() -> Result<(), TermError> {
    if !TERM_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let mut out = io::stdout();
    let _ = out.write_all(KITTY_DISABLE.as_bytes());
    let _ = out.write_all(BRACKETED_PASTE_DISABLE.as_bytes());
    let _ = execute!(out, cursor::Show, LeaveAlternateScreen);
    let _ = out.flush();
    disable_raw_mode()?;
    Ok(())
}

/// Paint `lines` starting from the cursor-home position: `ESC [H`, then
/// each line followed by erase-to-end-of-line and a newline, then, if
/// `lines` is shorter than the screen, a final erase-to-end-of-screen.
/// Never emits a full clear — this is what keeps the UI flicker-free.
pub fn paint(lines: &[String]) -> Result<(), TermError> {
    let (_, rows) = screen_size();
    let mut out = io::stdout();
    queue!(out, cursor::MoveTo(0, 0))?;
    for line in lines.iter().take(rows as usize) {
        write!(out, "{line}")?;
        out.write_all(b"\x1b[K\r\n")?;
    }
    if lines.len() < rows as usize {
        out.write_all(b"\x1b[J")?;
    }
    out.flush()?;
    Ok(())
}

/// Current terminal size as `(cols, rows)`, queried fresh every call so
/// a `SIGWINCH` resize takes effect on the very next paint.
pub fn screen_size() -> (u16, u16) {
    size().unwrap_or((80, 24))
}

/// Install a best-effort `SIGTERM` handler on unix that restores the
/// terminal before the process dies; `Ctrl+C` in raw mode arrives as a
/// regular byte (handled by the key decoder), not a signal, so only
/// `SIGTERM` needs this.
#[cfg(unix)]
fn install_signal_restore() {
    use nix::sys::signal::{signal, SigHandler, Signal};

    extern "C" fn handle_sigterm(_: i32) {
        let _ = exit_full_screen();
        std::process::exit(143);
    }

    unsafe {
        let _ = signal(Signal::SIGTERM, SigHandler::Handler(handle_sigterm));
    }
}

#[cfg(not(unix))]
fn install_signal_restore() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_erases_tail_when_fewer_lines_than_screen() {
        // screen_size() falls back to 80x24 outside a real terminal, so
        // a two-line paint must still succeed without a tty attached.
        let lines = vec!["one".to_string(), "two".to_string()];
        assert!(paint(&lines).is_ok());
    }
}
