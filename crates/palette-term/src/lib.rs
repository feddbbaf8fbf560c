//! Terminal I/O and layout primitives: raw-mode lifecycle, the
//! flicker-free paint routine, ANSI-aware string helpers, the raw key
//! decoder, and the bordered-frame layout used by every view.

pub mod ansi;
pub mod keys;
pub mod layout;
pub mod screen;

pub use ansi::{ansi_slice, fit_width, strip_ansi, visible_width};
pub use keys::{parse_key, KeyEvent};
pub use layout::{render_layout, wrap_text, LayoutInput};
pub use screen::{enter_full_screen, exit_full_screen, paint, screen_size, TermError};
