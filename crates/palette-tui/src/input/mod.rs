//! Input handlers: per-view key interpretation and the
//! resulting state transition.

pub mod commands;
pub mod editor;
pub mod form;
pub mod results;
pub mod text_edit;

use palette_core::state::{AppState, View};
use palette_term::KeyEvent;

/// What the caller (the core loop) should do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stay in the loop; `state` already reflects the new state.
    Continue,
    /// Dispatch the tool call described by the now-`Loading` state.
    Submit,
    /// Tear down the terminal and return.
    Exit,
}

/// Route `key` to the handler for `state.view`. The `Loading` view has
/// no handler of its own: incoming keys are dropped so the user cannot
/// navigate away from a pending call.
pub fn handle(state: &mut AppState, key: &KeyEvent) -> Outcome {
    match state.view {
        View::Commands => commands::handle(state, key),
        View::Form => form::handle(state, key),
        View::Loading => Outcome::Continue,
        View::Results => results::handle(state, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::{IndexMap, IndexSet};
    use palette_core::ToolDef;
    use palette_term::parse_key;

    fn tool(name: &str) -> ToolDef {
        ToolDef {
            name: name.to_string(),
            description: None,
            properties: IndexMap::new(),
            required: IndexSet::new(),
            defs: IndexMap::new(),
        }
    }

    #[test]
    fn loading_view_drops_all_input() {
        let mut state = AppState::new(vec![tool("a")]);
        state.view = View::Loading;
        let before = state.commands.cursor;
        let outcome = handle(&mut state, &parse_key(b"\x1b[B"));
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(state.commands.cursor, before);
    }
}
