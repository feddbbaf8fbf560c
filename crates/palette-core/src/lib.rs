//! Domain types, schema resolution, and form state for the dynamic
//! schema-driven tool catalog. Contains no terminal I/O and no
//! transport: everything here is pure and synchronous.

pub mod args;
pub mod args_reverse;
pub mod date;
pub mod error;
pub mod json_print;
pub mod ports;
pub mod resolve;
pub mod schema;
pub mod state;
pub mod values;

pub use error::{CoreError, Result};
pub use ports::{AuthKind, CallResult, CallTool, ListCatalog, LoadToken, PersistCache, ToolCallContent};
pub use schema::{DateFormat, FieldKind, FormField, ObjectSchema, SchemaProperty, ToolDef};
pub use state::{
    AppState, CommandsState, FieldEditor, FormOrigin, FormStackEntry, FormState, LoadingState,
    ResultsState, TagCursor, View,
};
pub use values::FormValues;
