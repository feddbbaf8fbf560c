//! The external interfaces as traits: everything the core loop
//! needs from the outside world, with no assumption about how it gets
//! there. Concrete adapters live in a separate crate.

use crate::error::CoreError;
use crate::schema::ToolDef;
use serde_json::Value;

/// Fetches the list of callable tools and their schemas from the
/// catalog.
pub trait ListCatalog: Send + Sync {
    fn list_catalog(&self) -> Result<Vec<ToolDef>, CoreError>;
}

/// One piece of content returned by a tool call. Mirrors the shape of
/// an MCP-style `content` array entry closely enough to render, without
/// depending on any particular wire crate from the core.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallContent {
    Text(String),
    Json(Value),
}

/// Outcome of invoking a tool.
#[derive(Debug, Clone)]
pub struct CallResult {
    pub content: Vec<ToolCallContent>,
    pub is_error: bool,
}

impl CallResult {
    /// Collapse `content` into a single JSON value for the pretty
    /// printer: a lone JSON entry passes through, a lone text entry is
    /// parsed as JSON when possible (falling back to a string value),
    /// and multiple entries become an array.
    pub fn as_value(&self) -> Value {
        match self.content.as_slice() {
            [] => Value::Null,
            [ToolCallContent::Json(v)] => v.clone(),
            [ToolCallContent::Text(t)] => {
                serde_json::from_str(t).unwrap_or_else(|_| Value::String(t.clone()))
            }
            many => Value::Array(
                many.iter()
                    .map(|c| match c {
                        ToolCallContent::Json(v) => v.clone(),
                        ToolCallContent::Text(t) => {
                            serde_json::from_str(t).unwrap_or_else(|_| Value::String(t.clone()))
                        }
                    })
                    .collect(),
            ),
        }
    }
}

/// Invokes a named tool with its JSON-RPC arguments.
pub trait CallTool: Send + Sync {
    fn call_tool(&self, name: &str, arguments: Value) -> Result<CallResult, CoreError>;
}

/// Which of the two credential shapes a loaded token has. The core
/// never branches on this itself; it is passed through so an adapter
/// building the outbound request knows which auth header to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Oauth,
    Token,
}

/// Loads the bearer credential used to authenticate catalog and tool
/// calls. Called once immediately before each
/// invocation rather than cached, so a revoked token is caught at the
/// next call instead of surfacing as a transport error deep in retry
/// logic.
pub trait LoadToken: Send + Sync {
    fn load_token(&self) -> Result<(String, AuthKind), CoreError>;
}

/// Reads and writes the locally persisted catalog snapshot.
pub trait PersistCache: Send + Sync {
    fn load_cached_catalog(&self) -> Result<Option<Vec<ToolDef>>, CoreError>;
    fn store_cached_catalog(&self, tools: &[ToolDef]) -> Result<(), CoreError>;
}
