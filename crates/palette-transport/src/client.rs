//! HTTP transport: a single JSON-RPC POST
//! endpoint carrying `tools/list` and `tools/call` requests, with the
//! auth header shape chosen by the loaded credential's `AuthKind`.

use crate::rpc::{JsonRpcRequest, JsonRpcResponse};
use palette_core::error::CoreError;
use palette_core::ports::{AuthKind, CallResult, CallTool, ListCatalog, LoadToken, ToolCallContent};
use palette_core::schema::ToolDef;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpCatalogClient {
    base_url: String,
    tokens: Arc<dyn LoadToken>,
    http: reqwest::blocking::Client,
    next_id: AtomicU64,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn LoadToken>) -> Self {
        // A fresh `reqwest::Client` is built once here rather than per
        // call; the catalog fetch and the tool-call path each hold
        // their own `HttpCatalogClient` instance today, but within one instance the
        // connection pool is shared.
        Self {
            base_url: base_url.into(),
            tokens,
            http: reqwest::blocking::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CoreError> {
        let (token, kind) = self.tokens.load_token()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest::new(id, method, params);

        let response = self
            .http
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .header("Authorization", auth_header(&token, kind))
            .json(&request)
            .send()
            .map_err(|e| CoreError::Adapter(format!("transport error: {e}")))?;

        let body: JsonRpcResponse = response
            .json()
            .map_err(|e| CoreError::Adapter(format!("malformed response: {e}")))?;

        if let Some(error) = body.error {
            return Err(CoreError::Adapter(format!(
                "remote error {}: {}",
                error.code, error.message
            )));
        }
        body.result
            .ok_or_else(|| CoreError::Adapter("response carried neither result nor error".to_string()))
    }
}

fn auth_header(token: &str, kind: AuthKind) -> String {
    match kind {
        AuthKind::Oauth => format!("Bearer {token}"),
        AuthKind::Token => format!("Token {token}"),
    }
}

impl ListCatalog for HttpCatalogClient {
    fn list_catalog(&self) -> Result<Vec<ToolDef>, CoreError> {
        let result = self.call("tools/list", None)?;
        let tools = result
            .get("tools")
            .cloned()
            .unwrap_or(result);
        serde_json::from_value(tools)
            .map_err(|e| CoreError::Adapter(format!("catalog decode error: {e}")))
    }
}

impl CallTool for HttpCatalogClient {
    fn call_tool(&self, name: &str, arguments: Value) -> Result<CallResult, CoreError> {
        let params = serde_json::json!({ "name": name, "arguments": arguments });
        let result = self.call("tools/call", Some(params))?;
        decode_call_result(result)
    }
}

fn decode_call_result(result: Value) -> Result<CallResult, CoreError> {
    let is_error = result.get("isError").and_then(Value::as_bool).unwrap_or(false);
    let content = match result.get("content").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items.iter().map(decode_content_item).collect(),
        _ => result
            .get("structuredContent")
            .map(|v| vec![ToolCallContent::Json(v.clone())])
            .unwrap_or_default(),
    };
    Ok(CallResult { content, is_error })
}

fn decode_content_item(item: &Value) -> ToolCallContent {
    match item.get("type").and_then(Value::as_str) {
        Some("text") => ToolCallContent::Text(
            item.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
        ),
        _ => ToolCallContent::Json(item.clone()),
    }
}
