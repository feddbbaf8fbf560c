//! Process bootstrap: loads the tool
//! catalog (cached or live), then either launches the full-screen
//! palette or dispatches a single non-interactive sub-command — one
//! per catalog tool, each built from its schema.

use anyhow::{Context, Result};
use clap::Command;
use crossterm::tty::IsTty;
use palette_core::error::CoreError;
use palette_core::json_print::pretty_print;
use palette_core::ports::{CallTool, ListCatalog, PersistCache};
use palette_core::schema::ToolDef;
use palette_transport::{FileCatalogCache, FileTokenStore, HttpCatalogClient};
use std::io;
use std::sync::Arc;

const CATALOG_URL_ENV: &str = "PALETTE_MCP_URL";

fn main() -> Result<()> {
    env_logger::init();

    let base_url = std::env::var(CATALOG_URL_ENV)
        .with_context(|| format!("{CATALOG_URL_ENV} must name the MCP endpoint to connect to"))?;

    let tokens = Arc::new(FileTokenStore::default());
    let load_token = Arc::clone(&tokens) as Arc<dyn palette_core::ports::LoadToken>;
    let client = Arc::new(HttpCatalogClient::new(base_url, load_token));
    let cache = FileCatalogCache::default();

    let tools = load_catalog(&cache, client.as_ref()).context("failed to load tool catalog")?;

    if should_run_interactively() {
        let call_tool: Arc<dyn CallTool> = client;
        palette_tui::run(tools, call_tool).context("terminal session failed")?;
        return Ok(());
    }

    run_noninteractive(&tools, client.as_ref())
}

/// The full-screen interface needs a TTY on both ends and at least one
/// argument-free invocation; a non-empty argv always means the user
/// asked for a specific sub-command.
fn should_run_interactively() -> bool {
    wants_interactive(
        std::env::args().nth(1).is_none(),
        io::stdout().is_tty(),
        io::stdin().is_tty(),
    )
}

fn wants_interactive(no_subcommand_given: bool, stdout_is_tty: bool, stdin_is_tty: bool) -> bool {
    no_subcommand_given && stdout_is_tty && stdin_is_tty
}

/// Serve the catalog from the 24-hour cache when it is fresh; otherwise
/// fetch live and refresh the cache.
fn load_catalog(
    cache: &FileCatalogCache,
    catalog: &dyn ListCatalog,
) -> Result<Vec<ToolDef>, CoreError> {
    if let Some(tools) = cache.load_cached_catalog()? {
        return Ok(tools);
    }
    let tools = catalog.list_catalog()?;
    cache.store_cached_catalog(&tools)?;
    Ok(tools)
}

fn run_noninteractive(tools: &[ToolDef], call_tool: &dyn CallTool) -> Result<()> {
    let mut command = Command::new("palette")
        .about("Schema-driven tool palette")
        .subcommand_required(false)
        .arg_required_else_help(false);
    for tool in tools {
        command = command.subcommand(palette_args::build_subcommand(tool));
    }

    let matches = command.get_matches();
    let Some((name, sub_matches)) = matches.subcommand() else {
        eprintln!("no tool named on the command line; run with no arguments in a terminal for the interactive palette");
        std::process::exit(1);
    };
    let tool = tools
        .iter()
        .find(|t| t.name == name)
        .expect("clap only returns subcommand names this process registered");

    let arguments = serde_json::Value::Object(palette_args::matches_to_args(tool, sub_matches));
    match call_tool.call_tool(name, arguments) {
        Ok(result) if result.is_error => {
            eprintln!("{}", join_error_text(&result));
            std::process::exit(1);
        }
        Ok(result) => {
            for line in pretty_print(&result.as_value()) {
                println!("{line}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn join_error_text(result: &palette_core::ports::CallResult) -> String {
    result
        .content
        .iter()
        .map(|c| match c {
            palette_core::ports::ToolCallContent::Text(t) => t.clone(),
            palette_core::ports::ToolCallContent::Json(v) => v.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_requires_no_subcommand_and_both_ttys() {
        assert!(wants_interactive(true, true, true));
        assert!(!wants_interactive(false, true, true));
        assert!(!wants_interactive(true, false, true));
        assert!(!wants_interactive(true, true, false));
    }

    #[test]
    fn join_error_text_concatenates_text_entries() {
        let result = palette_core::ports::CallResult {
            content: vec![
                palette_core::ports::ToolCallContent::Text("first".to_string()),
                palette_core::ports::ToolCallContent::Text("second".to_string()),
            ],
            is_error: true,
        };
        assert_eq!(join_error_text(&result), "first\nsecond");
    }
}
