//! MCP server implementation using rmcp.
//!
//! Exposes the system_profiler table as MCP tools over stdio transport.
//! Each tool calls the same operations as the CLI commands.

use std::path::PathBuf;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler, ServiceExt};
use serde::Serialize;

use crate::cli::output::format_error;
use crate::config::Config;
use crate::db::Database;
use crate::error::SptError;
use crate::operations::{self, GrepField};
use crate::source::ReportSource;

use super::tools::{CollectParams, GrepParams, ParseParams, QueryParams};

/// The sptable MCP server.
///
/// Holds the root directory only. Config and database are resolved per tool
/// call so edits to `.sptable/config.toml` apply without a restart.
#[derive(Clone)]
pub struct SptableServer {
    root: PathBuf,
    tool_router: ToolRouter<Self>,
}

// ── Helper functions ────────────────────────────────────────────

impl SptableServer {
    /// Router holding every registered tool.
    #[must_use]
    pub fn get_tool_router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    fn config(&self) -> Config {
        Config::new(&self.root)
    }

    /// Open the snapshot database. Errors if nothing was collected yet.
    fn ensure_db(&self) -> Result<Database, SptError> {
        let config = self.config();
        if !config.db_exists() {
            return Err(SptError::NoSnapshot);
        }
        Database::open(&config.db_path)
    }

    fn to_json<T: Serialize>(val: &T) -> String {
        serde_json::to_string(val).unwrap_or_else(|e| format_error(&e))
    }

    fn respond<T: Serialize>(result: crate::error::Result<T>) -> String {
        match result {
            Ok(val) => Self::to_json(&val),
            Err(e) => format_error(&e),
        }
    }
}

// ── Tool implementations ────────────────────────────────────────

#[tool_router]
impl SptableServer {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            tool_router: Self::tool_router(),
        }
    }

    // ─── Parsing ────────────────────────────────────────────────

    #[tool(
        description = "Flatten raw system_profiler text into rows of {section, subsection, key, value, data_type}. Does not touch the database."
    )]
    pub async fn parse(&self, Parameters(params): Parameters<ParseParams>) -> String {
        let table = self.config().classification_table();
        Self::to_json(&operations::parse_text(&params.text, &table))
    }

    #[tool(
        description = "Run system_profiler on this machine and return its rows. Returns no rows when not running on macOS. A failed read returns the rows parsed so far plus an 'error' field."
    )]
    pub async fn generate(&self) -> String {
        Self::respond(operations::keep_partial_rows(operations::generate(
            &self.config(),
        )))
    }

    #[tool(
        description = "Run system_profiler (or read a saved report) and store the rows as a snapshot. Reports 'unchanged' when the rows match the latest snapshot."
    )]
    pub async fn collect(&self, Parameters(params): Parameters<CollectParams>) -> String {
        let config = self.config();
        let source = ReportSource::from_input(params.path.as_deref(), &config.settings.profiler);
        if matches!(source, ReportSource::Stdin) {
            // stdin is the MCP transport
            return format_error(&"stdin is not available as a report source over MCP");
        }
        Self::respond(operations::collect(&config, &source))
    }

    // ─── Reading snapshots ──────────────────────────────────────

    #[tool(
        description = "Rows of the latest snapshot filtered by exact section, subsection, data_type and key. All filters optional."
    )]
    pub async fn query(&self, Parameters(params): Parameters<QueryParams>) -> String {
        let db = match self.ensure_db() {
            Ok(db) => db,
            Err(e) => return format_error(&e),
        };
        Self::respond(operations::query_records(&db, &params.filter(), params.limit))
    }

    #[tool(
        description = "Regex search over keys and/or values of the latest snapshot."
    )]
    pub async fn grep(&self, Parameters(params): Parameters<GrepParams>) -> String {
        let field = match params.field.as_deref().unwrap_or("any").parse::<GrepField>() {
            Ok(f) => f,
            Err(e) => return format_error(&e),
        };
        let db = match self.ensure_db() {
            Ok(db) => db,
            Err(e) => return format_error(&e),
        };
        Self::respond(operations::grep_records(&db, &params.pattern, field))
    }

    #[tool(
        description = "Sections of the latest snapshot in report order, with data type, subsection count and row count."
    )]
    pub async fn sections(&self) -> String {
        match self.ensure_db() {
            Ok(db) => Self::respond(operations::list_sections(&db)),
            Err(e) => format_error(&e),
        }
    }

    #[tool(description = "Snapshot store statistics: snapshot count, total rows, latest snapshot summary.")]
    pub async fn stats(&self) -> String {
        match self.ensure_db() {
            Ok(db) => Self::respond(operations::get_stats(&db)),
            Err(SptError::NoSnapshot) => Self::respond(
                Database::open_in_memory().and_then(|db| operations::get_stats(&db)),
            ),
            Err(e) => format_error(&e),
        }
    }

    // ─── Table metadata ─────────────────────────────────────────

    #[tool(description = "Columns of the system_profiler table (all TEXT, never null).")]
    pub async fn columns(&self) -> String {
        Self::to_json(&operations::list_columns())
    }

    #[tool(
        description = "Section name to system_profiler data type mapping in effect (built-in plus config overrides)."
    )]
    pub async fn types(&self) -> String {
        Self::to_json(&operations::list_types(&self.config().classification_table()))
    }
}

// ── ServerHandler implementation ────────────────────────────────

#[tool_handler]
impl ServerHandler for SptableServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "sptable: macOS system_profiler output as a flat table. \
                 Every row is {section, subsection, key, value, data_type}; empty strings mean \
                 'no subsection' or 'unclassified section'. \
                 Use parse for text you already have, generate for a live read, \
                 collect to store a snapshot, then query/grep/sections/stats to read it back. \
                 columns and types describe the table and the section to data type mapping."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ── Server startup ──────────────────────────────────────────────

/// Start the MCP server on stdio transport.
pub async fn start_mcp_server() -> crate::error::Result<()> {
    crate::logging::init("info");

    tracing::info!("Starting sptable MCP server");

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let server = SptableServer::new(root);

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| SptError::Other(format!("MCP server error: {e}")))?;

    tracing::info!("MCP server running on stdio");

    service
        .waiting()
        .await
        .map_err(|e| SptError::Other(format!("MCP server error: {e}")))?;

    Ok(())
}
