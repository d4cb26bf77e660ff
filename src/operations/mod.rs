//! Shared operations used by both CLI and MCP server.
//!
//! `main.rs` and `mcp/server.rs` only resolve inputs and format results; the
//! behaviour lives here.

pub mod collect;
pub mod columns;
pub mod generate;
pub mod grep;
pub mod query;
pub mod sections;
pub mod stats;
pub mod types;

pub use collect::{collect, collect_into, CollectOutput};
pub use columns::{list_columns, ColumnInfo, ColumnsResult};
pub use generate::{generate, keep_partial_rows, parse_source, parse_text, RowsResult};
pub use grep::{grep_records, GrepField, GrepResult};
pub use query::{query_records, QueryResult};
pub use sections::{list_sections, SectionsResult};
pub use stats::{get_stats, LatestSnapshot, StatsResult};
pub use types::{list_types, TypesResult};
