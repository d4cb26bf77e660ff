//! MCP tool parameter types.
//!
//! Each struct corresponds to the input parameters for one MCP tool.
//! All parameter structs derive `Deserialize` and `JsonSchema` as required by rmcp.

use rmcp::schemars;
use serde::Deserialize;

use crate::models::filter::RecordFilter;

// ── Parse ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseParams {
    /// Report text as printed by system_profiler.
    #[schemars(description = "Raw system_profiler text output to flatten into rows")]
    pub text: String,
}

// ── Collect ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CollectParams {
    /// Optional report file to store instead of running system_profiler.
    #[schemars(description = "Path to a saved report file (default: run system_profiler)")]
    pub path: Option<String>,
}

// ── Query ───────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct QueryParams {
    #[schemars(description = "Exact section name (e.g. 'Storage')")]
    pub section: Option<String>,
    #[schemars(description = "Exact subsection name (e.g. 'Macintosh HD')")]
    pub subsection: Option<String>,
    #[schemars(description = "Exact data type (e.g. 'SPStorageDataType'); '' for unclassified rows")]
    pub data_type: Option<String>,
    #[schemars(description = "Exact entry key (e.g. 'Capacity')")]
    pub key: Option<String>,
    #[schemars(description = "Maximum rows to return")]
    pub limit: Option<usize>,
}

impl QueryParams {
    #[must_use]
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            section: self.section.clone(),
            subsection: self.subsection.clone(),
            data_type: self.data_type.clone(),
            key: self.key.clone(),
        }
    }
}

// ── Grep ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GrepParams {
    /// Regex pattern.
    #[schemars(description = "Regex pattern to match")]
    pub pattern: String,
    /// Column to match against.
    #[schemars(description = "Column to match: 'key', 'value' or 'any' (default: any)")]
    pub field: Option<String>,
}

// ── Sections / Stats / Columns / Types / Generate ───────────────
// No parameters needed.
