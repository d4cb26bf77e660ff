//! Parse operations: the plugin-style "generate rows" call and its variants.

use serde::Serialize;

use crate::classify::Classifier;
use crate::config::Config;
use crate::error::{Result, SptError};
use crate::models::record::Record;
use crate::parser::{self, ReadError};
use crate::source::{ProfilerCommand, ReportSource};

/// Rows produced by a parse, with their count.
#[derive(Debug, Clone, Serialize)]
pub struct RowsResult {
    pub count: usize,
    pub rows: Vec<Record>,
    /// Set when the source failed mid-read; `rows` holds what was parsed before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Vec<Record>> for RowsResult {
    fn from(rows: Vec<Record>) -> Self {
        Self {
            count: rows.len(),
            rows,
            error: None,
        }
    }
}

impl From<ReadError> for RowsResult {
    fn from(err: ReadError) -> Self {
        let error = err.to_string();
        let (rows, _) = err.into_parts();
        Self {
            error: Some(error),
            ..Self::from(rows)
        }
    }
}

/// Turn a read failure into a partial result. Other errors pass through.
pub fn keep_partial_rows(result: Result<RowsResult>) -> Result<RowsResult> {
    match result {
        Err(SptError::Read(e)) => {
            tracing::warn!(error = %e, "returning partial rows");
            Ok(e.into())
        }
        other => other,
    }
}

/// Parse a report read from `source`.
///
/// In-memory sources decode lossily and cannot fail once read. Streamed sources
/// surface an I/O failure as `SptError::Read` carrying the rows parsed so far.
pub fn parse_source<C: Classifier + ?Sized>(source: &ReportSource, table: &C) -> Result<RowsResult> {
    let rows = match source {
        ReportSource::Command(_) | ReportSource::Text(_) => {
            parser::parse_bytes(&source.read_all()?, table)
        }
        ReportSource::File(_) | ReportSource::Stdin => parser::parse_reader(source.open()?, table)?,
    };
    tracing::debug!(source = %source.label(), rows = rows.len(), "parsed report");
    Ok(rows.into())
}

/// Parse report text already in memory.
#[must_use]
pub fn parse_text<C: Classifier + ?Sized>(text: &str, table: &C) -> RowsResult {
    parser::parse_str(text, table).into()
}

/// Run `system_profiler` as configured and return its rows.
///
/// Off macOS the gated command produces an empty report, so this returns no rows.
pub fn generate(config: &Config) -> Result<RowsResult> {
    let source = ReportSource::Command(ProfilerCommand::from_settings(&config.settings.profiler));
    parse_source(&source, &config.classification_table())
}
