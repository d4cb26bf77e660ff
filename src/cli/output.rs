use serde::Serialize;

use crate::models::record::Record;

/// Row output format, from `[output] format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON array on a single line.
    Minified,
    /// Indented JSON array.
    Pretty,
    /// One JSON object per line.
    Jsonl,
}

impl OutputFormat {
    /// Unknown names fall back to minified.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "pretty" => Self::Pretty,
            "jsonl" => Self::Jsonl,
            "minified" => Self::Minified,
            other => {
                tracing::warn!(format = other, "unknown output format, using minified");
                Self::Minified
            }
        }
    }
}

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format table rows in the requested format.
pub fn format_rows(rows: &[Record], format: OutputFormat) -> String {
    match format {
        OutputFormat::Minified => format_json(&rows),
        OutputFormat::Pretty => serde_json::to_string_pretty(rows)
            .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}")),
        OutputFormat::Jsonl => rows
            .iter()
            .map(format_json)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    format_json(&serde_json::json!({ "error": err.to_string() }))
}
