use serde::Serialize;

use crate::models::record::COLUMNS;

/// One output column of the table.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub sql_type: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnsResult {
    pub table: &'static str,
    pub columns: Vec<ColumnInfo>,
}

/// Name of the table as stored and exposed.
pub const TABLE_NAME: &str = "system_profiler";

fn describe(column: &str) -> &'static str {
    match column {
        "section" => "Top-level heading (zero indent)",
        "subsection" => "Second-level heading (four-space indent), empty if none",
        "key" => "Text before the first \": \" of the entry",
        "value" => "Text after the first \": \" of the entry",
        "data_type" => "system_profiler data type of the section, empty if unknown",
        _ => "",
    }
}

/// The table's columns, all `TEXT` and never null.
#[must_use]
pub fn list_columns() -> ColumnsResult {
    ColumnsResult {
        table: TABLE_NAME,
        columns: COLUMNS
            .iter()
            .map(|&name| ColumnInfo {
                name,
                sql_type: "TEXT",
                description: describe(name),
            })
            .collect(),
    }
}
