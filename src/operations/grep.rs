use std::str::FromStr;

use regex::Regex;
use serde::Serialize;

use crate::db::Database;
use crate::error::{Result, SptError};
use crate::models::filter::RecordFilter;
use crate::models::record::Record;

/// Which column a grep pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrepField {
    Key,
    Value,
    /// Key or value.
    Any,
}

impl GrepField {
    fn matches(self, re: &Regex, record: &Record) -> bool {
        match self {
            Self::Key => re.is_match(&record.key),
            Self::Value => re.is_match(&record.value),
            Self::Any => re.is_match(&record.key) || re.is_match(&record.value),
        }
    }
}

impl FromStr for GrepField {
    type Err = SptError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "key" => Ok(Self::Key),
            "value" => Ok(Self::Value),
            "any" => Ok(Self::Any),
            other => Err(SptError::Other(format!(
                "field must be: key, value, or any (got {other})"
            ))),
        }
    }
}

/// Rows of the latest snapshot whose key and/or value match a regex.
#[derive(Debug, Clone, Serialize)]
pub struct GrepResult {
    pub pattern: String,
    pub field: GrepField,
    pub count: usize,
    pub rows: Vec<Record>,
}

/// Regex search over the latest snapshot.
pub fn grep_records(db: &Database, pattern: &str, field: GrepField) -> Result<GrepResult> {
    let re = Regex::new(pattern).map_err(|e| SptError::InvalidPattern {
        pattern: pattern.to_string(),
        detail: e.to_string(),
    })?;

    let snapshot = db.latest_snapshot()?.ok_or(SptError::NoSnapshot)?;
    let rows: Vec<Record> = db
        .get_records(snapshot.id, &RecordFilter::default(), None)?
        .into_iter()
        .filter(|r| field.matches(&re, r))
        .collect();

    Ok(GrepResult {
        pattern: pattern.to_string(),
        field,
        count: rows.len(),
        rows,
    })
}
