//! Filtered reads of the latest snapshot.

use serde::Serialize;

use crate::db::Database;
use crate::error::{Result, SptError};
use crate::models::filter::RecordFilter;
use crate::models::record::Record;

/// Result of a table query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub snapshot_id: i64,
    pub collected_at: String,
    pub count: usize,
    pub rows: Vec<Record>,
}

/// Rows of the latest snapshot matching `filter`, in source order.
pub fn query_records(
    db: &Database,
    filter: &RecordFilter,
    limit: Option<usize>,
) -> Result<QueryResult> {
    let snapshot = db.latest_snapshot()?.ok_or(SptError::NoSnapshot)?;
    let rows = db.get_records(snapshot.id, filter, limit)?;
    Ok(QueryResult {
        snapshot_id: snapshot.id,
        collected_at: snapshot.collected_at,
        count: rows.len(),
        rows,
    })
}
