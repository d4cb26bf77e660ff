//! Stats operations shared between CLI and MCP.

use serde::Serialize;

use crate::db::Database;
use crate::error::Result;

/// Snapshot store statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResult {
    /// Number of stored snapshots.
    pub snapshots: u64,
    /// Rows across all snapshots.
    pub total_rows: u64,
    /// Details of the newest snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestSnapshot>,
}

/// Summary of the newest snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct LatestSnapshot {
    pub id: i64,
    pub source: String,
    pub collected_at: String,
    pub rows: u64,
    pub sections: usize,
    /// Rows whose section has no data type.
    pub unclassified_rows: u64,
}

/// Get snapshot store statistics.
pub fn get_stats(db: &Database) -> Result<StatsResult> {
    let stats = db.stats()?;

    let latest = match db.latest_snapshot()? {
        Some(snapshot) => {
            let sections = db.section_summary(snapshot.id)?;
            let unclassified_rows = sections
                .iter()
                .filter(|s| s.data_type.is_empty())
                .map(|s| s.rows)
                .sum();
            Some(LatestSnapshot {
                id: snapshot.id,
                source: snapshot.source,
                collected_at: snapshot.collected_at,
                rows: snapshot.record_count,
                sections: sections.len(),
                unclassified_rows,
            })
        }
        None => None,
    };

    Ok(StatsResult {
        snapshots: stats.snapshot_count,
        total_rows: stats.row_count,
        latest,
    })
}
