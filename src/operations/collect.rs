//! Collect: parse a report and store it as a snapshot.

use serde::Serialize;

use crate::classify::Classifier;
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::hasher::hash_records;
use crate::models::snapshot::Snapshot;
use crate::parser;
use crate::source::ReportSource;

/// Outcome of a collect run.
#[derive(Debug, Clone, Serialize)]
pub struct CollectOutput {
    /// Snapshot holding the rows (the existing one when unchanged).
    pub snapshot_id: i64,
    pub source: String,
    pub rows: usize,
    pub sections: usize,
    pub unclassified_rows: usize,
    /// The parsed table matched the latest snapshot, nothing was stored.
    pub unchanged: bool,
    /// Old snapshots removed by retention.
    pub pruned: usize,
}

/// Collect into the configured database.
pub fn collect(config: &Config, source: &ReportSource) -> Result<CollectOutput> {
    config.ensure_data_dir()?;
    let mut db = Database::open(&config.db_path)?;
    collect_into(
        &mut db,
        source,
        &config.classification_table(),
        config.settings.storage.keep_snapshots,
    )
}

/// Read, parse and store `source` in `db`. `keep_snapshots == 0` disables pruning.
///
/// The report is read whole before parsing, so a failed read stores nothing.
pub fn collect_into<C: Classifier + ?Sized>(
    db: &mut Database,
    source: &ReportSource,
    table: &C,
    keep_snapshots: usize,
) -> Result<CollectOutput> {
    let label = source.label();
    let bytes = source.read_all()?;
    let records = parser::parse_bytes(&bytes, table);
    let hash = hash_records(&records)?;

    let mut sections: Vec<&str> = records.iter().map(|r| r.section.as_str()).collect();
    sections.sort_unstable();
    sections.dedup();
    let unclassified_rows = records.iter().filter(|r| r.data_type.is_empty()).count();

    let mut output = CollectOutput {
        snapshot_id: 0,
        source: label,
        rows: records.len(),
        sections: sections.len(),
        unclassified_rows,
        unchanged: false,
        pruned: 0,
    };

    if let Some(latest) = db.latest_snapshot()? {
        if latest.hash == hash {
            tracing::info!(snapshot = latest.id, "report unchanged since last collect");
            output.snapshot_id = latest.id;
            output.unchanged = true;
            return Ok(output);
        }
    }

    let snapshot = Snapshot::new(output.source.clone(), hash, records.len() as u64);
    output.snapshot_id = db.insert_snapshot(&snapshot, &records)?;
    tracing::info!(
        snapshot = output.snapshot_id,
        rows = output.rows,
        "stored snapshot"
    );

    if keep_snapshots > 0 {
        output.pruned = db.prune_snapshots(keep_snapshots)?;
    }

    Ok(output)
}
