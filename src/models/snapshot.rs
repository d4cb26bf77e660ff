use serde::Serialize;

/// A stored report, one row of the `snapshots` table.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Database row ID (0 if not yet persisted).
    pub id: i64,
    /// Where the report came from (`system_profiler`, a file path, `stdin`).
    pub source: String,
    /// SHA-256 of the serialized rows, used to skip unchanged reports.
    pub hash: String,
    pub record_count: u64,
    /// Collection timestamp as stored by `SQLite` (UTC).
    pub collected_at: String,
}

impl Snapshot {
    #[must_use]
    pub fn new(source: String, hash: String, record_count: u64) -> Self {
        Self {
            id: 0,
            source,
            hash,
            record_count,
            collected_at: String::new(),
        }
    }
}
