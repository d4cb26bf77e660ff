/// SQL statements for creating the sptable schema.
pub const CREATE_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS snapshots (
    id INTEGER PRIMARY KEY,
    source TEXT NOT NULL,
    hash TEXT NOT NULL,
    record_count INTEGER NOT NULL,
    collected_at TEXT DEFAULT CURRENT_TIMESTAMP
);

-- One row per leaf entry; every text column is NOT NULL, empty when unknown.
CREATE TABLE IF NOT EXISTS system_profiler (
    id INTEGER PRIMARY KEY,
    snapshot_id INTEGER NOT NULL REFERENCES snapshots(id) ON DELETE CASCADE,
    ordinal INTEGER NOT NULL,
    section TEXT NOT NULL,
    subsection TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    data_type TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sp_snapshot ON system_profiler(snapshot_id, ordinal);
CREATE INDEX IF NOT EXISTS idx_sp_section ON system_profiler(snapshot_id, section);
CREATE INDEX IF NOT EXISTS idx_sp_data_type ON system_profiler(snapshot_id, data_type);
CREATE INDEX IF NOT EXISTS idx_snapshots_hash ON snapshots(hash);
";
