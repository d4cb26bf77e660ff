use rusqlite::{params, params_from_iter};
use serde::Serialize;

use crate::error::Result;
use crate::models::filter::RecordFilter;
use crate::models::record::Record;
use crate::models::snapshot::Snapshot;

use super::Database;

/// Per-section rollup of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRow {
    pub section: String,
    pub data_type: String,
    /// Distinct non-empty subsections.
    pub subsections: u64,
    pub rows: u64,
}

/// Whole-database counters.
#[derive(Debug, Clone, Default)]
pub struct DbStats {
    pub snapshot_count: u64,
    pub row_count: u64,
}

impl Database {
    // ─── Snapshot operations ───

    /// Store a snapshot and its records atomically. Returns the snapshot ID.
    ///
    /// Records keep their position in `records` as `ordinal`.
    pub fn insert_snapshot(&mut self, snapshot: &Snapshot, records: &[Record]) -> Result<i64> {
        let tx = self.conn_mut().transaction()?;
        tx.execute(
            "INSERT INTO snapshots (source, hash, record_count) VALUES (?1, ?2, ?3)",
            params![snapshot.source, snapshot.hash, records.len() as i64],
        )?;
        let snapshot_id = tx.last_insert_rowid();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO system_profiler (snapshot_id, ordinal, section, subsection, key, value, data_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (ordinal, r) in records.iter().enumerate() {
                stmt.execute(params![
                    snapshot_id,
                    ordinal as i64,
                    r.section,
                    r.subsection,
                    r.key,
                    r.value,
                    r.data_type,
                ])?;
            }
        }
        tx.commit()?;
        Ok(snapshot_id)
    }

    /// Most recently stored snapshot.
    pub fn latest_snapshot(&self) -> Result<Option<Snapshot>> {
        let mut snapshots = self.query_snapshots(
            "SELECT id, source, hash, record_count, collected_at FROM snapshots ORDER BY id DESC LIMIT 1",
        )?;
        Ok(snapshots.pop())
    }

    /// All snapshots, newest first.
    #[cfg(test)]
    pub fn list_snapshots(&self) -> Result<Vec<Snapshot>> {
        self.query_snapshots(
            "SELECT id, source, hash, record_count, collected_at FROM snapshots ORDER BY id DESC",
        )
    }

    fn query_snapshots(&self, sql: &str) -> Result<Vec<Snapshot>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Snapshot {
                id: row.get(0)?,
                source: row.get(1)?,
                hash: row.get(2)?,
                record_count: row.get::<_, i64>(3)? as u64,
                collected_at: row.get(4)?,
            })
        })?;
        let mut snapshots = Vec::new();
        for r in rows {
            snapshots.push(r?);
        }
        Ok(snapshots)
    }

    /// Delete all but the newest `keep` snapshots (rows cascade). Returns the
    /// number of snapshots removed.
    pub fn prune_snapshots(&self, keep: usize) -> Result<usize> {
        let removed = self.conn().execute(
            "DELETE FROM snapshots WHERE id NOT IN
             (SELECT id FROM snapshots ORDER BY id DESC LIMIT ?1)",
            params![keep as i64],
        )?;
        Ok(removed)
    }

    // ─── Row operations ───

    /// Rows of a snapshot matching `filter`, in source order.
    pub fn get_records(
        &self,
        snapshot_id: i64,
        filter: &RecordFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Record>> {
        let conditions = filter.conditions();
        let mut sql = String::from(
            "SELECT section, subsection, key, value, data_type FROM system_profiler WHERE snapshot_id = ?1",
        );
        for (i, (column, _)) in conditions.iter().enumerate() {
            sql.push_str(&format!(" AND {column} = ?{}", i + 2));
        }
        sql.push_str(" ORDER BY ordinal");
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }

        let mut values: Vec<rusqlite::types::Value> = vec![snapshot_id.into()];
        values.extend(conditions.iter().map(|(_, v)| (*v).to_string().into()));

        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), |row| {
            Ok(Record {
                section: row.get(0)?,
                subsection: row.get(1)?,
                key: row.get(2)?,
                value: row.get(3)?,
                data_type: row.get(4)?,
            })
        })?;
        let mut records = Vec::new();
        for r in rows {
            records.push(r?);
        }
        Ok(records)
    }

    /// Sections of a snapshot in order of first appearance.
    pub fn section_summary(&self, snapshot_id: i64) -> Result<Vec<SectionRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT section, data_type, COUNT(DISTINCT NULLIF(subsection, '')), COUNT(*)
             FROM system_profiler WHERE snapshot_id = ?1
             GROUP BY section, data_type
             ORDER BY MIN(ordinal)",
        )?;
        let rows = stmt.query_map(params![snapshot_id], |row| {
            Ok(SectionRow {
                section: row.get(0)?,
                data_type: row.get(1)?,
                subsections: row.get::<_, i64>(2)? as u64,
                rows: row.get::<_, i64>(3)? as u64,
            })
        })?;
        let mut sections = Vec::new();
        for r in rows {
            sections.push(r?);
        }
        Ok(sections)
    }

    /// Snapshot and row counts across the whole database.
    pub fn stats(&self) -> Result<DbStats> {
        let snapshot_count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM snapshots", [], |r| r.get(0))?;
        let row_count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM system_profiler", [], |r| r.get(0))?;
        Ok(DbStats {
            snapshot_count: snapshot_count as u64,
            row_count: row_count as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new("Hardware", "Hardware Overview", "Model Name", "MacBook Pro", "SPHardwareDataType"),
            Record::new("Hardware", "Hardware Overview", "Chip", "Apple M1 Pro", "SPHardwareDataType"),
            Record::new("Memory", "", "Memory", "16 GB", "SPMemoryDataType"),
            Record::new("Storage", "Macintosh HD", "Capacity", "494.38 GB", "SPStorageDataType"),
            Record::new("Storage", "Data", "Capacity", "494.38 GB", "SPStorageDataType"),
            Record::new("Mystery", "", "Foo", "Bar", ""),
        ]
    }

    fn store(db: &mut Database, hash: &str) -> i64 {
        let records = sample_records();
        let snap = Snapshot::new("test".into(), hash.into(), records.len() as u64);
        db.insert_snapshot(&snap, &records).unwrap()
    }

    #[test]
    fn insert_and_read_back_in_order() {
        let mut db = test_db();
        let id = store(&mut db, "h1");
        assert!(id > 0);

        let got = db.get_records(id, &RecordFilter::default(), None).unwrap();
        assert_eq!(got, sample_records());
    }

    #[test]
    fn latest_snapshot_is_newest() {
        let mut db = test_db();
        assert!(db.latest_snapshot().unwrap().is_none());

        store(&mut db, "h1");
        let second = store(&mut db, "h2");

        let latest = db.latest_snapshot().unwrap().unwrap();
        assert_eq!(latest.id, second);
        assert_eq!(latest.hash, "h2");
        assert_eq!(latest.record_count, 6);
        assert!(!latest.collected_at.is_empty());
    }

    #[test]
    fn filters_are_exact_and_combined() {
        let mut db = test_db();
        let id = store(&mut db, "h1");

        let storage = RecordFilter {
            section: Some("Storage".into()),
            ..Default::default()
        };
        assert_eq!(db.get_records(id, &storage, None).unwrap().len(), 2);

        let data_disk = RecordFilter {
            section: Some("Storage".into()),
            subsection: Some("Data".into()),
            ..Default::default()
        };
        let got = db.get_records(id, &data_disk, None).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].subsection, "Data");

        let unclassified = RecordFilter {
            data_type: Some(String::new()),
            ..Default::default()
        };
        let got = db.get_records(id, &unclassified, None).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].section, "Mystery");

        let partial = RecordFilter {
            section: Some("Stor".into()),
            ..Default::default()
        };
        assert!(db.get_records(id, &partial, None).unwrap().is_empty());
    }

    #[test]
    fn limit_applies_after_ordering() {
        let mut db = test_db();
        let id = store(&mut db, "h1");
        let got = db.get_records(id, &RecordFilter::default(), Some(2)).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].key, "Model Name");
        assert_eq!(got[1].key, "Chip");
    }

    #[test]
    fn section_summary_counts() {
        let mut db = test_db();
        let id = store(&mut db, "h1");
        let summary = db.section_summary(id).unwrap();
        let names: Vec<_> = summary.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(names, vec!["Hardware", "Memory", "Storage", "Mystery"]);

        let storage = &summary[2];
        assert_eq!(storage.data_type, "SPStorageDataType");
        assert_eq!(storage.subsections, 2);
        assert_eq!(storage.rows, 2);

        let memory = &summary[1];
        assert_eq!(memory.subsections, 0);
        assert_eq!(memory.rows, 1);
    }

    #[test]
    fn prune_keeps_newest_and_cascades() {
        let mut db = test_db();
        store(&mut db, "h1");
        store(&mut db, "h2");
        let newest = store(&mut db, "h3");

        let removed = db.prune_snapshots(1).unwrap();
        assert_eq!(removed, 2);

        let snapshots = db.list_snapshots().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, newest);

        let stats = db.stats().unwrap();
        assert_eq!(stats.snapshot_count, 1);
        assert_eq!(stats.row_count, 6);
    }

    #[test]
    fn stats_empty_db() {
        let db = test_db();
        let stats = db.stats().unwrap();
        assert_eq!(stats.snapshot_count, 0);
        assert_eq!(stats.row_count, 0);
    }
}
