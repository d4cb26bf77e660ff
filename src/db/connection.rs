use std::path::Path;

use rusqlite::Connection;

use crate::db::schema::CREATE_SCHEMA;
use crate::error::Result;

/// Database wrapper for the snapshot store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;\
             PRAGMA foreign_keys=ON;\
             PRAGMA synchronous=NORMAL;\
             PRAGMA temp_store=MEMORY;",
        )?;
        if Self::needs_schema_migration(&conn) {
            tracing::info!(path = %path.display(), "recreating outdated snapshot schema");
            conn.execute_batch(
                "DROP TABLE IF EXISTS system_profiler;\
                 DROP TABLE IF EXISTS snapshots;",
            )?;
        }
        conn.execute_batch(CREATE_SCHEMA)?;
        Ok(Self { conn })
    }

    /// Tables exist but predate the `hash`/`ordinal` columns.
    fn needs_schema_migration(conn: &Connection) -> bool {
        let tables_exist = conn.prepare("SELECT id FROM snapshots LIMIT 0").is_ok();
        let has_hash = conn.prepare("SELECT hash FROM snapshots LIMIT 0").is_ok();
        let has_ordinal = conn
            .prepare("SELECT ordinal FROM system_profiler LIMIT 0")
            .is_ok();
        tables_exist && (!has_hash || !has_ordinal)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(CREATE_SCHEMA)?;
        Ok(Self { conn })
    }

    /// Access the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Access the underlying connection mutably.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
