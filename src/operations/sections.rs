use serde::Serialize;

use crate::db::{Database, SectionRow};
use crate::error::{Result, SptError};

/// Sections present in the latest snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SectionsResult {
    pub snapshot_id: i64,
    pub count: usize,
    pub sections: Vec<SectionRow>,
}

/// List sections of the latest snapshot in report order.
pub fn list_sections(db: &Database) -> Result<SectionsResult> {
    let snapshot = db.latest_snapshot()?.ok_or(SptError::NoSnapshot)?;
    let sections = db.section_summary(snapshot.id)?;
    Ok(SectionsResult {
        snapshot_id: snapshot.id,
        count: sections.len(),
        sections,
    })
}
