use serde::Serialize;

use crate::classify::{ClassificationTable, TypeMapping};

/// The effective section → data type table.
#[derive(Debug, Clone, Serialize)]
pub struct TypesResult {
    pub count: usize,
    pub types: Vec<TypeMapping>,
}

/// List the table sorted by section.
#[must_use]
pub fn list_types(table: &ClassificationTable) -> TypesResult {
    let types = table.mappings();
    TypesResult {
        count: types.len(),
        types,
    }
}
