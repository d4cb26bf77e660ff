use serde::Deserialize;

/// Exact-match column filters for table queries. `None` matches anything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    pub section: Option<String>,
    pub subsection: Option<String>,
    pub data_type: Option<String>,
    pub key: Option<String>,
}

impl RecordFilter {
    /// `(column, value)` pairs for the filters that are set, in column order.
    #[must_use]
    pub fn conditions(&self) -> Vec<(&'static str, &str)> {
        [
            ("section", self.section.as_deref()),
            ("subsection", self.subsection.as_deref()),
            ("data_type", self.data_type.as_deref()),
            ("key", self.key.as_deref()),
        ]
        .into_iter()
        .filter_map(|(col, val)| val.map(|v| (col, v)))
        .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions().is_empty()
    }
}
