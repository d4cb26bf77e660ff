use serde::{Deserialize, Serialize};

/// Column names of the flattened table, in output order.
pub const COLUMNS: [&str; 5] = ["section", "subsection", "key", "value", "data_type"];

/// One leaf `key: value` entry of a report, flattened with its ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Top-level heading the entry appeared under.
    pub section: String,
    /// Second-level heading, empty for entries placed directly under a section.
    pub subsection: String,
    pub key: String,
    pub value: String,
    /// Category tag looked up from `section`, empty when the section is unknown.
    pub data_type: String,
}

impl Record {
    #[must_use]
    pub fn new(
        section: impl Into<String>,
        subsection: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            subsection: subsection.into(),
            key: key.into(),
            value: value.into(),
            data_type: data_type.into(),
        }
    }

    /// Column values in [`COLUMNS`] order.
    #[must_use]
    pub fn values(&self) -> [&str; 5] {
        [
            self.section.as_str(),
            self.subsection.as_str(),
            self.key.as_str(),
            self.value.as_str(),
            self.data_type.as_str(),
        ]
    }
}
