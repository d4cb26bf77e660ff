//! Section name → `system_profiler` data type lookup.
//!
//! The parser never consults global state: callers hand it any [`Classifier`],
//! normally a [`ClassificationTable`] built from the defaults plus the user's
//! `[classification]` overrides.

use std::collections::HashMap;

use serde::Serialize;

/// Sections emitted by `system_profiler -detailLevel basic` and their data types.
const BUILTIN: &[(&str, &str)] = &[
    ("Apple Pay", "SPSecureElementDataType"),
    ("Audio", "SPAudioDataType"),
    ("Bluetooth", "SPBluetoothDataType"),
    ("Camera", "SPCameraDataType"),
    ("Controller", "SPHardwareDataType"),
    ("Firewall", "SPFirewallDataType"),
    ("Graphics/Displays", "SPDisplaysDataType"),
    ("Hardware", "SPHardwareDataType"),
    ("Language & Region", "SPInternationalDataType"),
    ("Locations", "SPNetworkLocationDataType"),
    ("Memory", "SPMemoryDataType"),
    ("NVMExpress", "SPNVMeDataType"),
    ("Network", "SPNetworkDataType"),
    ("Power", "SPPowerDataType"),
    ("Printer Software", "SPPrintersSoftwareDataType"),
    ("Printers", "SPPrintersDataType"),
    ("Software", "SPSoftwareDataType"),
    ("SPI", "SPSPIDataType"),
    ("Storage", "SPStorageDataType"),
    ("Thunderbolt/USB4", "SPThunderboltDataType"),
    ("USB", "SPUSBDataType"),
    ("Volumes", "SPNetworkVolumeDataType"),
    ("Wi-Fi", "SPAirPortDataType"),
];

/// Maps a top-level section name to its category tag.
pub trait Classifier {
    /// Data type for `section`, or `None` when the section is unknown.
    fn data_type(&self, section: &str) -> Option<&str>;
}

impl Classifier for HashMap<String, String> {
    fn data_type(&self, section: &str) -> Option<&str> {
        self.get(section).map(String::as_str)
    }
}

/// Exact-match section table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationTable {
    entries: HashMap<String, String>,
}

/// One row of the effective table, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct TypeMapping {
    pub section: String,
    pub data_type: String,
}

impl ClassificationTable {
    /// An empty table: every section is unclassified.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.iter().copied().collect()
    }

    /// Built-in table with `overrides` layered on top.
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table = Self::builtin();
        for (section, data_type) in overrides {
            table.insert(section.clone(), data_type.clone());
        }
        table
    }

    pub fn insert(&mut self, section: impl Into<String>, data_type: impl Into<String>) {
        self.entries.insert(section.into(), data_type.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All mappings sorted by section name.
    #[must_use]
    pub fn mappings(&self) -> Vec<TypeMapping> {
        let mut out: Vec<TypeMapping> = self
            .entries
            .iter()
            .map(|(section, data_type)| TypeMapping {
                section: section.clone(),
                data_type: data_type.clone(),
            })
            .collect();
        out.sort_by(|a, b| a.section.cmp(&b.section));
        out
    }
}

impl Classifier for ClassificationTable {
    fn data_type(&self, section: &str) -> Option<&str> {
        self.entries.get(section).map(String::as_str)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ClassificationTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = Self::empty();
        for (section, data_type) in iter {
            table.insert(section, data_type);
        }
        table
    }
}
