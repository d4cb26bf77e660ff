//! Hierarchical line parser.
//!
//! Turns the indentation-delimited text printed by `system_profiler` into flat
//! [`Record`]s. Only two heading levels are tracked: a zero-indent section and a
//! four-space subsection. Every line containing `": "` that is not a heading
//! becomes one record attributed to the headings in effect at that point.

pub mod line;

use std::io::BufRead;

use thiserror::Error;

use crate::classify::Classifier;
use crate::models::record::Record;

pub use line::{classify_line, indent_width, LineKind};

/// The line source failed before the report was fully consumed.
///
/// Carries every record produced up to the failing line.
#[derive(Error, Debug)]
#[error("report read failed after {} records: {source}", .records.len())]
pub struct ReadError {
    records: Vec<Record>,
    source: std::io::Error,
}

impl ReadError {
    #[must_use]
    pub fn new(records: Vec<Record>, source: std::io::Error) -> Self {
        Self { records, source }
    }

    /// Records parsed before the failure.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Record>, std::io::Error) {
        (self.records, self.source)
    }
}

/// Heading context threaded through one parse.
#[derive(Debug, Default)]
struct ParseState {
    section: String,
    subsection: String,
}

impl ParseState {
    fn enter_section(&mut self, name: &str) {
        name.clone_into(&mut self.section);
        self.subsection.clear();
    }

    fn enter_subsection(&mut self, name: &str) {
        name.clone_into(&mut self.subsection);
    }

    /// Apply one line, returning the record it produces, if any.
    fn feed<C: Classifier + ?Sized>(&mut self, raw: &str, table: &C) -> Option<Record> {
        match classify_line(raw) {
            LineKind::Section(name) => {
                self.enter_section(name);
                None
            }
            LineKind::Subsection(name) => {
                self.enter_subsection(name);
                None
            }
            LineKind::Entry { key, value } => Some(Record {
                section: self.section.clone(),
                subsection: self.subsection.clone(),
                key: key.to_string(),
                value: value.to_string(),
                data_type: table
                    .data_type(&self.section)
                    .unwrap_or_default()
                    .to_string(),
            }),
            LineKind::Blank | LineKind::Ignored => None,
        }
    }
}

/// Parse an in-memory report. Never fails: unrecognised lines are dropped.
#[must_use]
pub fn parse_str<C: Classifier + ?Sized>(text: &str, table: &C) -> Vec<Record> {
    let mut state = ParseState::default();
    text.lines()
        .filter_map(|line| state.feed(line, table))
        .collect()
}

/// Parse a report already held in memory. Invalid UTF-8 becomes U+FFFD.
#[must_use]
pub fn parse_bytes<C: Classifier + ?Sized>(bytes: &[u8], table: &C) -> Vec<Record> {
    parse_str(&String::from_utf8_lossy(bytes), table)
}

/// Parse a report pulled line by line from `reader`.
///
/// The whole input is consumed before returning. Lines are decoded lossily, so
/// only an I/O failure of the reader stops the parse; the records parsed so far
/// are then returned inside the error.
pub fn parse_reader<R, C>(reader: R, table: &C) -> Result<Vec<Record>, ReadError>
where
    R: BufRead,
    C: Classifier + ?Sized,
{
    let mut state = ParseState::default();
    let mut records = Vec::new();

    for line in reader.split(b'\n') {
        let bytes = match line {
            Ok(b) => b,
            Err(e) => return Err(ReadError::new(records, e)),
        };
        // A trailing '\r' is whitespace to `classify_line`.
        if let Some(record) = state.feed(&String::from_utf8_lossy(&bytes), table) {
            records.push(record);
        }
    }

    Ok(records)
}
