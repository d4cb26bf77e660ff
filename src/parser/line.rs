//! Single-line classification.
//!
//! A line is judged only by its leading whitespace and its trimmed text, so the
//! decision for one line never depends on its neighbours.

/// Separator between a key and its value.
pub const ENTRY_SEPARATOR: &str = ": ";

/// Leading whitespace of a subsection heading.
pub const SUBSECTION_INDENT: usize = 4;

/// What a single report line contributes to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// Zero-indent heading; carries the name without its trailing colon.
    Section(&'a str),
    /// Heading indented by exactly [`SUBSECTION_INDENT`].
    Subsection(&'a str),
    /// Leaf entry split at the first [`ENTRY_SEPARATOR`].
    Entry { key: &'a str, value: &'a str },
    /// Anything else: deeper headings, free text.
    Ignored,
}

/// Number of leading whitespace characters.
#[must_use]
pub fn indent_width(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

/// Classify one raw line (without its line terminator).
///
/// Headings win over entries: `"Foo: Bar:"` at indent 0 is a section named
/// `"Foo: Bar"`. A four-space line only becomes a subsection when it also ends
/// with a colon; otherwise it is checked as an entry like any other line.
#[must_use]
pub fn classify_line(raw: &str) -> LineKind<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if let Some(name) = trimmed.strip_suffix(':') {
        match indent_width(raw) {
            0 => return LineKind::Section(name),
            SUBSECTION_INDENT => return LineKind::Subsection(name),
            _ => {}
        }
    }

    match trimmed.split_once(ENTRY_SEPARATOR) {
        Some((key, value)) => LineKind::Entry { key, value },
        None => LineKind::Ignored,
    }
}
