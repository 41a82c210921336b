//! Section tracking for fixed-format MPS/SMPS text.
//!
//! A line that starts in column one is a section header (or a section we do
//! not consume); a line that starts with whitespace is data for whichever
//! section is active.

/// Section keywords, tested in this order. The first prefix match wins.
const KEYWORDS: [(&str, Section); 4] = [
    ("ROWS", Section::Rows),
    ("COLUMNS", Section::Columns),
    ("RHS", Section::Rhs),
    ("PERIODS", Section::Periods),
];

/// The section a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    /// Outside any consumed section
    #[default]
    None,
    Rows,
    Columns,
    Rhs,
    Periods,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "unsectioned"),
            Self::Rows => write!(f, "ROWS"),
            Self::Columns => write!(f, "COLUMNS"),
            Self::Rhs => write!(f, "RHS"),
            Self::Periods => write!(f, "PERIODS"),
        }
    }
}

/// Whether the line carries data for the active section.
pub fn is_data_line(line: &str) -> bool {
    line.starts_with(char::is_whitespace)
}

/// Section active after `line`, given the section active before it.
///
/// Data lines leave the section untouched. Any other line closes the active
/// section and opens the first keyword it starts with, if any.
pub fn classify(line: &str, previous: Section) -> Section {
    if is_data_line(line) {
        return previous;
    }

    KEYWORDS
        .iter()
        .find(|(keyword, _)| line.starts_with(keyword))
        .map(|(_, section)| *section)
        .unwrap_or(Section::None)
}
