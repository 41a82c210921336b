//! Section-aware readers for the core (`.cor`) and stage (`.tim`) files.
//!
//! Both readers share one line loop: [`section::classify`] tracks the active
//! section and every whitespace-led line is handed, already split into
//! fields, to a per-file handler.

pub mod core_file;
pub mod section;
pub mod stage_file;

pub use core_file::{parse_core_file, read_core_file};
pub use section::{classify, is_data_line, Section};
pub use stage_file::{parse_stage_file, read_stage_file};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::{Error, Result};

/// One whitespace-led line inside a section.
#[derive(Debug)]
pub(crate) struct DataLine<'a> {
    pub origin: &'a Path,
    pub line_number: usize,
    pub section: Section,
    pub fields: Vec<&'a str>,
}

impl<'a> DataLine<'a> {
    /// Field `index`, or a malformed-line error naming how many were needed.
    pub fn field(&self, index: usize) -> Result<&'a str> {
        self.fields.get(index).copied().ok_or_else(|| {
            Error::malformed(
                self.origin,
                self.line_number,
                self.section,
                format!(
                    "expected at least {} fields, found {}",
                    index + 1,
                    self.fields.len()
                ),
            )
        })
    }

    /// Field `index` parsed as a number.
    pub fn number(&self, index: usize) -> Result<f64> {
        let raw = self.field(index)?;
        raw.parse::<f64>().map_err(|_| {
            Error::malformed(
                self.origin,
                self.line_number,
                self.section,
                format!("'{}' is not a number", raw),
            )
        })
    }

    /// Whether the optional second name/value pair (fields 4 and 5) is present.
    ///
    /// Exactly four fields is a dangling name without a value.
    pub fn has_second_pair(&self) -> Result<bool> {
        match self.fields.len() {
            4 => Err(Error::malformed(
                self.origin,
                self.line_number,
                self.section,
                "second entry has a name but no value",
            )),
            n => Ok(n >= 5),
        }
    }
}

pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::io(path, e))
}

/// Runs `handler` on every data line of `reader`, tracking sections.
///
/// Lines in [`Section::None`] are skipped; the handler decides which of the
/// remaining sections it consumes.
pub(crate) fn scan_sections<R, F>(reader: R, origin: &Path, mut handler: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&DataLine<'_>) -> Result<()>,
{
    let mut section = Section::None;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(origin, e))?;
        section = classify(&line, section);

        if section == Section::None || !is_data_line(&line) {
            continue;
        }

        let data = DataLine {
            origin,
            line_number: index + 1,
            section,
            fields: line.split_whitespace().collect(),
        };
        handler(&data)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_scan_skips_headers_and_unknown_sections() {
        let text = "NAME test\nROWS\n N obj\nBOUNDS\n UP BND x 4\nRHS\n RHS c1 2\n";
        let mut seen = Vec::new();
        scan_sections(Cursor::new(text), Path::new("t.cor"), |line| {
            seen.push((line.section, line.line_number, line.fields.join(" ")));
            Ok(())
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (Section::Rows, 3, "N obj".to_string()),
                (Section::Rhs, 7, "RHS c1 2".to_string()),
            ]
        );
    }

    #[test]
    fn test_number_reports_line() {
        let line = DataLine {
            origin: Path::new("t.cor"),
            line_number: 9,
            section: Section::Columns,
            fields: vec!["x", "c1", "abc"],
        };
        let err = line.number(2).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedLine { line_number: 9, section: Section::Columns, .. }
        ));
        assert!(line.field(3).is_err());
    }
}
