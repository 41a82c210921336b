//! Reader for the ROWS, COLUMNS and RHS sections of a core file.

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info_span};

use super::{open, scan_sections, DataLine, Section};
use crate::errors::{Error, Result};
use crate::model::Model;

/// Row type of objective (free) rows.
const OBJECTIVE_ROW_TYPE: &str = "N";

/// Token that opens/closes integer blocks in the COLUMNS section.
const MARKER: &str = "MARKER";

/// Parse a core file into a fresh [`Model`].
pub fn parse_core_file(path: &Path) -> Result<Model> {
    let mut model = Model::new();
    read_core_file(&mut model, path)?;
    Ok(model)
}

/// Read a core file into `model`.
pub fn read_core_file(model: &mut Model, path: &Path) -> Result<()> {
    let _span = info_span!("read_core_file", path = %path.display()).entered();
    read_core(model, open(path)?, path)
}

/// Read core-file text from any buffered source. `origin` only labels errors.
pub fn read_core<R: BufRead>(model: &mut Model, reader: R, origin: &Path) -> Result<()> {
    scan_sections(reader, origin, |line| match line.section {
        Section::Rows => store_row(model, line),
        Section::Columns => store_column(model, line),
        Section::Rhs => store_rhs(model, line),
        Section::Periods | Section::None => Ok(()),
    })?;

    debug!(
        constraints = model.constraints().len(),
        variables = model.variables().len(),
        coefficients = model.coefficient_count(),
        "core file read"
    );
    Ok(())
}

fn store_row(model: &mut Model, line: &DataLine<'_>) -> Result<()> {
    let row_type = line.field(0)?;
    let name = line.field(1)?;

    if row_type == OBJECTIVE_ROW_TYPE {
        model.push_objective_row(name);
    } else {
        model.push_constraint(name);
    }
    Ok(())
}

fn is_marker(line: &DataLine<'_>) -> bool {
    line.fields
        .iter()
        .any(|field| field.trim_matches('\'') == MARKER)
}

fn store_column(model: &mut Model, line: &DataLine<'_>) -> Result<()> {
    if is_marker(line) {
        return Ok(());
    }

    let variable = line.field(0)?;
    let row = line.field(1)?;
    let value = line.number(2)?;
    let second = if line.has_second_pair()? {
        Some((line.field(3)?, line.number(4)?))
    } else {
        None
    };

    model.push_variable(variable);
    model.set_coefficient(variable, row, value);
    if let Some((row, value)) = second {
        model.set_coefficient(variable, row, value);
    }
    Ok(())
}

fn store_rhs(model: &mut Model, line: &DataLine<'_>) -> Result<()> {
    set_rhs(model, line, line.field(1)?, line.number(2)?)?;
    if line.has_second_pair()? {
        set_rhs(model, line, line.field(3)?, line.number(4)?)?;
    }
    Ok(())
}

fn set_rhs(model: &mut Model, line: &DataLine<'_>, row: &str, value: f64) -> Result<()> {
    if model.set_rhs(row, value) {
        Ok(())
    } else {
        Err(Error::UndeclaredRow {
            path: line.origin.to_path_buf(),
            line_number: line.line_number,
            row: row.to_string(),
        })
    }
}
