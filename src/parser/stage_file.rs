//! Reader for the PERIODS section of a stage (time) file.

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info_span};

use super::{open, scan_sections, Section};
use crate::errors::Result;
use crate::model::{Model, Period};

/// Parse the period markers of a stage file, in file order.
pub fn parse_stage_file(path: &Path) -> Result<Vec<Period>> {
    let mut model = Model::new();
    read_stage_file(&mut model, path)?;
    Ok(model.periods().to_vec())
}

/// Read a stage file's periods into `model`.
pub fn read_stage_file(model: &mut Model, path: &Path) -> Result<()> {
    let _span = info_span!("read_stage_file", path = %path.display()).entered();
    read_stages(model, open(path)?, path)
}

/// Read stage-file text from any buffered source. `origin` only labels errors.
pub fn read_stages<R: BufRead>(model: &mut Model, reader: R, origin: &Path) -> Result<()> {
    scan_sections(reader, origin, |line| {
        if line.section != Section::Periods {
            return Ok(());
        }
        // <first variable> <first constraint> <label>
        let period = Period::new(line.field(2)?, line.field(0)?, line.field(1)?);
        model.push_period(period);
        Ok(())
    })?;

    debug!(periods = model.periods().len(), "stage file read");
    Ok(())
}
