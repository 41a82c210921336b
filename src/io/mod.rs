pub mod format;
pub mod writers;

pub use format::format_g;
pub use writers::{
    manifest_path_for, manifest_text, scenario_file_text, stage_file_text, write_manifest,
    write_scenario_file, write_stage_file, GenerationOutcome,
};

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::{Error, Result};

/// Write `content` to `path` atomically.
///
/// The content goes to a temporary file in the destination directory, which
/// is then renamed over `path`; a failed run never leaves a truncated file.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    if let Err(e) = tmp.write_all(content.as_bytes()).and_then(|()| tmp.flush()) {
        return Err(Error::io(tmp.path(), e));
    }
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
