//! Emitters for the stage, scenario and manifest files of an SMPS bundle.
//!
//! Each file is rendered to a `String` first and then written atomically.
//! A class that lacks the requested rule still produces a syntactically
//! complete file (header and terminator, empty body) and reports
//! [`GenerationOutcome::NotImplemented`].

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};

use super::write_file;
use crate::errors::{Error, Result, ResultExt};
use crate::model::{Model, Period};
use crate::synth::{self, PerturbationKind, ProblemClass};

const TERMINATOR: &str = "ENDATA";

/// What an emitter produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Body written; `entries` counts stage lines or perturbation lines
    Written { entries: usize },
    /// The class has no rule for the request; only header and terminator written
    NotImplemented { reason: String },
}

impl GenerationOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Stage file text for `periods`.
pub fn stage_file_text(periods: &[Period]) -> String {
    let mut text = String::from("TIME\nPERIODS   LP\n");
    for period in periods {
        let _ = writeln!(
            text,
            "     {}     {}     {}",
            period.first_variable, period.first_constraint, period.label
        );
    }
    text.push_str(TERMINATOR);
    text.push('\n');
    text
}

/// Scenario file text wrapping a synthesized scenario block.
pub fn scenario_file_text(block: &str) -> String {
    let mut text = String::from("STOCH\nSCENARIOS     DISCRETE\n");
    text.push_str(block);
    text.push_str(TERMINATOR);
    text.push('\n');
    text
}

/// Manifest listing the core, stage and scenario files, one per line.
pub fn manifest_text(core: &Path, stage: &Path, scenario: &Path) -> String {
    format!(
        "{}\n{}\n{}\n",
        core.display(),
        stage.display(),
        scenario.display()
    )
}

/// Manifest path for a scenario file: the file name up to its first `.`,
/// plus `.smps`, in the same directory.
pub fn manifest_path_for(scenario: &Path) -> PathBuf {
    let name = scenario
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();
    scenario.with_file_name(format!("{}.smps", stem))
}

/// Write the stage file for `model`, discovering boundaries with `class`'s rule.
pub fn write_stage_file(class: ProblemClass, model: &Model, out: &Path) -> Result<GenerationOutcome> {
    let _span = info_span!("write_stage_file", %class, path = %out.display()).entered();

    let discovered = class
        .stage_rule()
        .ok_or(Error::UnsupportedStageDiscovery { class })
        .and_then(|rule| {
            synth::discover_stages(model, &rule)
                .context(format!("Stage discovery for the {} class", class))
        });

    let (periods, outcome) = match discovered {
        Ok(periods) => {
            let outcome = GenerationOutcome::Written {
                entries: periods.len(),
            };
            (periods, outcome)
        }
        Err(e) if e.is_not_implemented() => {
            warn!("{}", e);
            (Vec::new(), GenerationOutcome::NotImplemented { reason: e.to_string() })
        }
        Err(e) => return Err(e),
    };

    write_file(out, &stage_file_text(&periods))?;
    info!(stages = periods.len(), "stage file written");
    Ok(outcome)
}

/// Write the scenario file for `model`.
///
/// The random stream is seeded from `scenario_count`, so repeating a call
/// with the same arguments reproduces the file byte for byte.
pub fn write_scenario_file(
    class: ProblemClass,
    model: &Model,
    scenario_count: usize,
    kind: PerturbationKind,
    out: &Path,
) -> Result<GenerationOutcome> {
    let _span = info_span!("write_scenario_file", path = %out.display()).entered();

    let (body, outcome) = match synth::synthesize(class, model, scenario_count, kind) {
        Ok(block) => {
            let outcome = GenerationOutcome::Written {
                entries: block.perturbations,
            };
            (block.text, outcome)
        }
        Err(e) if e.is_not_implemented() => {
            warn!("{}", e);
            (String::new(), GenerationOutcome::NotImplemented { reason: e.to_string() })
        }
        Err(e) => return Err(e),
    };

    write_file(out, &scenario_file_text(&body))?;
    info!(?outcome, "scenario file written");
    Ok(outcome)
}

/// Write the manifest naming the three bundle files.
pub fn write_manifest(core: &Path, stage: &Path, scenario: &Path, out: &Path) -> Result<()> {
    write_file(out, &manifest_text(core, stage, scenario))
}
