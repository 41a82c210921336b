//! Generate stochastic SMPS instances from deterministic MPS core models.
//!
//! An SMPS bundle is a core file (`.cor`), a time-stage file (`.tim`), a
//! scenario file (`.sto`) and a manifest (`.smps`) naming the other three.
//! This crate parses the core and stage files into a [`Model`], synthesizes
//! randomised second-stage scenarios for a [`ProblemClass`], and writes the
//! remaining files back out in fixed format.
//!
//! ```no_run
//! use smpsgen::{build_model, write_scenario_file, PerturbationKind, ProblemClass};
//! use std::path::Path;
//!
//! let model = build_model(Path::new("sslp.cor"), Path::new("sslp.tim"))?;
//! write_scenario_file(
//!     ProblemClass::Sslp,
//!     &model,
//!     50,
//!     PerturbationKind::Rhs,
//!     Path::new("sslp_50.sto"),
//! )?;
//! # Ok::<(), smpsgen::Error>(())
//! ```

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod instance;
pub mod io;
pub mod model;
pub mod parser;
pub mod synth;
pub mod validation;

// Re-export commonly used types
pub use crate::errors::{Error, FileRole, Result};
pub use crate::instance::{build_model, Instance, InstancePaths, ReadOptions};
pub use crate::io::{
    manifest_path_for, write_manifest, write_scenario_file, write_stage_file, GenerationOutcome,
};
pub use crate::model::{Model, Period};
pub use crate::parser::{parse_core_file, parse_stage_file, Section};
pub use crate::synth::{
    synthesize, synthesize_with, CoefficientRule, ObjectiveRule, Perturbation, PerturbationKind,
    ProblemClass, RhsRule, ScenarioBlock,
};
