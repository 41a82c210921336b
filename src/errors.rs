//! Error types for SMPS instance generation.
//!
//! Every fallible library operation returns [`Result`], whose error type is
//! the single [`Error`] enum below. Each variant carries a stable code so the
//! command-line front end (and scripts wrapping it) can match on failures
//! without parsing messages.
//!
//! # Error Codes
//!
//! - E001-E009: missing inputs and I/O
//! - E010-E019: core/stage file parsing
//! - E020-E029: model structure
//! - E030-E039: scenario synthesis
//! - E040-E049: names, configuration and validation

use std::path::PathBuf;
use thiserror::Error;

use crate::parser::Section;

/// The role a file plays in an SMPS bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// Deterministic core model (`.cor`)
    Core,
    /// Time-stage partition (`.tim`)
    Stage,
    /// Discrete scenarios (`.sto`)
    Scenario,
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Stage => write!(f, "stage"),
            Self::Scenario => write!(f, "scenario"),
        }
    }
}

/// Main error type for smpsgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// A required path was never supplied
    #[error("No {role} file path was set")]
    MissingFile { role: FileRole },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A section line could not be split into the expected fields
    #[error("Malformed {section} line {line_number} in {}: {reason}", path.display())]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        section: Section,
        reason: String,
    },

    /// An RHS entry refers to a row the row section never declared
    #[error("Line {line_number} in {} sets the right-hand side of undeclared row '{row}'", path.display())]
    UndeclaredRow {
        path: PathBuf,
        line_number: usize,
        row: String,
    },

    /// Scenario synthesis needs a second period in the stage file
    #[error("The stage file declares fewer than two periods")]
    MissingSecondStage,

    /// Stage discovery ran on a model with no rows or no columns
    #[error("The core model has no constraints or no variables")]
    EmptyModel,

    /// Constraint and variable stage discovery disagree
    #[error("Found {constraints} constraint stages but {variables} variable stages")]
    StageBoundaryMismatch { constraints: usize, variables: usize },

    /// The problem class has no rule for the requested perturbation
    #[error("The {kind} perturbation is not implemented for the {class} class")]
    UnsupportedPerturbation {
        class: crate::synth::ProblemClass,
        kind: crate::synth::PerturbationKind,
    },

    /// The problem class has no stage-boundary rule
    #[error("Stage discovery is not implemented for the {class} class")]
    UnsupportedStageDiscovery { class: crate::synth::ProblemClass },

    /// A probability outside [0, 1]
    #[error("Probability must lie in [0, 1] (got {probability})")]
    InvalidProbability { probability: f64 },

    /// A distribution mean the sampler cannot use
    #[error("Distribution mean must be positive and finite (got {mean})")]
    InvalidMean { mean: f64 },

    /// Unrecognised problem class name
    #[error("Instance class <{name}> is invalid. Available instance classes ({available})")]
    UnknownProblemClass { name: String, available: String },

    /// Unrecognised perturbation kind name
    #[error("Stochasticity type <{name}> is invalid. Available stochasticity types ({available})")]
    UnknownPerturbationKind { name: String, available: String },

    /// Configuration file errors
    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// One or more input checks failed
    #[error("Invalid inputs:\n  {}", errors.join("\n  "))]
    Validation { errors: Vec<String> },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl Error {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-line error
    pub fn malformed(
        path: impl Into<PathBuf>,
        line_number: usize,
        section: Section,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedLine {
            path: path.into(),
            line_number,
            section,
            reason: reason.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::MalformedLine { .. } => "E010",
            Self::UndeclaredRow { .. } => "E011",
            Self::MissingSecondStage => "E020",
            Self::EmptyModel => "E021",
            Self::StageBoundaryMismatch { .. } => "E022",
            Self::UnsupportedPerturbation { .. } => "E030",
            Self::UnsupportedStageDiscovery { .. } => "E031",
            Self::InvalidProbability { .. } => "E032",
            Self::InvalidMean { .. } => "E033",
            Self::UnknownProblemClass { .. } => "E040",
            Self::UnknownPerturbationKind { .. } => "E041",
            Self::Config { .. } => "E042",
            Self::Validation { .. } => "E043",
            Self::WithContext { .. } => "E049",
        }
    }

    /// True for the failures that degrade to a "not implemented" output
    /// instead of aborting the run.
    pub fn is_not_implemented(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPerturbation { .. } | Self::UnsupportedStageDiscovery { .. }
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
