use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::synth::PerturbationKind;

/// Root configuration structure for smpsgen
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SmpsgenConfig {
    /// Scenario generation defaults
    #[serde(default)]
    pub generation: Option<GenerationConfig>,

    /// Output placement
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationConfig {
    /// Perturbation kind used when the command line names none
    #[serde(default)]
    pub perturbation: PerturbationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Directory for generated files; next to the instance when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl SmpsgenConfig {
    pub fn default_perturbation(&self) -> PerturbationKind {
        self.generation
            .as_ref()
            .map(|generation| generation.perturbation)
            .unwrap_or_default()
    }

    pub fn output_directory(&self) -> Option<&Path> {
        self.output
            .as_ref()
            .and_then(|output| output.directory.as_deref())
    }
}
