//! An SMPS instance: the three bundle paths, its problem class, and the
//! model parsed from them.

use std::path::{Path, PathBuf};

use crate::errors::{Error, FileRole, Result};
use crate::io::{self, GenerationOutcome};
use crate::model::Model;
use crate::parser;
use crate::synth::{PerturbationKind, ProblemClass};

/// Parse a core file and its stage file into one model.
pub fn build_model(core: &Path, stage: &Path) -> Result<Model> {
    let mut model = Model::new();
    parser::read_core_file(&mut model, core)?;
    parser::read_stage_file(&mut model, stage)?;
    Ok(model)
}

/// File names derived from an instance base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancePaths {
    pub core: PathBuf,
    pub stage: PathBuf,
    pub scenario: Option<PathBuf>,
}

impl InstancePaths {
    /// `<name>.cor`, `<name>.tim` and, given a count, `<name>_<count>.sto`.
    ///
    /// Generated files (the scenario file, and the stage file when
    /// `output_dir` is set) are placed in `output_dir` instead of next to
    /// the instance.
    pub fn for_instance(name: &str, scenario_count: Option<usize>, output_dir: Option<&Path>) -> Self {
        let generated = |file: String| match output_dir {
            Some(dir) => dir.join(Path::new(&file).file_name().unwrap_or_default()),
            None => PathBuf::from(file),
        };

        Self {
            core: PathBuf::from(format!("{}.cor", name)),
            stage: PathBuf::from(format!("{}.tim", name)),
            scenario: scenario_count.map(|count| generated(format!("{}_{}.sto", name, count))),
        }
    }

    /// Stage file location when the stage file is being generated.
    pub fn generated_stage(&self, output_dir: Option<&Path>) -> PathBuf {
        match (output_dir, self.stage.file_name()) {
            (Some(dir), Some(file)) => dir.join(file),
            _ => self.stage.clone(),
        }
    }
}

/// Which bundle files [`Instance::read`] should parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    pub core: bool,
    pub stage: bool,
}

/// One instance of a problem class and its bundle files.
#[derive(Debug, Clone)]
pub struct Instance {
    class: ProblemClass,
    core_file: Option<PathBuf>,
    stage_file: Option<PathBuf>,
    scenario_file: Option<PathBuf>,
    model: Model,
}

impl Instance {
    pub fn new(
        class: ProblemClass,
        core_file: Option<PathBuf>,
        stage_file: Option<PathBuf>,
        scenario_file: Option<PathBuf>,
    ) -> Self {
        Self {
            class,
            core_file,
            stage_file,
            scenario_file,
            model: Model::new(),
        }
    }

    pub fn from_paths(class: ProblemClass, paths: InstancePaths) -> Self {
        Self::new(class, Some(paths.core), Some(paths.stage), paths.scenario)
    }

    pub fn class(&self) -> ProblemClass {
        self.class
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn core_file(&self) -> Result<&Path> {
        required(&self.core_file, FileRole::Core)
    }

    pub fn stage_file(&self) -> Result<&Path> {
        required(&self.stage_file, FileRole::Stage)
    }

    pub fn scenario_file(&self) -> Result<&Path> {
        required(&self.scenario_file, FileRole::Scenario)
    }

    /// Parse the selected files into the instance's model.
    pub fn read(&mut self, options: ReadOptions) -> Result<()> {
        if options.core {
            self.read_core_file()?;
        }
        if options.stage {
            self.read_stage_file()?;
        }
        Ok(())
    }

    pub fn read_core_file(&mut self) -> Result<()> {
        let path = required(&self.core_file, FileRole::Core)?.to_path_buf();
        parser::read_core_file(&mut self.model, &path)
    }

    pub fn read_stage_file(&mut self) -> Result<()> {
        let path = required(&self.stage_file, FileRole::Stage)?.to_path_buf();
        parser::read_stage_file(&mut self.model, &path)
    }

    /// Write the stage file discovered from the core model.
    pub fn write_stage_file(&self) -> Result<GenerationOutcome> {
        io::write_stage_file(self.class, &self.model, self.stage_file()?)
    }

    /// Write `scenario_count` scenarios randomising `kind`.
    pub fn write_scenario_file(
        &self,
        scenario_count: usize,
        kind: PerturbationKind,
    ) -> Result<GenerationOutcome> {
        io::write_scenario_file(
            self.class,
            &self.model,
            scenario_count,
            kind,
            self.scenario_file()?,
        )
    }

    /// Write the manifest next to the scenario file and return its path.
    pub fn write_manifest(&self) -> Result<PathBuf> {
        let scenario = self.scenario_file()?;
        let out = io::manifest_path_for(scenario);
        io::write_manifest(self.core_file()?, self.stage_file()?, scenario, &out)?;
        Ok(out)
    }
}

fn required(path: &Option<PathBuf>, role: FileRole) -> Result<&Path> {
    path.as_deref().ok_or(Error::MissingFile { role })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_for_instance() {
        let paths = InstancePaths::for_instance("data/sslp_5_25", Some(50), None);
        assert_eq!(paths.core, PathBuf::from("data/sslp_5_25.cor"));
        assert_eq!(paths.stage, PathBuf::from("data/sslp_5_25.tim"));
        assert_eq!(paths.scenario, Some(PathBuf::from("data/sslp_5_25_50.sto")));
    }

    #[test]
    fn test_paths_honour_output_dir() {
        let out = Path::new("generated");
        let paths = InstancePaths::for_instance("data/noswot", Some(3), Some(out));
        assert_eq!(paths.core, PathBuf::from("data/noswot.cor"));
        assert_eq!(paths.scenario, Some(PathBuf::from("generated/noswot_3.sto")));
        assert_eq!(
            paths.generated_stage(Some(out)),
            PathBuf::from("generated/noswot.tim")
        );
        assert_eq!(paths.generated_stage(None), PathBuf::from("data/noswot.tim"));
    }

    #[test]
    fn test_unset_paths_are_missing_files() {
        let mut instance = Instance::new(ProblemClass::Sslp, None, None, None);
        assert!(matches!(
            instance.read_core_file(),
            Err(Error::MissingFile { role: FileRole::Core })
        ));
        assert!(matches!(
            instance.read(ReadOptions { core: false, stage: true }),
            Err(Error::MissingFile { role: FileRole::Stage })
        ));
        assert!(matches!(
            instance.write_scenario_file(2, PerturbationKind::Rhs),
            Err(Error::MissingFile { role: FileRole::Scenario })
        ));
    }

    #[test]
    fn test_read_nothing_is_noop() {
        let mut instance = Instance::new(ProblemClass::Snip, None, None, None);
        instance.read(ReadOptions::default()).unwrap();
        assert!(instance.model().variables().is_empty());
    }
}
