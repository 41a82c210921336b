use crate::config::SmpsgenConfig;
use crate::instance::{Instance, InstancePaths, ReadOptions};
use crate::io;
use crate::validation::{validate_inputs, InputRequest};
use anyhow::{Context, Result};
use std::path::PathBuf;

use super::generate::report;

pub struct StagesConfig {
    pub class: String,
    pub instance: String,
    pub output_dir: Option<PathBuf>,
    pub config: SmpsgenConfig,
}

/// Read `<instance>.cor` and write the stage file discovered from it.
pub fn handle_stages(config: StagesConfig) -> Result<()> {
    let valid = validate_inputs(&InputRequest {
        class: &config.class,
        instance: &config.instance,
        extensions: &["cor"],
        ..Default::default()
    })?;

    let output_dir = config
        .output_dir
        .as_deref()
        .or_else(|| config.config.output_directory());
    if let Some(dir) = output_dir {
        io::ensure_dir(dir)?;
    }

    let paths = InstancePaths::for_instance(&config.instance, None, None);
    let stage_out = paths.generated_stage(output_dir);
    let mut instance = Instance::new(valid.class, Some(paths.core), Some(stage_out), None);
    instance
        .read(ReadOptions {
            core: true,
            stage: false,
        })
        .with_context(|| format!("Failed to read instance {}", config.instance))?;

    let outcome = instance
        .write_stage_file()
        .context("Failed to write stage file")?;
    report(&outcome, &instance.stage_file()?.display().to_string());
    Ok(())
}
