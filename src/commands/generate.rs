use crate::config::SmpsgenConfig;
use crate::instance::{Instance, InstancePaths, ReadOptions};
use crate::io::{self, GenerationOutcome};
use crate::validation::{validate_inputs, InputRequest};
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

pub struct GenerateConfig {
    pub class: String,
    pub instance: String,
    pub scenarios: i64,
    pub perturbation: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub config: SmpsgenConfig,
}

/// Read `<instance>.cor` and `<instance>.tim`, then write the scenario file
/// and the manifest.
pub fn handle_generate(config: GenerateConfig) -> Result<()> {
    let valid = validate_inputs(&InputRequest {
        class: &config.class,
        instance: &config.instance,
        extensions: &["cor", "tim"],
        scenario_count: Some(config.scenarios),
        perturbation: config.perturbation.as_deref(),
    })?;

    let kind = valid
        .perturbation
        .unwrap_or_else(|| config.config.default_perturbation());
    let scenario_count = valid
        .scenario_count
        .context("scenario count was validated but not returned")?;
    let output_dir = config
        .output_dir
        .as_deref()
        .or_else(|| config.config.output_directory());
    if let Some(dir) = output_dir {
        io::ensure_dir(dir)?;
    }

    let paths = InstancePaths::for_instance(&config.instance, Some(scenario_count), output_dir);
    let mut instance = Instance::from_paths(valid.class, paths);
    instance
        .read(ReadOptions {
            core: true,
            stage: true,
        })
        .with_context(|| format!("Failed to read instance {}", config.instance))?;

    let outcome = instance
        .write_scenario_file(scenario_count, kind)
        .context("Failed to write scenario file")?;
    let manifest = instance
        .write_manifest()
        .context("Failed to write SMPS manifest")?;

    report(&outcome, &instance.scenario_file()?.display().to_string());
    println!("{} {}", "Wrote".green(), manifest.display());
    Ok(())
}

pub(crate) fn report(outcome: &GenerationOutcome, path: &str) {
    match outcome {
        GenerationOutcome::Written { entries } => {
            println!("{} {} ({} entries)", "Wrote".green(), path, entries)
        }
        GenerationOutcome::NotImplemented { reason } => {
            println!("{} {}", "Not implemented:".yellow(), reason);
            println!("{} {} (header only)", "Wrote".green(), path);
        }
    }
}
