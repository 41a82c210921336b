use anyhow::Result;
use smpsgen::cli::Commands;
use smpsgen::commands::{GenerateConfig, StagesConfig};
use smpsgen::config::{self, SmpsgenConfig};
use std::path::Path;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = smpsgen::cli::parse_args();
    smpsgen::cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            class,
            instance,
            scenarios,
            perturbation,
            output_dir,
        } => smpsgen::commands::handle_generate(GenerateConfig {
            class,
            instance,
            scenarios,
            perturbation,
            output_dir,
            config: load_config(cli.config.as_deref())?,
        }),
        Commands::Stages {
            class,
            instance,
            output_dir,
        } => smpsgen::commands::handle_stages(StagesConfig {
            class,
            instance,
            output_dir,
            config: load_config(cli.config.as_deref())?,
        }),
        Commands::Init { force } => smpsgen::commands::init_config(force),
    }
}

// An explicit --config must load; otherwise search, falling back to defaults
fn load_config(explicit: Option<&Path>) -> Result<SmpsgenConfig> {
    match explicit {
        Some(path) => Ok(config::load_config_file(path)?),
        None => Ok(config::load_config()),
    }
}
