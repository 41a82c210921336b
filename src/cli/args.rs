use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smpsgen")]
#[command(about = "Generate stochastic SMPS instances from deterministic core models", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use instead of searching for .smpsgen.toml
    #[arg(long, global = true, env = "SMPSGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a scenario (.sto) file and SMPS manifest for an instance
    Generate {
        /// Instance class (rrtailassign, tailassign, sslp, noswot, snip)
        class: String,

        /// Instance name without extension; <INSTANCE>.cor and <INSTANCE>.tim must exist
        instance: String,

        /// Number of scenarios to generate
        #[arg(allow_negative_numbers = true)]
        scenarios: i64,

        /// What to randomise: rhs, coef or obj (default from config, else rhs)
        #[arg(short, long)]
        perturbation: Option<String>,

        /// Directory for the generated files
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Write the stage (.tim) file for an instance's core file
    Stages {
        /// Instance class (rrtailassign, tailassign, sslp, noswot, snip)
        class: String,

        /// Instance name without extension; <INSTANCE>.cor must exist
        instance: String,

        /// Directory for the generated stage file
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Create a default .smpsgen.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
