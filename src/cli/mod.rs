//! CLI module for smpsgen
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod setup;

pub use args::{parse_args, Cli, Commands};
pub use setup::{init_logging, level_for_verbosity};
