//! Optional `.smpsgen.toml` configuration.
//!
//! The file is looked up in the working directory and its ancestors. A
//! missing file means defaults; an unreadable or invalid one is logged and
//! also means defaults.

mod core;
mod loader;

pub use self::core::{GenerationConfig, OutputConfig, SmpsgenConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from, parse_config,
};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".smpsgen.toml";

/// Contents written by `smpsgen init`
pub const DEFAULT_CONFIG: &str = r#"# smpsgen configuration

[generation]
# Perturbation kind used when --perturbation is not given: rhs, coef or obj
perturbation = "rhs"

[output]
# Directory for generated .tim/.sto/.smps files (default: next to the instance)
# directory = "generated"
"#;
