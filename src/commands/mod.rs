pub mod generate;
pub mod init;
pub mod stages;

pub use generate::{handle_generate, GenerateConfig};
pub use init::init_config;
pub use stages::{handle_stages, StagesConfig};
