pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use core::{formatter::ScanResponse, scanner::ScanEngine};
pub use server::{build_app, engine_from_config, run_with_config};
pub use utils::error::{Result, TrustError};
