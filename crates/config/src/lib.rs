//! Loading of `.openapilintrc` configuration files

mod config;
mod loader;

pub use config::{DocumentsConfig, LintrcConfig};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config in {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid document pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
