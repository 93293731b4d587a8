use anyhow::{Context, Result};
use colored::Colorize;
use openapi_lint_config::LintrcConfig;
use openapi_linter::{JsonSchemaCheck, LintConfig, Linter};
use std::path::{Path, PathBuf};

use crate::ExitCode;

/// Configuration shared by commands: the loaded rc file and where it lives
pub struct CommandContext {
    pub config: LintrcConfig,
    /// Directory holding the config file (or the working directory without one)
    pub base_dir: PathBuf,
}

impl CommandContext {
    /// Load the config from `config_path`, or discover it from the working directory.
    ///
    /// Running without any config file is allowed and uses the defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read the working directory")?;

        let config_path = match config_path {
            Some(path) => Some(path),
            None => openapi_lint_config::find_config(&cwd)?,
        };

        let Some(config_path) = config_path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self {
                config: LintrcConfig::default(),
                base_dir: cwd,
            });
        };

        let config = openapi_lint_config::load_config(&config_path).unwrap_or_else(|e| {
            eprintln!("{} {}", "✗ Error loading config:".red(), e);
            ExitCode::ConfigError.exit();
        });
        let base_dir = config_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or(cwd, Path::to_path_buf);

        Ok(Self { config, base_dir })
    }

    /// Lint rule configuration, exiting with a config error if it is invalid
    pub fn lint_config(&self) -> LintConfig {
        LintConfig::from_value(self.config.lint()).unwrap_or_else(|message| {
            eprintln!("{} {}", "✗ Invalid lint configuration:".red(), message);
            ExitCode::ConfigError.exit();
        })
    }

    /// Build the linter, attaching the schema pre-check unless it is skipped
    pub fn linter(&self, schema: Option<PathBuf>, skip_schema_check: bool) -> Linter {
        let linter = Linter::new(self.lint_config());
        if skip_schema_check || self.config.skip_schema_check {
            tracing::debug!("Schema pre-check disabled");
            return linter;
        }

        let schema_path = schema.or_else(|| self.config.schema_path(&self.base_dir));
        let check = match schema_path {
            Some(path) => JsonSchemaCheck::from_path(&path),
            None => JsonSchemaCheck::bundled(),
        }
        .unwrap_or_else(|e| {
            eprintln!("{} {}", "✗ Failed to load schema:".red(), e);
            ExitCode::ConfigError.exit();
        });
        linter.with_schema_check(check)
    }
}
