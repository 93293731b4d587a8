mod commands;
mod exit_code;
mod input;

pub use exit_code::ExitCode;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "openapi-lint")]
#[command(about = "Semantic linter for OpenAPI 3.0 documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to .openapilintrc config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except diagnostics and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint OpenAPI documents
    ///
    /// Every document is checked against the OpenAPI schema first, then every
    /// enabled rule runs over it. Documents default to the `documents`
    /// patterns of the config file.
    Lint {
        /// Documents to lint (.json, .yaml or .yml)
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Stop each document at the first failing rule
        #[arg(long)]
        fail_fast: bool,

        /// JSON Schema to check documents against instead of the bundled one
        #[arg(long, value_name = "FILE", conflicts_with = "skip_schema_check")]
        schema: Option<PathBuf>,

        /// Skip the structural schema check
        #[arg(long)]
        skip_schema_check: bool,
    },

    /// List all available lint rules
    Rules {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: ListFormat,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
    /// GitHub Actions workflow commands for PR annotations
    Github,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ListFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    match cli.command {
        Commands::Lint {
            files,
            format,
            fail_fast,
            schema,
            skip_schema_check,
        } => commands::lint::run(
            cli.config,
            commands::lint::LintArgs {
                files,
                format,
                fail_fast,
                schema,
                skip_schema_check,
            },
            output_opts,
        ),
        Commands::Rules { format } => commands::rules::run(format),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (off by default)
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Apply the color choice from flags and the environment to `colored`
fn configure_colors(force_color: bool, no_color: bool) {
    if let Some(enabled) = color_override(force_color, no_color, |name| std::env::var_os(name)) {
        colored::control::set_override(enabled);
    }
}

/// Forced color setting, or `None` to let `colored` detect a TTY.
///
/// Flags win over the environment. Then `NO_COLOR` (any value, see
/// <https://no-color.org/>), then `CLICOLOR_FORCE` and `CLICOLOR` (see
/// <https://bixense.com/clicolors/>).
fn color_override(
    force_color: bool,
    no_color: bool,
    env: impl Fn(&str) -> Option<std::ffi::OsString>,
) -> Option<bool> {
    if force_color {
        return Some(true);
    }
    if no_color || env("NO_COLOR").is_some() {
        return Some(false);
    }
    if let Some(value) = env("CLICOLOR_FORCE") {
        return (!value.is_empty() && value != "0").then_some(true);
    }
    env("CLICOLOR").filter(|value| value == "0").map(|_| false)
}
