//! Exit codes for the `openapi-lint` CLI.
//!
//! Scripts and CI systems can tell failure modes apart by the exit code.

/// Exit codes used by the CLI.
///
/// When several documents are linted the most severe outcome wins, which is
/// the highest code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub enum ExitCode {
    /// No errors
    Success = 0,
    /// A lint rule at `error` severity failed
    LintError = 1,
    /// Missing or invalid config file
    ConfigError = 2,
    /// Document failed the structural schema pre-check
    SchemaError = 3,
    /// File read failure
    IoError = 4,
    /// Document is not valid JSON/YAML, or has an unknown extension
    ParseError = 5,
    /// A rule could not evaluate the document (dangling or external `$ref`)
    DefectError = 6,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::LintError => write!(f, "lint error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
            Self::DefectError => write!(f, "malformed document"),
        }
    }
}
