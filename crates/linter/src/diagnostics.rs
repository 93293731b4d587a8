use openapi_document::RefError;
use thiserror::Error;

/// Failure raised while a rule evaluates a document.
///
/// `Violation` is the expected outcome of a rule that found a problem. The
/// tree walker turns it into `Positioned` when it is raised from an
/// [`Observer`](crate::Observer) callback. `Defect` covers input the rule
/// could not evaluate at all (malformed or dangling `$ref`s) and is never
/// repositioned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintError {
    #[error("{0}")]
    Violation(String),

    #[error("Error in \"{path}\": {message}")]
    Positioned { path: String, message: String },

    #[error(transparent)]
    Defect(#[from] RefError),
}

impl LintError {
    #[must_use]
    pub fn violation(message: impl Into<String>) -> Self {
        Self::Violation(message.into())
    }

    /// True for rule outcomes, false for structural defects
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        matches!(self, Self::Violation(_) | Self::Positioned { .. })
    }
}

/// Severity of a reported diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl DiagnosticSeverity {
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A rule failure reported against a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintDiagnostic {
    /// Rule identifier (e.g., `"require_description"`)
    pub rule: &'static str,
    /// Severity (from rule default or config override)
    pub severity: DiagnosticSeverity,
    /// Human-readable message, including the document path
    pub message: String,
}

impl LintDiagnostic {
    #[must_use]
    pub fn new(
        rule: &'static str,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            severity,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(rule: &'static str, message: impl Into<String>) -> Self {
        Self::new(rule, DiagnosticSeverity::Error, message)
    }

    #[must_use]
    pub fn warning(rule: &'static str, message: impl Into<String>) -> Self {
        Self::new(rule, DiagnosticSeverity::Warning, message)
    }
}

impl std::fmt::Display for LintDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.rule, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positioned_message() {
        let err = LintError::Positioned {
            path: "<root>./pets.get".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), r#"Error in "<root>./pets.get": bad"#);
        assert!(err.is_violation());
    }

    #[test]
    fn test_defect_is_not_a_violation() {
        let err = LintError::from(RefError::UnknownRef("#/nope".to_string()));
        assert!(!err.is_violation());
        assert_eq!(err.to_string(), "Unknown ref #/nope");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = LintDiagnostic::warning("required", "Missing required property id in X");
        assert_eq!(
            diag.to_string(),
            "warning[required]: Missing required property id in X"
        );
        assert!(!diag.severity.is_error());
        assert!(LintDiagnostic::error("required", "x").severity.is_error());
    }
}
