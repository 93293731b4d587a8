/// Trait hierarchy for lint rules.
///
/// Every rule is a stateless unit struct: it can be evaluated any number of
/// times, in any order relative to other rules, and always gives the same
/// answer for the same document.
use crate::diagnostics::{DiagnosticSeverity, LintError};
use openapi_document::ApiSpec;

/// Base trait for all lint rules
pub trait LintRule: Send + Sync {
    /// Unique identifier for this rule (e.g., `"require_description"`)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Default severity (can be overridden by config)
    fn default_severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Error
    }
}

/// Lint rule that runs over a whole OpenAPI document
///
/// Rules either walk the entire tree with [`walk`](crate::walk) and an
/// [`Observer`](crate::Observer), or look up the sections they care about
/// with [`openapi_document::query`].
pub trait DocumentLintRule: LintRule {
    /// Check the document, stopping at the first violation found
    fn validate(&self, document: &ApiSpec) -> Result<(), LintError>;
}
