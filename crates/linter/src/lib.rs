mod config;
mod diagnostics;
mod linter;
mod registry;
mod rules;
mod schema;
mod traits;
mod visitor;

pub use config::{ExtendsConfig, FullLintConfig, LintConfig, LintRuleConfig, LintSeverity};
pub use diagnostics::{DiagnosticSeverity, LintDiagnostic, LintError};
pub use linter::{Linter, LinterError};
pub use registry::{all_rule_names, document_rules, find_rule};
pub use schema::{JsonSchemaCheck, SchemaCheck, SchemaCheckError};
pub use traits::{DocumentLintRule, LintRule};
pub use visitor::{walk, Observer, ROOT_PATH};

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types for writing and
/// running rules. Import with:
///
/// ```rust,ignore
/// use openapi_linter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{LintConfig, LintSeverity};
    pub use crate::diagnostics::{DiagnosticSeverity, LintDiagnostic, LintError};
    pub use crate::linter::Linter;
    pub use crate::traits::{DocumentLintRule, LintRule};
    pub use crate::visitor::{walk, Observer};
}
