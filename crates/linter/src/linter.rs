use crate::config::LintConfig;
use crate::diagnostics::{DiagnosticSeverity, LintDiagnostic, LintError};
use crate::registry::document_rules;
use crate::schema::{SchemaCheck, SchemaCheckError};
use crate::traits::DocumentLintRule;
use openapi_document::{ApiSpec, RefError};
use std::sync::Arc;

/// Why a lint run did not pass
#[derive(Debug, thiserror::Error)]
pub enum LinterError {
    /// The document failed the structural pre-check; no rule ran
    #[error(transparent)]
    Schema(#[from] SchemaCheckError),

    /// A rule at `error` severity found a violation
    #[error("{message}")]
    Rule { rule: &'static str, message: String },

    /// A rule could not evaluate the document
    #[error("Rule {rule} could not evaluate the document: {source}")]
    Defect {
        rule: &'static str,
        #[source]
        source: RefError,
    },
}

/// Runs the configured rules over documents
///
/// The linter holds no per-document state; the same instance can lint any
/// number of documents.
pub struct Linter {
    config: LintConfig,
    schema_check: Option<Box<dyn SchemaCheck>>,
}

impl Linter {
    /// Linter running every rule the config enables, with no schema pre-check
    #[must_use]
    pub fn new(config: LintConfig) -> Self {
        Self {
            config,
            schema_check: None,
        }
    }

    /// Validate every document against `check` before any rule runs
    #[must_use]
    pub fn with_schema_check(mut self, check: impl SchemaCheck + 'static) -> Self {
        self.schema_check = Some(Box::new(check));
        self
    }

    #[must_use]
    pub fn without_schema_check(mut self) -> Self {
        self.schema_check = None;
        self
    }

    #[must_use]
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Enabled rules in registry order, with their configured severity
    fn enabled_rules(
        &self,
    ) -> impl Iterator<Item = (&'static Arc<dyn DocumentLintRule>, DiagnosticSeverity)> + '_ {
        document_rules().iter().filter_map(|rule| {
            let severity = self.config.get_severity(rule.name())?;
            severity
                .to_diagnostic_severity()
                .map(|severity| (rule, severity))
        })
    }

    fn run_schema_check(&self, document: &ApiSpec) -> Result<(), LinterError> {
        if let Some(check) = &self.schema_check {
            check.check(document)?;
        }
        Ok(())
    }

    /// Lint a document, stopping at the first failing `error` rule
    ///
    /// Failures of rules configured as `warn` are logged and the run goes on.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn lint(&self, document: &ApiSpec) -> Result<(), LinterError> {
        self.run_schema_check(document)?;

        for (rule, severity) in self.enabled_rules() {
            tracing::trace!(rule = rule.name(), "Running rule");
            let Err(err) = rule.validate(document) else {
                continue;
            };
            let message = match err {
                LintError::Defect(source) => {
                    return Err(LinterError::Defect {
                        rule: rule.name(),
                        source,
                    });
                }
                other => other.to_string(),
            };
            tracing::debug!(rule = rule.name(), %severity, "Rule failed");
            if severity.is_error() {
                return Err(LinterError::Rule {
                    rule: rule.name(),
                    message,
                });
            }
            tracing::warn!(rule = rule.name(), "{message}");
        }

        Ok(())
    }

    /// Evaluate every enabled rule and collect one diagnostic per failing rule
    ///
    /// Schema failures and rules that cannot evaluate the document are still
    /// returned as errors.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn check(&self, document: &ApiSpec) -> Result<Vec<LintDiagnostic>, LinterError> {
        self.run_schema_check(document)?;

        let mut diagnostics = Vec::new();
        for (rule, severity) in self.enabled_rules() {
            tracing::trace!(rule = rule.name(), "Running rule");
            match rule.validate(document) {
                Ok(()) => {}
                Err(LintError::Defect(source)) => {
                    return Err(LinterError::Defect {
                        rule: rule.name(),
                        source,
                    });
                }
                Err(err) => {
                    tracing::debug!(rule = rule.name(), %severity, "Rule failed");
                    diagnostics.push(LintDiagnostic::new(rule.name(), severity, err.to_string()));
                }
            }
        }

        tracing::debug!(count = diagnostics.len(), "Collected diagnostics");
        Ok(diagnostics)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LintSeverity;
    use openapi_test_utils::fixtures::schemas;
    use serde_json::json;

    fn config(yaml: &str) -> LintConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn undescribed() -> ApiSpec {
        schemas(json!({
            "Pet": { "type": "object", "required": ["id"], "properties": {} }
        }))
    }

    #[test]
    fn test_clean_document() {
        let input = schemas(json!({
            "Pet": {
                "description": "A pet",
                "required": ["id"],
                "properties": { "id": { "type": "integer" } }
            }
        }));
        let linter = Linter::default();
        assert!(linter.lint(&input).is_ok());
        assert!(linter.check(&input).unwrap().is_empty());
    }

    #[test]
    fn test_lint_stops_at_first_failing_rule() {
        let err = Linter::default().lint(&undescribed()).unwrap_err();
        let LinterError::Rule { rule, message } = err else {
            panic!("expected a rule failure");
        };
        assert_eq!(rule, "require_description");
        assert_eq!(message, "Missing description in components.schemas.Pet");
    }

    #[test]
    fn test_check_collects_one_diagnostic_per_rule() {
        let diagnostics = Linter::default().check(&undescribed()).unwrap();
        let rules: Vec<_> = diagnostics.iter().map(|d| d.rule).collect();
        assert_eq!(rules, vec!["require_description", "required"]);
    }

    #[test]
    fn test_warn_severity_does_not_fail_lint() {
        let linter = Linter::new(config(
            "extends: recommended\nrules:\n  require_description: warn\n  required: off\n",
        ));
        assert!(linter.lint(&undescribed()).is_ok());

        let diagnostics = linter.check(&undescribed()).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
    }

    #[test]
    fn test_rules_without_preset_run_alone() {
        let linter = Linter::new(config("rules:\n  required: error\n"));
        assert_eq!(linter.config().get_severity("required"), Some(LintSeverity::Error));
        let err = linter.lint(&undescribed()).unwrap_err();
        assert!(matches!(err, LinterError::Rule { rule: "required", .. }));
    }

    #[test]
    fn test_defect_is_not_a_rule_failure() {
        let input = schemas(json!({
            "Dog": {
                "description": "A dog",
                "allOf": [{ "$ref": "#/components/schemas/Missing" }]
            }
        }));
        let err = Linter::default().check(&input).unwrap_err();
        assert!(matches!(
            err,
            LinterError::Defect { rule: "inherit_required", .. }
        ));
    }

    #[test]
    fn test_schema_check_runs_first() {
        struct Reject;
        impl SchemaCheck for Reject {
            fn check(&self, _document: &ApiSpec) -> Result<(), SchemaCheckError> {
                Err(SchemaCheckError::Invalid {
                    errors: vec!["nope".to_string()],
                })
            }
        }

        let linter = Linter::default().with_schema_check(Reject);
        assert!(matches!(
            linter.check(&undescribed()),
            Err(LinterError::Schema(_))
        ));
        assert!(linter.without_schema_check().check(&undescribed()).is_ok());
    }
}
