use crate::diagnostics::LintError;
use crate::traits::{DocumentLintRule, LintRule};
use openapi_document::{query, ApiSpec};

/// Operations that carry a request body
const BODY_VERBS: &[&str] = &["post", "put", "patch"];

/// Lint rule that rejects inline `oneOf` request bodies
///
/// Only the `application/json` media type is inspected.
pub struct NamedPolymorphicRequestBodyRuleImpl;

impl LintRule for NamedPolymorphicRequestBodyRuleImpl {
    fn name(&self) -> &'static str {
        "named_polymorphic_request_body"
    }

    fn description(&self) -> &'static str {
        "Polymorphic (oneOf) request bodies must be defined as named types, as opposed to \
         being defined inline. The Java code generator wont be able to handle them otherwise."
    }
}

impl DocumentLintRule for NamedPolymorphicRequestBodyRuleImpl {
    fn validate(&self, document: &ApiSpec) -> Result<(), LintError> {
        for path in query::get_all_object_properties(document.root(), "paths") {
            for verb in BODY_VERBS {
                let schema_path =
                    format!("{verb}.requestBody.content.application/json.schema.oneOf");
                if query::get_item(path.object, &schema_path).is_some() {
                    return Err(LintError::violation(format!(
                        "Inline polymorphic body in '{}' {verb}. These must be defined as named types.",
                        path.path
                    )));
                }
            }
        }
        Ok(())
    }
}
