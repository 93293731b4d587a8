use super::SCHEMAS_PATH;
use crate::diagnostics::LintError;
use crate::traits::{DocumentLintRule, LintRule};
use openapi_document::{query, ApiSpec};

/// Lint rule that requires every named schema to carry a `description`
pub struct RequireDescriptionRuleImpl;

impl LintRule for RequireDescriptionRuleImpl {
    fn name(&self) -> &'static str {
        "require_description"
    }

    fn description(&self) -> &'static str {
        "All component definitions must have a description"
    }
}

impl DocumentLintRule for RequireDescriptionRuleImpl {
    fn validate(&self, document: &ApiSpec) -> Result<(), LintError> {
        query::get_all_object_properties(document.root(), SCHEMAS_PATH)
            .into_iter()
            .find(|schema| !query::has_property(schema.object, "description"))
            .map_or(Ok(()), |schema| {
                Err(LintError::violation(format!(
                    "Missing description in {}",
                    schema.path
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_test_utils::fixtures::{schemas, spec};
    use serde_json::json;

    #[test]
    fn test_described_schemas() {
        let input = schemas(json!({
            "Pet": { "description": "A pet", "type": "object" },
            "Dog": { "description": "A dog", "allOf": [] }
        }));
        assert_eq!(RequireDescriptionRuleImpl.validate(&input), Ok(()));
    }

    #[test]
    fn test_missing_description() {
        let input = schemas(json!({
            "Pet": { "type": "object" }
        }));
        let err = RequireDescriptionRuleImpl.validate(&input).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Missing description in components.schemas.Pet");
    }

    #[test]
    fn test_reports_first_schema_in_document_order() {
        let input = schemas(json!({
            "Zebra": { "type": "object" },
            "Apple": { "type": "object" }
        }));
        assert_eq!(
            RequireDescriptionRuleImpl.validate(&input),
            Err(LintError::violation("Missing description in components.schemas.Zebra"))
        );
    }

    #[test]
    fn test_document_without_components() {
        let input = spec(json!({ "paths": {} }));
        assert_eq!(RequireDescriptionRuleImpl.validate(&input), Ok(()));
    }
}
