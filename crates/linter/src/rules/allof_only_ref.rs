use crate::diagnostics::LintError;
use crate::traits::{DocumentLintRule, LintRule};
use crate::visitor::{walk, Observer};
use openapi_document::{ApiItem, ApiSpec};

/// Lint rule that requires `allOf` elements to be bare references
///
/// Applies to every `allOf` anywhere in the document, not just under
/// `components.schemas`, so it walks the whole tree.
pub struct AllOfOnlyRefRuleImpl;

impl LintRule for AllOfOnlyRefRuleImpl {
    fn name(&self) -> &'static str {
        "allof_only_ref"
    }

    fn description(&self) -> &'static str {
        "allOf: should only specify $ref elements"
    }
}

impl DocumentLintRule for AllOfOnlyRefRuleImpl {
    fn validate(&self, document: &ApiSpec) -> Result<(), LintError> {
        walk(document, self)
    }
}

impl Observer for AllOfOnlyRefRuleImpl {
    fn on_object_entry(&self, object: &str, key: &str, _entry: &ApiItem) -> Result<(), LintError> {
        if object == "allOf" && key != "$ref" {
            return Err(LintError::violation(
                "allOf: should only contain $ref elements",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_test_utils::fixtures::{response_content, spec};
    use serde_json::json;

    #[test]
    fn test_accepts_only_refs() {
        let input = response_content(json!({
            "application/json": {
                "schema": {
                    "allOf": [
                        { "$ref": "ref1" },
                        { "$ref": "ref2" },
                    ]
                }
            }
        }));
        assert_eq!(AllOfOnlyRefRuleImpl.validate(&input), Ok(()));
    }

    #[test]
    fn test_rejects_non_ref_element() {
        let input = response_content(json!({
            "application/json": {
                "schema": {
                    "allOf": [
                        { "$ref": "ref" },
                        { "description": "abc" }
                    ]
                }
            }
        }));
        let err = AllOfOnlyRefRuleImpl.validate(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error in \"<root>./test.get.responses.200.content.application/json.schema.allOf[1].description\": \
             allOf: should only contain $ref elements"
        );
    }

    #[test]
    fn test_rejects_extra_key_next_to_ref() {
        let input = spec(json!({
            "components": {
                "schemas": {
                    "Dog": {
                        "description": "A dog",
                        "allOf": [{ "$ref": "#/components/schemas/Pet", "nullable": true }]
                    }
                }
            }
        }));
        let err = AllOfOnlyRefRuleImpl.validate(&input).unwrap_err();
        assert!(err.to_string().contains("allOf[0].nullable"));
    }

    #[test]
    fn test_deeply_nested_allof() {
        let input = spec(json!({
            "components": {
                "schemas": {
                    "Owner": {
                        "description": "An owner",
                        "properties": {
                            "pet": { "allOf": [{ "type": "string" }] }
                        }
                    }
                }
            }
        }));
        let err = AllOfOnlyRefRuleImpl.validate(&input).unwrap_err();
        assert!(err.is_violation());
        assert!(err
            .to_string()
            .starts_with("Error in \"<root>.schemas.Owner.properties.pet.allOf[0].type\""));
    }

    #[test]
    fn test_document_without_allof() {
        let input = spec(json!({ "paths": {} }));
        assert_eq!(AllOfOnlyRefRuleImpl.validate(&input), Ok(()));
    }
}
