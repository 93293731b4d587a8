use super::SCHEMAS_PATH;
use crate::diagnostics::LintError;
use crate::traits::{DocumentLintRule, LintRule};
use openapi_document::{query, ApiItem, ApiSpec};

/// Lint rule that forbids inline object types inside named schemas
pub struct NoNestedTypeWithoutRefRuleImpl;

impl LintRule for NoNestedTypeWithoutRefRuleImpl {
    fn name(&self) -> &'static str {
        "no_nested_type_without_ref"
    }

    fn description(&self) -> &'static str {
        "When nesting types, the nested type must either be a primitive type or a reference type"
    }
}

impl DocumentLintRule for NoNestedTypeWithoutRefRuleImpl {
    fn validate(&self, document: &ApiSpec) -> Result<(), LintError> {
        for schema in query::get_all_object_properties(document.root(), SCHEMAS_PATH) {
            for property in query::get_all_object_properties(schema.object, "properties") {
                if is_inline_object(property.object) {
                    return Err(LintError::violation(format!(
                        "Invalid nested type {} found in {}.properties.{}",
                        property.name, schema.path, property.name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn type_of<'a>(item: &'a ApiItem, path: &str) -> Option<&'a str> {
    query::get_item(item, path).and_then(ApiItem::as_str)
}

/// `type: object`, or an array whose items are `type: object`
fn is_inline_object(property: &ApiItem) -> bool {
    match type_of(property, "type") {
        Some("object") => true,
        Some("array") => type_of(property, "items.type") == Some("object"),
        _ => false,
    }
}
