use super::SCHEMAS_PATH;
use crate::diagnostics::LintError;
use crate::traits::{DocumentLintRule, LintRule};
use openapi_document::{query, ApiItem, ApiSpec};

/// Lint rule that checks `required` lists against declared `properties`
pub struct RequiredRuleImpl;

impl LintRule for RequiredRuleImpl {
    fn name(&self) -> &'static str {
        "required"
    }

    fn description(&self) -> &'static str {
        "All required properties must be part of the properties of the object"
    }
}

impl DocumentLintRule for RequiredRuleImpl {
    fn validate(&self, document: &ApiSpec) -> Result<(), LintError> {
        for schema in query::get_all_object_properties(document.root(), SCHEMAS_PATH) {
            let properties = query::get_property(schema.object, "properties");
            let required_path = format!("{}.required", schema.path);

            for entry in query::get_all_array_items(schema.object, "required") {
                let ApiItem::String(name) = entry.object else {
                    return Err(LintError::violation(format!(
                        "Property {required_path}[{}] must be of type string",
                        entry.index
                    )));
                };
                if !properties.is_some_and(|properties| query::has_property(properties, name)) {
                    return Err(LintError::violation(format!(
                        "Missing required property {name} in {}",
                        schema.path
                    )));
                }
            }
        }
        Ok(())
    }
}
