use super::{all_of_items, SCHEMAS_PATH};
use crate::diagnostics::LintError;
use crate::traits::{DocumentLintRule, LintRule};
use openapi_document::{query, ApiSpec};

/// Keys allowed next to `allOf` in a composed schema
const ALLOWED_SIBLINGS: &[&str] = &["allOf", "description"];

/// Lint rule that constrains the shape of `allOf` composition
///
/// A composed schema may list any number of `$ref` items but at most one
/// inline item, and every property must live in that inline item rather
/// than next to `allOf`.
pub struct AllOfRuleImpl;

impl LintRule for AllOfRuleImpl {
    fn name(&self) -> &'static str {
        "allof"
    }

    fn description(&self) -> &'static str {
        "When using allOf, there can be only one allOf item that is not a $ref item, \
         and all properties must be specified in that allOf item"
    }
}

impl DocumentLintRule for AllOfRuleImpl {
    fn validate(&self, document: &ApiSpec) -> Result<(), LintError> {
        for schema in query::get_all_object_properties(document.root(), SCHEMAS_PATH) {
            let Some(object) = schema.object.as_object() else {
                continue;
            };
            if !object.contains_key("allOf") {
                continue;
            }

            let disallowed: Vec<&str> = object
                .keys()
                .filter(|key| !ALLOWED_SIBLINGS.iter().any(|allowed| allowed == key))
                .collect();
            match disallowed.as_slice() {
                [] => {}
                [single] => {
                    return Err(LintError::violation(format!(
                        "Extra property {single} in {}",
                        schema.path
                    )));
                }
                many => {
                    return Err(LintError::violation(format!(
                        "Extra properties {} in {}",
                        many.join(","),
                        schema.path
                    )));
                }
            }

            let items = all_of_items(schema.object);
            if items.others.len() > 1 {
                return Err(LintError::violation(format!(
                    "Too many non-$ref objects in allOf in {}",
                    schema.path
                )));
            }
            for reference in &items.refs {
                if reference.object.as_object().map_or(0, |o| o.len()) != 1 {
                    return Err(LintError::violation(format!(
                        "$ref objects can only have a single $ref property in {}",
                        schema.path
                    )));
                }
            }
        }
        Ok(())
    }
}
