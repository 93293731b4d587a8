use super::{all_of_items, SCHEMAS_PATH};
use crate::diagnostics::LintError;
use crate::traits::{DocumentLintRule, LintRule};
use openapi_document::{query, ApiItem, ApiSpec, RefError};

/// Lint rule that keeps overridden properties required
///
/// When the inline `allOf` item of a composed schema redeclares a property
/// that one of the referenced schemas requires, the inline item must
/// require it too.
pub struct InheritRequiredRuleImpl;

impl LintRule for InheritRequiredRuleImpl {
    fn name(&self) -> &'static str {
        "inherit_required"
    }

    fn description(&self) -> &'static str {
        "When overriding an inherited property, it must be required if the inherited property is required"
    }
}

impl DocumentLintRule for InheritRequiredRuleImpl {
    fn validate(&self, document: &ApiSpec) -> Result<(), LintError> {
        for schema in query::get_all_object_properties(document.root(), SCHEMAS_PATH) {
            let items = all_of_items(schema.object);

            let bases = items
                .refs
                .iter()
                .map(|entry| resolve(document, entry.object))
                .collect::<Result<Vec<_>, _>>()?;

            let Some(overriding) = items.others.first() else {
                continue;
            };

            for property in query::get_all_object_properties(overriding.object, "properties") {
                let required = query::is_required(overriding.object, property.name);
                let inherited = bases
                    .iter()
                    .any(|base| query::is_required(base, property.name));

                if inherited && !required {
                    return Err(LintError::violation(format!(
                        "Property {} of {} must be required",
                        property.name, schema.path
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Follow the `$ref` of an `allOf` item to the schema it names
fn resolve<'a>(document: &'a ApiSpec, item: &ApiItem) -> Result<&'a ApiItem, RefError> {
    match query::get_property(item, "$ref") {
        Some(ApiItem::String(reference)) => query::lookup_ref(document.root(), reference),
        Some(other) => Err(RefError::UnsupportedFormat(format!(
            "$ref must be a string, found {}",
            other.type_name()
        ))),
        None => Err(RefError::UnknownRef(String::new())),
    }
}
