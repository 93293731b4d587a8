/// Lint rule implementations
///
/// Each rule is implemented in its own file and implements `DocumentLintRule`.
/// Rules that must hold at any depth walk the whole document with an
/// `Observer`; the rest query the sections they check
/// (`components.schemas`, `paths`) directly.
use openapi_document::query::{self, ArrayEntry};
use openapi_document::ApiItem;

/// Section holding the named schemas
pub const SCHEMAS_PATH: &str = "components.schemas";

/// `allOf` elements of a schema, split into `$ref` items and everything else
pub struct AllOfItems<'a> {
    pub refs: Vec<ArrayEntry<'a>>,
    pub others: Vec<ArrayEntry<'a>>,
}

/// Partition the schema's `allOf` array. Empty if there is none.
pub fn all_of_items(schema: &ApiItem) -> AllOfItems<'_> {
    let (refs, others) = query::get_all_array_items(schema, "allOf")
        .into_iter()
        .partition(|entry| query::has_property(entry.object, "$ref"));
    AllOfItems { refs, others }
}

mod allof;
mod allof_only_ref;
mod inherit_required;
mod named_polymorphic_request_body;
mod no_nested_type_without_ref;
mod require_description;
mod required;

pub use allof::AllOfRuleImpl;
pub use allof_only_ref::AllOfOnlyRefRuleImpl;
pub use inherit_required::InheritRequiredRuleImpl;
pub use named_polymorphic_request_body::NamedPolymorphicRequestBodyRuleImpl;
pub use no_nested_type_without_ref::NoNestedTypeWithoutRefRuleImpl;
pub use require_description::RequireDescriptionRuleImpl;
pub use required::RequiredRuleImpl;
