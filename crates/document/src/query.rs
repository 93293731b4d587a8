//! Path queries over an [`ApiItem`] tree.
//!
//! None of these functions fail on a type mismatch; a lookup that runs into
//! a non-object or a missing property yields an absent result instead. Only
//! [`lookup_ref`] returns an error, for refs that cannot be resolved.

use crate::error::RefError;
use crate::item::ApiItem;

/// One property of an object reached through [`get_all_object_properties`]
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry<'a> {
    /// `<dotted path>.<name>`
    pub path: String,
    pub name: &'a str,
    pub object: &'a ApiItem,
}

/// One element of an array reached through [`get_all_array_items`]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayEntry<'a> {
    /// `<dotted path>[<index>]`
    pub path: String,
    pub index: usize,
    pub object: &'a ApiItem,
}

#[must_use]
pub const fn is_object(item: &ApiItem) -> bool {
    matches!(item, ApiItem::Object(_))
}

#[must_use]
pub const fn is_array(item: &ApiItem) -> bool {
    matches!(item, ApiItem::Array(_))
}

/// True if `item` is an object with a property called `name`
#[must_use]
pub fn has_property(item: &ApiItem, name: &str) -> bool {
    get_property(item, name).is_some()
}

#[must_use]
pub fn get_property<'a>(item: &'a ApiItem, name: &str) -> Option<&'a ApiItem> {
    item.as_object()?.get(name)
}

/// Follow a dot-separated path of property names.
///
/// An empty path yields `item` itself.
#[must_use]
pub fn get_item<'a>(item: &'a ApiItem, path: &str) -> Option<&'a ApiItem> {
    if path.is_empty() {
        return Some(item);
    }
    path.split('.')
        .try_fold(item, |current, name| get_property(current, name))
}

/// Every property of the object at `path`, in document order.
///
/// Empty if `path` is missing or does not name an object.
#[must_use]
pub fn get_all_object_properties<'a>(item: &'a ApiItem, path: &str) -> Vec<PropertyEntry<'a>> {
    let Some(object) = get_item(item, path).and_then(ApiItem::as_object) else {
        return Vec::new();
    };

    object
        .iter()
        .map(|(name, object)| PropertyEntry {
            path: format!("{path}.{name}"),
            name,
            object,
        })
        .collect()
}

/// Every element of the array at `path`, in order.
///
/// Empty if `path` is missing or does not name an array.
#[must_use]
pub fn get_all_array_items<'a>(item: &'a ApiItem, path: &str) -> Vec<ArrayEntry<'a>> {
    let Some(items) = get_item(item, path).and_then(ApiItem::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .map(|(index, object)| ArrayEntry {
            path: format!("{path}[{index}]"),
            index,
            object,
        })
        .collect()
}

/// True if the schema's `required` array lists `name`
#[must_use]
pub fn is_required(schema: &ApiItem, name: &str) -> bool {
    get_property(schema, "required")
        .and_then(ApiItem::as_array)
        .is_some_and(|required| required.iter().any(|r| r.as_str() == Some(name)))
}

/// Resolve a local ref (`#/a/b/c`) from the document root.
///
/// Segments are JSON-pointer decoded (`~1` is `/`, `~0` is `~`). Refs into
/// other files are not supported.
pub fn lookup_ref<'a>(document: &'a ApiItem, reference: &str) -> Result<&'a ApiItem, RefError> {
    let Some(pointer) = reference.strip_prefix("#/") else {
        return Err(RefError::UnsupportedFormat(reference.to_string()));
    };

    pointer.split('/').try_fold(document, |current, segment| {
        let object = current
            .as_object()
            .ok_or_else(|| RefError::UnknownRef(reference.to_string()))?;
        let name = segment.replace("~1", "/").replace("~0", "~");
        object
            .get(&name)
            .ok_or_else(|| RefError::UnknownRef(reference.to_string()))
    })
}
