//! Depth-first traversal of an OpenAPI document.
//!
//! [`walk`] visits every object entry and array item in document order and
//! reports each one to an [`Observer`] before descending into it. Default
//! implementations do nothing, so an observer only overrides what it needs.
//!
//! # Example
//!
//! ```
//! use openapi_document::{ApiItem, ApiSpec};
//! use openapi_linter::{walk, LintError, Observer};
//!
//! struct NoExamples;
//!
//! impl Observer for NoExamples {
//!     fn on_object_entry(&self, _object: &str, key: &str, _entry: &ApiItem) -> Result<(), LintError> {
//!         if key == "example" {
//!             return Err(LintError::violation("examples are not allowed"));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let spec: ApiSpec = serde_json::from_str(r#"{ "info": { "example": 1 } }"#).unwrap();
//! let err = walk(&spec, &NoExamples).unwrap_err();
//! assert_eq!(err.to_string(), r#"Error in "<root>.example": examples are not allowed"#);
//! ```

use crate::diagnostics::LintError;
use openapi_document::{ApiItem, ApiSpec};

/// Path prefix for everything reached from the top-level properties
pub const ROOT_PATH: &str = "<root>";

/// Callbacks invoked by [`walk`].
///
/// The first argument is the name of the enclosing container: the key under
/// which the current object or array was found. Items of an array share
/// the array's name, so `object == "allOf"` holds for every entry of every
/// element of an `allOf` array, wherever the array appears.
///
/// Returning [`LintError::Violation`] stops the walk; the walker reports it
/// with the path of the offending entry.
#[allow(unused_variables)]
pub trait Observer {
    /// Called for each `key: entry` of an object found under `object`
    fn on_object_entry(&self, object: &str, key: &str, entry: &ApiItem) -> Result<(), LintError> {
        Ok(())
    }

    /// Called for each element of an array found under `array`
    fn on_array_item(&self, array: &str, index: usize, item: &ApiItem) -> Result<(), LintError> {
        Ok(())
    }
}

/// Walk every top-level property of the document with the given observer.
#[tracing::instrument(level = "trace", skip_all)]
pub fn walk<O: Observer + ?Sized>(document: &ApiSpec, observer: &O) -> Result<(), LintError> {
    for (key, value) in document.entries() {
        walk_item(observer, ROOT_PATH, key, value)?;
    }
    Ok(())
}

fn walk_item<O: Observer + ?Sized>(
    observer: &O,
    path: &str,
    container: &str,
    item: &ApiItem,
) -> Result<(), LintError> {
    match item {
        ApiItem::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let child_path = format!("{path}[{index}]");
                observer
                    .on_array_item(container, index, child)
                    .map_err(|e| position(e, &child_path))?;
                walk_item(observer, &child_path, container, child)?;
            }
        }
        ApiItem::Object(object) => {
            for (key, entry) in object.iter() {
                let entry_path = format!("{path}.{key}");
                observer
                    .on_object_entry(container, key, entry)
                    .map_err(|e| position(e, &entry_path))?;
                walk_item(observer, &entry_path, key, entry)?;
            }
        }
        ApiItem::String(_) | ApiItem::Number(_) | ApiItem::Bool(_) | ApiItem::Null => {}
    }
    Ok(())
}

/// Attach a path to a violation. Anything else passes through untouched.
fn position(error: LintError, path: &str) -> LintError {
    match error {
        LintError::Violation(message) => LintError::Positioned {
            path: path.to_string(),
            message,
        },
        other => other,
    }
}
