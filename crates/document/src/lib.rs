//! In-memory model of a parsed OpenAPI document.
//!
//! The document is parsed once (from JSON or YAML) into an [`ApiSpec`] and is
//! read-only afterwards. The [`query`] module provides the lookups lint rules
//! use to navigate it: typed property access, dotted-path lookup, and local
//! `$ref` resolution.
//!
//! # Example
//!
//! ```
//! use openapi_document::{query, ApiSpec};
//!
//! let spec: ApiSpec = serde_json::from_str(
//!     r#"{ "components": { "schemas": { "Pet": { "description": "A pet" } } } }"#,
//! )
//! .unwrap();
//!
//! let schemas = query::get_all_object_properties(spec.root(), "components.schemas");
//! assert_eq!(schemas[0].path, "components.schemas.Pet");
//! ```

mod error;
mod item;
pub mod query;

pub use error::{DocumentError, RefError};
pub use item::{ApiItem, ApiObject, ApiSpec};
