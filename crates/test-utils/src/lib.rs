//! Test fixtures and snapshot helpers shared by the OpenAPI lint crates

pub mod assertions;
pub mod fixtures;

pub use insta;
