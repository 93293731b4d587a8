pub mod common;
pub mod lint;
pub mod rules;
