use thiserror::Error;

/// A `$ref` that cannot be followed.
///
/// This is a defect in the input document, not a lint outcome. Callers must
/// let it propagate unchanged rather than report it as a rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
    /// A local ref whose target does not exist or passes through a non-object
    #[error("Unknown ref {0}")]
    UnknownRef(String),

    /// Anything other than a root-relative local ref (`#/...`)
    #[error("Unsupported ref format: {0}")]
    UnsupportedFormat(String),
}

/// Errors building an [`ApiSpec`](crate::ApiSpec).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document root must be an object, found {found}")]
    RootNotObject { found: &'static str },
}
