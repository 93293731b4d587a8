/// Structural pre-check of a document against a JSON Schema
///
/// Runs before any rule. The semantic rules assume a structurally valid
/// OpenAPI 3.0 document, so a document that fails here is never linted.
use openapi_document::ApiSpec;
use std::path::{Path, PathBuf};

/// OpenAPI 3.0 JSON Schema (draft 4) shipped with the linter
const BUNDLED_SCHEMA: &str = include_str!("../schema/openapi-3.0.json");

#[derive(Debug, thiserror::Error)]
pub enum SchemaCheckError {
    #[error("Document does not match the OpenAPI schema:\n{}", .errors.join("\n"))]
    Invalid { errors: Vec<String> },

    #[error("Failed to load schema {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("Failed to compile schema: {0}")]
    Build(String),
}

/// Validates a whole document before linting
pub trait SchemaCheck: Send + Sync {
    fn check(&self, document: &ApiSpec) -> Result<(), SchemaCheckError>;
}

/// [`SchemaCheck`] backed by the `jsonschema` crate (draft 4)
pub struct JsonSchemaCheck {
    validator: jsonschema::Validator,
}

impl JsonSchemaCheck {
    /// Compile a schema given as JSON
    pub fn new(schema: &serde_json::Value) -> Result<Self, SchemaCheckError> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft4)
            .build(schema)
            .map_err(|e| SchemaCheckError::Build(e.to_string()))?;
        Ok(Self { validator })
    }

    /// The schema bundled with the linter
    pub fn bundled() -> Result<Self, SchemaCheckError> {
        let schema: serde_json::Value = serde_json::from_str(BUNDLED_SCHEMA)
            .map_err(|e| SchemaCheckError::Build(e.to_string()))?;
        Self::new(&schema)
    }

    /// Load a schema from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, SchemaCheckError> {
        let load_error = |message: String| SchemaCheckError::Load {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let schema: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;
        tracing::debug!(path = %path.display(), "Loaded OpenAPI schema");
        Self::new(&schema)
    }
}

impl SchemaCheck for JsonSchemaCheck {
    #[tracing::instrument(skip_all, level = "debug")]
    fn check(&self, document: &ApiSpec) -> Result<(), SchemaCheckError> {
        let instance =
            serde_json::to_value(document).map_err(|e| SchemaCheckError::Build(e.to_string()))?;

        let errors: Vec<String> = self
            .validator
            .iter_errors(&instance)
            .map(|e| e.to_string())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "Schema check failed");
            Err(SchemaCheckError::Invalid { errors })
        }
    }
}
