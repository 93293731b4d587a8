//! Reading OpenAPI documents from disk

use crate::ExitCode;
use openapi_document::ApiSpec;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unknown file extension: {}", .0.display())]
    UnknownExtension(PathBuf),
}

impl InputError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io { .. } => ExitCode::IoError,
            Self::Parse { .. } | Self::UnknownExtension(_) => ExitCode::ParseError,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Read and parse a document, picking JSON or YAML by extension
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_document(path: &Path) -> Result<ApiSpec, InputError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| InputError::UnknownExtension(path.to_path_buf()))?;
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(?format, size = contents.len(), "Parsing document");
    parse_document(&contents, format).map_err(|message| InputError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_document(contents: &str, format: DocumentFormat) -> Result<ApiSpec, String> {
    match format {
        DocumentFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
    }
}
