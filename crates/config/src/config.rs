use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Contents of an `.openapilintrc` file
///
/// ```yaml
/// documents: "api/**/*.{yaml,json}"
/// schema: schemas/openapi-3.0.json
/// skipSchemaCheck: false
/// lint:
///   extends: recommended
///   rules:
///     inherit_required: warn
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LintrcConfig {
    /// Documents linted when no files are given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<DocumentsConfig>,

    /// JSON Schema used for the structural pre-check instead of the bundled one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Skip the structural pre-check entirely
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skip_schema_check: bool,

    /// Lint rule configuration, interpreted by the linter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint: Option<serde_json::Value>,
}

impl LintrcConfig {
    /// The raw `lint` section, if present
    #[must_use]
    pub fn lint(&self) -> Option<&serde_json::Value> {
        self.lint.as_ref()
    }

    /// Document patterns, empty if none are configured
    #[must_use]
    pub fn document_patterns(&self) -> Vec<&str> {
        self.documents
            .as_ref()
            .map(DocumentsConfig::patterns)
            .unwrap_or_default()
    }

    /// Custom schema path, resolved against the directory holding the config
    #[must_use]
    pub fn schema_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.schema.as_deref().map(|schema| base_dir.join(schema))
    }

    /// Files matching the configured document patterns, relative to `base_dir`.
    ///
    /// Results keep pattern order and contain each file once.
    #[tracing::instrument(skip(self), fields(base = %base_dir.display()))]
    pub fn find_documents(&self, base_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut seen = HashSet::new();

        for pattern in self.document_patterns() {
            for expanded in expand_braces(pattern) {
                let full_pattern = base_dir.join(&expanded).display().to_string();
                tracing::trace!(pattern = %full_pattern, "Matching documents");

                let entries = glob::glob(&full_pattern).map_err(|e| ConfigError::Pattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
                for entry in entries {
                    let path = entry.map_err(|e| ConfigError::Pattern {
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    })?;
                    if path.is_file() && seen.insert(path.clone()) {
                        files.push(path);
                    }
                }
            }
        }

        tracing::debug!(files_found = files.len(), "Documents found");
        Ok(files)
    }
}

/// Document patterns: a single glob or a list of globs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentsConfig {
    Pattern(String),
    Patterns(Vec<String>),
}

impl DocumentsConfig {
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Pattern(pattern) => vec![pattern.as_str()],
            Self::Patterns(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }
}

/// Expand a single `{a,b}` group, which `glob` does not support
fn expand_braces(pattern: &str) -> Vec<String> {
    let pattern = pattern.trim().trim_start_matches("./");
    if let (Some(start), Some(end)) = (pattern.find('{'), pattern.find('}')) {
        if start < end {
            let before = &pattern[..start];
            let after = &pattern[end + 1..];
            return pattern[start + 1..end]
                .split(',')
                .map(|option| format!("{before}{}{after}", option.trim()))
                .collect();
        }
    }
    vec![pattern.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = LintrcConfig::default();
        assert!(config.document_patterns().is_empty());
        assert!(config.lint().is_none());
        assert!(!config.skip_schema_check);
    }

    #[test]
    fn test_camel_case_fields() {
        let config: LintrcConfig = serde_yaml::from_str(
            "documents: [a.yaml, b.json]\nschema: s.json\nskipSchemaCheck: true\nlint: recommended\n",
        )
        .unwrap();
        assert_eq!(config.document_patterns(), vec!["a.yaml", "b.json"]);
        assert!(config.skip_schema_check);
        assert_eq!(
            config.schema_path(Path::new("/project")),
            Some(PathBuf::from("/project/s.json"))
        );
        assert_eq!(config.lint(), Some(&serde_json::json!("recommended")));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_yaml::from_str::<LintrcConfig>("skip_schema_check: true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(
            expand_braces("./api/*.{yaml, json}"),
            vec!["api/*.yaml", "api/*.json"]
        );
        assert_eq!(expand_braces("api/**/*.yml"), vec!["api/**/*.yml"]);
    }

    #[test]
    fn test_find_documents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let api_dir = temp_dir.path().join("api");
        fs::create_dir(&api_dir).unwrap();
        fs::write(api_dir.join("pets.yaml"), "openapi: 3.0.0").unwrap();
        fs::write(api_dir.join("users.json"), "{}").unwrap();
        fs::write(api_dir.join("notes.txt"), "").unwrap();

        let config = LintrcConfig {
            documents: Some(DocumentsConfig::Patterns(vec![
                "api/*.{yaml,json}".to_string(),
                "api/pets.yaml".to_string(),
            ])),
            ..LintrcConfig::default()
        };

        let files = config.find_documents(temp_dir.path()).unwrap();
        assert_eq!(files, vec![api_dir.join("pets.yaml"), api_dir.join("users.json")]);
    }

    #[test]
    fn test_invalid_pattern() {
        let config = LintrcConfig {
            documents: Some(DocumentsConfig::Pattern("api/***/x".to_string())),
            ..LintrcConfig::default()
        };
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            config.find_documents(temp_dir.path()),
            Err(ConfigError::Pattern { .. })
        ));
    }
}

#[cfg(test)]
mod schema_sync_tests {
    use super::*;

    fn load_schema() -> serde_json::Value {
        let schema_path = concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/schema/openapilintrc.schema.json"
        );
        let schema_str = std::fs::read_to_string(schema_path)
            .expect("Failed to read schema file - ensure schema/openapilintrc.schema.json exists");
        serde_json::from_str(&schema_str).expect("Failed to parse schema JSON")
    }

    /// Assert that serde and JSON schema agree on validity
    fn assert_sync(yaml: &str, description: &str) {
        let serde_result = serde_yaml::from_str::<LintrcConfig>(yaml);
        let serde_valid = serde_result.is_ok();

        let schema_valid = serde_yaml::from_str::<serde_json::Value>(yaml).is_ok_and(|value| {
            let compiled =
                jsonschema::draft7::new(&load_schema()).expect("Failed to compile JSON schema");
            compiled.is_valid(&value)
        });

        let serde_error = serde_result
            .err()
            .map_or_else(String::new, |e| e.to_string());
        assert_eq!(
            serde_valid, schema_valid,
            "Schema sync mismatch for '{description}':\n\
             - Serde valid: {serde_valid}\n\
             - JSON Schema valid: {schema_valid}\n\
             - Serde error: {serde_error}\n\
             - Config:\n{yaml}"
        );
    }

    #[test]
    fn sync_empty_config() {
        assert_sync("{}\n", "empty config");
    }

    #[test]
    fn sync_documents_pattern() {
        assert_sync("documents: \"api/**/*.yaml\"\n", "single pattern");
        assert_sync("documents: [a.yaml, b.json]\n", "pattern list");
    }

    #[test]
    fn sync_schema_options() {
        assert_sync("schema: openapi.json\nskipSchemaCheck: true\n", "schema options");
    }

    #[test]
    fn sync_lint_section() {
        assert_sync(
            r"
lint:
  extends: recommended
  rules:
    require_description: warn
",
            "lint section",
        );
    }

    #[test]
    fn sync_rejects_unknown_field() {
        assert_sync("documentz: api.yaml\n", "unknown field");
    }

    #[test]
    fn sync_rejects_wrong_type() {
        assert_sync("skipSchemaCheck: sometimes\n", "non-boolean skipSchemaCheck");
        assert_sync("documents: 3\n", "numeric documents");
    }
}
