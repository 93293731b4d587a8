use crate::{ConfigError, LintrcConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".openapilintrc.yml",
    ".openapilintrc.yaml",
    ".openapilintrc.json",
    ".openapilintrc",
];

/// Find a config file by walking up the directory tree from `start_dir`.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config file, detecting the format from its name
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<LintrcConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        patterns = config.document_patterns().len(),
        skip_schema_check = config.skip_schema_check,
        "Config loaded successfully"
    );
    Ok(config)
}

/// Parse config contents. `path` picks the format and labels errors.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<LintrcConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "" if file_name == ".openapilintrc" => {
            tracing::trace!("Trying YAML then JSON for .openapilintrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<LintrcConfig> {
    // An empty YAML file is an empty config
    if contents.trim().is_empty() {
        return Ok(LintrcConfig::default());
    }
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<LintrcConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

#[tracing::instrument(skip(config, path), fields(path = %path.display()))]
fn validate_config(config: &LintrcConfig, path: &Path) -> Result<()> {
    if config.documents.is_some() && config.document_patterns().is_empty() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "Empty documents configuration".to_string(),
        });
    }
    if config
        .document_patterns()
        .iter()
        .any(|pattern| pattern.trim().is_empty())
    {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "Empty document pattern".to_string(),
        });
    }
    if config.schema.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "Empty schema path".to_string(),
        });
    }

    tracing::debug!("Config validation passed");
    Ok(())
}
