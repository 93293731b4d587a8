use crate::diagnostics::DiagnosticSeverity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Severity level for a lint rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum LintSeverity {
    Off,
    Warn,
    Error,
}

impl LintSeverity {
    /// Convert to diagnostic severity for reporting.
    ///
    /// Returns `None` if the rule is off.
    #[must_use]
    pub const fn to_diagnostic_severity(self) -> Option<DiagnosticSeverity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(DiagnosticSeverity::Warning),
            Self::Error => Some(DiagnosticSeverity::Error),
        }
    }
}

impl std::fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl From<DiagnosticSeverity> for LintSeverity {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => Self::Error,
            DiagnosticSeverity::Warning => Self::Warn,
        }
    }
}

/// Configuration for a single lint rule
///
/// Supports multiple formats:
/// ```yaml
/// # Simple severity
/// rule_name: warn
///
/// # Object style
/// rule_name:
///   severity: warn
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LintRuleConfig {
    pub severity: LintSeverity,
}

/// Custom deserializer for `LintRuleConfig` to accept every supported shape
impl<'de> Deserialize<'de> for LintRuleConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct LintRuleConfigVisitor;

        impl<'de> Visitor<'de> for LintRuleConfigVisitor {
            type Value = LintRuleConfig;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a severity string ('off', 'warn', 'error') or an object { severity }")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let severity = match value {
                    "off" => LintSeverity::Off,
                    "warn" => LintSeverity::Warn,
                    "error" => LintSeverity::Error,
                    _ => return Err(E::custom(format!("unknown severity: {value}"))),
                };
                Ok(LintRuleConfig { severity })
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                #[derive(Deserialize)]
                #[serde(deny_unknown_fields)]
                struct DetailedConfig {
                    severity: LintSeverity,
                }

                let config =
                    DetailedConfig::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(LintRuleConfig {
                    severity: config.severity,
                })
            }
        }

        deserializer.deserialize_any(LintRuleConfigVisitor)
    }
}

/// Extends configuration - can be a single preset or multiple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum ExtendsConfig {
    /// Single preset: `extends: recommended` or `lint: recommended`
    Single(String),
    /// Multiple presets: `extends: [recommended]`
    Multiple(Vec<String>),
}

impl ExtendsConfig {
    /// Get all presets as a vector (normalizes single to vec)
    #[must_use]
    pub fn presets(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Multiple(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

/// Full lint configuration struct with extends and rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FullLintConfig {
    /// Presets to extend (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<ExtendsConfig>,

    /// Rule configurations (optional)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub rules: HashMap<String, LintRuleConfig>,
}

const VALID_PRESETS: &[&str] = &["recommended"];

/// Overall lint configuration
///
/// Supports multiple formats:
///
/// ```yaml
/// # Every rule at its default severity
/// lint: recommended
///
/// # Fine-grained rules only (no presets)
/// lint:
///   rules:
///     require_description: error
///     inherit_required: warn
///
/// # Preset with overrides
/// lint:
///   extends: recommended
///   rules:
///     no_nested_type_without_ref: off
/// ```
///
/// With no `lint` section at all, the `recommended` preset applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum LintConfig {
    /// Preset(s): `lint: recommended` or `lint: [recommended]`
    Preset(ExtendsConfig),

    /// Full configuration with optional extends and rules
    Full(FullLintConfig),
}

impl Default for LintConfig {
    fn default() -> Self {
        Self::recommended()
    }
}

impl LintConfig {
    /// Validate the lint configuration against available rules
    ///
    /// Returns an error if any configured rule or preset names are invalid.
    /// The error message includes the closest valid rule name, if any, and
    /// a list of valid rule names.
    pub fn validate(&self) -> Result<(), String> {
        let valid_rules = crate::registry::all_rule_names();

        let (extends, rules) = match self {
            Self::Preset(presets) => (Some(presets), None),
            Self::Full(FullLintConfig { extends, rules }) => (extends.as_ref(), Some(rules)),
        };

        if let Some(ext) = extends {
            for preset in ext.presets() {
                if !VALID_PRESETS.iter().any(|valid| *valid == preset) {
                    return Err(format!(
                        "Invalid preset name: '{preset}'\n\nValid presets are:\n  - recommended"
                    ));
                }
            }
        }

        let Some(rules) = rules else {
            return Ok(());
        };

        let mut invalid_rules: Vec<&str> = rules
            .keys()
            .map(String::as_str)
            .filter(|rule| !valid_rules.iter().any(|valid| valid == rule))
            .collect();

        if invalid_rules.is_empty() {
            return Ok(());
        }

        invalid_rules.sort_unstable();

        use std::fmt::Write;
        let mut error = format!(
            "Invalid lint rule name(s): {}\n",
            invalid_rules.join(", ")
        );
        for rule in &invalid_rules {
            if let Some(suggestion) = closest_rule_name(rule, &valid_rules) {
                let _ = writeln!(error, "  '{rule}': did you mean '{suggestion}'?");
            }
        }
        error.push_str("\nValid rule names are:\n");
        for rule in &valid_rules {
            let _ = writeln!(error, "  - {rule}");
        }
        Err(error)
    }

    /// Get the severity for a rule, considering presets and overrides
    #[must_use]
    pub fn get_severity(&self, rule_name: &str) -> Option<LintSeverity> {
        match self {
            Self::Preset(presets) => Self::severity_from_presets(presets, rule_name),
            Self::Full(FullLintConfig { extends, rules }) => {
                let preset_severity = extends
                    .as_ref()
                    .and_then(|ext| Self::severity_from_presets(ext, rule_name));

                rules
                    .get(rule_name)
                    .map(|config| config.severity)
                    .or(preset_severity)
            }
        }
    }

    /// Get severity from a list of presets (later presets override earlier)
    fn severity_from_presets(presets: &ExtendsConfig, rule_name: &str) -> Option<LintSeverity> {
        let mut severity = None;
        for preset in presets.presets() {
            if preset == "recommended" {
                if let Some(s) = Self::recommended_severity(rule_name) {
                    severity = Some(s);
                }
            }
        }
        severity
    }

    /// Check if a rule is enabled (not Off and not None)
    #[must_use]
    pub fn is_enabled(&self, rule_name: &str) -> bool {
        matches!(
            self.get_severity(rule_name),
            Some(LintSeverity::Warn | LintSeverity::Error)
        )
    }

    /// Recommended severity for a rule: its own default
    fn recommended_severity(rule_name: &str) -> Option<LintSeverity> {
        crate::registry::find_rule(rule_name).map(|rule| rule.default_severity().into())
    }

    /// Get recommended configuration
    #[must_use]
    pub fn recommended() -> Self {
        Self::Preset(ExtendsConfig::Single("recommended".to_string()))
    }

    /// Build a configuration from the `lint` section of a config file.
    ///
    /// `None` (no section) yields the recommended preset.
    pub fn from_value(value: Option<&serde_json::Value>) -> Result<Self, String> {
        let Some(value) = value else {
            return Ok(Self::recommended());
        };

        let config: Self = serde_json::from_value(value.clone())
            .map_err(|e| format!("Invalid lint configuration: {e}"))?;
        config.validate()?;
        Ok(config)
    }
}

/// Closest known rule name, if one is reasonably close
fn closest_rule_name<'a>(name: &str, valid_rules: &[&'a str]) -> Option<&'a str> {
    valid_rules
        .iter()
        .map(|candidate| (*candidate, strsim::jaro_winkler(name, candidate)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_preset() {
        let yaml = r"recommended";
        let config: LintConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config,
            LintConfig::Preset(ExtendsConfig::Single(ref s)) if s == "recommended"
        ));
        assert!(config.is_enabled("require_description"));
        assert!(config.is_enabled("allof_only_ref"));
        assert!(!config.is_enabled("not_a_rule"));
    }

    #[test]
    fn test_default_is_recommended() {
        let config = LintConfig::default();
        for name in crate::registry::all_rule_names() {
            assert_eq!(config.get_severity(name), Some(LintSeverity::Error));
        }
    }

    #[test]
    fn test_rules_only() {
        let yaml = r"
rules:
  require_description: error
  inherit_required: warn
";
        let config: LintConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.get_severity("require_description"),
            Some(LintSeverity::Error)
        );
        assert_eq!(
            config.get_severity("inherit_required"),
            Some(LintSeverity::Warn)
        );
        assert_eq!(config.get_severity("required"), None);
        assert!(!config.is_enabled("required"));
    }

    #[test]
    fn test_extends_with_override() {
        let yaml = r"
extends: recommended
rules:
  no_nested_type_without_ref: off
  required: warn
";
        let config: LintConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.is_enabled("no_nested_type_without_ref"));
        assert_eq!(config.get_severity("required"), Some(LintSeverity::Warn));
        assert_eq!(config.get_severity("allof"), Some(LintSeverity::Error));
    }

    #[test]
    fn test_rule_config_shapes() {
        let yaml = r"
rules:
  required: warn
  inherit_required:
    severity: off
";
        let config: LintConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.get_severity("required"), Some(LintSeverity::Warn));
        assert_eq!(
            config.get_severity("inherit_required"),
            Some(LintSeverity::Off)
        );
    }

    #[test]
    fn test_array_form_rejected() {
        for yaml in ["rules:\n  required: [warn]\n", "rules:\n  required: [warn, { strict: true }]\n"] {
            let result: Result<LintConfig, _> = serde_yaml::from_str(yaml);
            assert!(result.is_err(), "accepted {yaml:?}");
        }
    }

    #[test]
    fn test_object_form_rejects_extra_keys() {
        let yaml = r"
rules:
  required:
    severity: warn
    strict: true
";
        let result: Result<LintConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let yaml = r"
rules:
  required: loud
";
        let result: Result<LintConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_invalid_preset() {
        let config = LintConfig::Preset(ExtendsConfig::Single("strict".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_rule_suggests_name() {
        let yaml = r"
rules:
  require_descriptions: error
";
        let config: LintConfig = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("require_descriptions"));
        assert!(err.contains("did you mean 'require_description'?"));
    }

    #[test]
    fn test_validate_valid_rules() {
        let yaml = r"
extends: [recommended]
rules:
  named_polymorphic_request_body: warn
";
        let config: LintConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_value_missing_section() {
        let config = LintConfig::from_value(None).unwrap();
        assert!(config.is_enabled("required"));
    }

    #[test]
    fn test_from_value_json() {
        let value = serde_json::json!({ "extends": "recommended", "rules": { "allof": "off" } });
        let config = LintConfig::from_value(Some(&value)).unwrap();
        assert!(!config.is_enabled("allof"));
        assert!(config.is_enabled("allof_only_ref"));

        let bad = serde_json::json!({ "rules": { "nope": "off" } });
        assert!(LintConfig::from_value(Some(&bad)).is_err());
    }

    #[test]
    fn test_severity_conversion() {
        assert_eq!(LintSeverity::Off.to_diagnostic_severity(), None);
        assert_eq!(
            LintSeverity::Warn.to_diagnostic_severity(),
            Some(DiagnosticSeverity::Warning)
        );
        assert_eq!(
            LintSeverity::from(DiagnosticSeverity::Error),
            LintSeverity::Error
        );
    }
}
