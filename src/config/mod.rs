//! Configuration loading and management for Line Rules
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to a validated rule set
//! - Defaults are embedded in code so a missing config file is never an error
//! - Every section is optional; absent fields fall back to defaults

use crate::classifier::ClassifyOptions;
use crate::domain::classification::{LineRulesError, LineRulesResult};
use crate::rules::{Rule, RuleSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file names looked up in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["line_rules.yaml", "line_rules.yml", ".line_rules.yaml"];

const SUPPORTED_VERSION: &str = "1.0";

/// Main configuration structure for Line Rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRulesConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Rule selection
    #[serde(default)]
    pub rules: RulesConfig,
    /// Classifier behaviour
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Which built-in rules are active
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Codes of rules to leave out
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Classifier settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Whether lines may be classified in parallel
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl LineRulesConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LineRulesResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            LineRulesError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            LineRulesError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        tracing::debug!("Loaded configuration from '{}'", path.as_ref().display());
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> LineRulesResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| LineRulesError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the first default config file found in `dir`, or built-in defaults
    pub fn discover<P: AsRef<Path>>(dir: P) -> LineRulesResult<Self> {
        match find_config_file(dir) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Default configuration with every built-in rule enabled
    pub fn with_defaults() -> Self {
        Self {
            version: default_version(),
            rules: RulesConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> LineRulesResult<()> {
        if self.version != SUPPORTED_VERSION {
            return Err(LineRulesError::config(format!(
                "Unsupported configuration version '{}', expected '{}'",
                self.version, SUPPORTED_VERSION
            )));
        }

        for code in &self.rules.disabled {
            if Rule::from_code(code).is_none() {
                return Err(LineRulesError::config(format!("Unknown rule code '{code}'")));
            }
        }

        Ok(())
    }

    /// Rule set with disabled rules removed, registration order kept
    pub fn rule_set(&self) -> LineRulesResult<RuleSet> {
        RuleSet::all().without(self.rules.disabled.as_slice())
    }

    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions { parallel: self.classifier.parallel }
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> LineRulesResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LineRulesError::config(format!("Failed to serialize config: {e}")))
    }
}

impl Default for LineRulesConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// First existing default config file inside `dir`
pub fn find_config_file<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES.iter().map(|name| dir.as_ref().join(name)).find(|path| path.is_file())
}

fn default_version() -> String {
    SUPPORTED_VERSION.to_string()
}

fn default_true() -> bool {
    true
}
