//! Line Rules - rule-based line filtering and annotation for text files
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain logic (rules, classification) separated from file and terminal concerns
//! - Report modes are projections over a single classification step
//! - The runner API wires configuration, loading, classification and reporting

pub mod classifier;
pub mod config;
pub mod domain;
pub mod report;
pub mod rules;

// Re-export main types for convenient access
pub use domain::classification::{
    Classification, ClassificationSummary, LineRulesError, LineRulesResult, MatchRecord,
};
pub use domain::document::{Document, Line};

pub use config::LineRulesConfig;

pub use classifier::{ClassifyOptions, LineClassifier};

pub use report::{OutputFormat, ReportFormatter, ReportMode};

pub use rules::{Rule, RuleFamily, RuleSet};

use std::path::Path;

/// Main runner providing high-level classification operations
pub struct LineRulesRunner {
    classifier: LineClassifier,
    options: ClassifyOptions,
}

impl LineRulesRunner {
    /// Create a runner with the given configuration
    pub fn new_with_config(config: LineRulesConfig) -> LineRulesResult<Self> {
        config.validate()?;
        let classifier = LineClassifier::new(config.rule_set()?);

        Ok(Self { classifier, options: config.classify_options() })
    }

    /// Create a runner with default configuration
    pub fn new() -> LineRulesResult<Self> {
        Self::new_with_config(LineRulesConfig::default())
    }

    /// Create a runner loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> LineRulesResult<Self> {
        Self::new_with_config(LineRulesConfig::load_from_file(path)?)
    }

    /// Override classification options
    pub fn with_options(mut self, options: ClassifyOptions) -> Self {
        self.options = options;
        self
    }

    /// Active rules in registration order
    pub fn rule_set(&self) -> &RuleSet {
        self.classifier.rules()
    }

    /// Classify an already loaded document
    pub fn classify_document(&self, document: &Document) -> Classification {
        self.classifier.classify_with_options(document, &self.options)
    }

    /// Load, classify and format a text report for a file
    pub fn run<P: AsRef<Path>>(&self, mode: ReportMode, path: P) -> LineRulesResult<String> {
        self.run_with_format(mode, path, OutputFormat::Text)
    }

    /// Load, classify and format a report for a file in the given format
    pub fn run_with_format<P: AsRef<Path>>(
        &self,
        mode: ReportMode,
        path: P,
        format: OutputFormat,
    ) -> LineRulesResult<String> {
        let document = Document::load(path)?;
        let classification = self.classify_document(&document);

        ReportFormatter::new(mode).format_report(&document, &classification, format)
    }
}

/// Convenience function to annotate a file with default settings
pub fn annotate_file<P: AsRef<Path>>(path: P) -> LineRulesResult<String> {
    LineRulesRunner::new()?.run(ReportMode::Annotate, path)
}

/// Convenience function to filter a file with default settings
pub fn filter_file<P: AsRef<Path>>(path: P) -> LineRulesResult<String> {
    LineRulesRunner::new()?.run(ReportMode::Filter, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_sample(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("sample.txt");
        fs::write(&path, "hello.\n\nzzzzz and a a a a a.\n").unwrap();
        path
    }

    #[test]
    fn test_runner_creation() {
        let runner = LineRulesRunner::new().unwrap();
        assert_eq!(runner.rule_set().len(), 6);
    }

    #[test]
    fn test_annotate_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample(&temp_dir);

        let output = annotate_file(&path).unwrap();
        assert_eq!(output, "1: FP001 FP002\n2: FN202\n3: FP001 FP002 FP003 FN201\n");
    }

    #[test]
    fn test_filter_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample(&temp_dir);

        let output = filter_file(&path).unwrap();
        assert_eq!(output, "1:hello.\n3:zzzzz and a a a a a.\n");
    }

    #[test]
    fn test_missing_file_produces_no_report() {
        let temp_dir = TempDir::new().unwrap();
        let result = annotate_file(temp_dir.path().join("missing.txt"));

        assert!(matches!(result, Err(LineRulesError::FileNotFound { .. })));
    }

    #[test]
    fn test_runner_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample(&temp_dir);
        let config_path = temp_dir.path().join("line_rules.yaml");
        fs::write(&config_path, "rules:\n  disabled: [FP002]\nclassifier:\n  parallel: false\n")
            .unwrap();

        let runner = LineRulesRunner::from_config_file(&config_path).unwrap();
        let output = runner.run(ReportMode::Annotate, &path).unwrap();

        assert_eq!(output, "1: FP001\n2: FN202\n3: FP001 FP003 FN201\n");
    }

    #[test]
    fn test_parallel_and_sequential_runs_agree() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample(&temp_dir);

        let parallel = LineRulesRunner::new().unwrap();
        let sequential =
            LineRulesRunner::new().unwrap().with_options(ClassifyOptions { parallel: false });

        assert_eq!(
            parallel.run(ReportMode::Filter, &path).unwrap(),
            sequential.run(ReportMode::Filter, &path).unwrap()
        );
    }

    #[test]
    fn test_json_run() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample(&temp_dir);

        let output = LineRulesRunner::new()
            .unwrap()
            .run_with_format(ReportMode::Annotate, &path, OutputFormat::Json)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["lines"].as_array().unwrap().len(), 3);
        assert_eq!(json["lines"][1]["codes"][0], "FN202");
    }
}
