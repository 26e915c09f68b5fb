//! Report generation for classified documents
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - A Classification (domain) is projected by a ReportMode into output lines
//! - Filter and Annotate share one classification step and differ only in projection
//! - Projections are read-only; neither the document nor the records are mutated

use crate::domain::classification::{
    Classification, LineRulesError, LineRulesResult, MatchRecord,
};
use crate::domain::document::Document;
use crate::rules::RuleFamily;
use serde_json::Value as JsonValue;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// How classified lines are projected into a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Print lines whose positive matches are at least as many as negative ones
    Filter,
    /// Print the matched rule codes of every line
    Annotate,
}

impl ReportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Annotate => "annotate",
        }
    }

    /// Get all available mode names
    pub fn all_modes() -> &'static [&'static str] {
        &["filter", "annotate"]
    }

    /// Whether a line with this record appears in the report
    pub fn includes(self, record: &MatchRecord) -> bool {
        match self {
            Self::Filter => is_majority_positive(record),
            Self::Annotate => true,
        }
    }
}

impl FromStr for ReportMode {
    type Err = LineRulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filter" => Ok(Self::Filter),
            "annotate" => Ok(Self::Annotate),
            other => Err(LineRulesError::invalid_argument(format!(
                "unknown mode '{}', expected one of: {}",
                other,
                Self::all_modes().join(", ")
            ))),
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter vote: at least as many FP codes as FN codes, so unmatched lines pass
pub fn is_majority_positive(record: &MatchRecord) -> bool {
    record.count_prefixed(RuleFamily::Positive.prefix())
        >= record.count_prefixed(RuleFamily::Negative.prefix())
}

/// Supported output formats for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One plain text line per reported input line
    #[default]
    Text,
    /// JSON document with report lines and summary
    Json,
}

impl OutputFormat {
    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["text", "json"]
    }
}

impl FromStr for OutputFormat {
    type Err = LineRulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(LineRulesError::invalid_argument(format!(
                "unknown format '{}', expected one of: {}",
                other,
                Self::all_formats().join(", ")
            ))),
        }
    }
}

/// Projects a classified document according to a report mode
pub struct ReportFormatter {
    mode: ReportMode,
}

impl ReportFormatter {
    pub fn new(mode: ReportMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Records that appear in the report, in ascending line order
    pub fn selected<'a>(
        &self,
        classification: &'a Classification,
    ) -> impl Iterator<Item = &'a MatchRecord> {
        let mode = self.mode;
        classification.iter().filter(move |record| mode.includes(record))
    }

    /// Format a classified document in the specified format
    pub fn format_report(
        &self,
        document: &Document,
        classification: &Classification,
        format: OutputFormat,
    ) -> LineRulesResult<String> {
        match format {
            OutputFormat::Text => Ok(self.format_text(document, classification)),
            OutputFormat::Json => self.format_json(document, classification),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        document: &Document,
        classification: &Classification,
        format: OutputFormat,
        mut writer: W,
    ) -> LineRulesResult<()> {
        let formatted = self.format_report(document, classification, format)?;
        writer.write_all(formatted.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn format_text(&self, document: &Document, classification: &Classification) -> String {
        let mut output = String::new();

        for record in self.selected(classification) {
            match self.mode {
                ReportMode::Filter => {
                    let text = line_text(document, record.line_number);
                    output.push_str(&format!("{}:{}", record.line_number, text));
                    if !text.ends_with('\n') {
                        output.push('\n');
                    }
                }
                ReportMode::Annotate => {
                    output.push_str(&format!("{}: {}\n", record.line_number, record.joined()));
                }
            }
        }

        output
    }

    fn format_json(
        &self,
        document: &Document,
        classification: &Classification,
    ) -> LineRulesResult<String> {
        let lines: Vec<JsonValue> = self
            .selected(classification)
            .map(|record| match self.mode {
                ReportMode::Filter => serde_json::json!({
                    "line": record.line_number,
                    "codes": record.codes,
                    "text": line_text(document, record.line_number),
                }),
                ReportMode::Annotate => serde_json::json!({
                    "line": record.line_number,
                    "codes": record.codes,
                }),
            })
            .collect();

        let summary = &classification.summary;
        let rule_hits: Vec<JsonValue> = summary
            .rule_hits
            .iter()
            .map(|(code, hits)| serde_json::json!({ "code": code, "hits": hits }))
            .collect();

        let json_report = serde_json::json!({
            "mode": self.mode.as_str(),
            "summary": {
                "total_lines": summary.total_lines,
                "emitted_lines": lines.len(),
                "unmatched_lines": summary.unmatched_lines,
                "rule_hits": rule_hits,
                "execution_time_ms": summary.execution_time_ms,
                "classified_at": summary.classified_at.to_rfc3339(),
            },
            "lines": lines,
        });

        serde_json::to_string_pretty(&json_report).map_err(|e| {
            LineRulesError::serialization(format!("JSON serialization failed: {e}"))
        })
    }
}

fn line_text(document: &Document, line_number: usize) -> &str {
    document.line(line_number).map(|line| line.text.as_str()).unwrap_or("")
}
