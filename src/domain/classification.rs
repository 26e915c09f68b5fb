//! Core domain models for line classification results
//!
//! Architecture: Rich Domain Models - match records know how to present themselves
//! - MatchRecord captures which rules fired on a single line, in rule order
//! - Classification acts as an aggregate root over every record of a document
//! - Summary statistics are accumulated as records are added, never recomputed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Codes of the rules that matched one line of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Line number (1-indexed) in the original document
    pub line_number: usize,
    /// Matched rule codes in rule set registration order
    pub codes: Vec<&'static str>,
}

impl MatchRecord {
    /// Create a record for the given line
    pub fn new(line_number: usize, codes: Vec<&'static str>) -> Self {
        Self { line_number, codes }
    }

    /// Whether no rule matched this line
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of matched codes beginning with the given prefix
    pub fn count_prefixed(&self, prefix: &str) -> usize {
        self.codes.iter().filter(|code| code.starts_with(prefix)).count()
    }

    /// Matched codes joined with single spaces (empty if nothing matched)
    pub fn joined(&self) -> String {
        self.codes.join(" ")
    }
}

/// Summary statistics for a classification run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Total number of lines classified
    pub total_lines: usize,
    /// Number of lines no rule matched
    pub unmatched_lines: usize,
    /// Hits per rule code, keyed in rule set order
    pub rule_hits: Vec<(String, usize)>,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// Timestamp when classification was performed
    pub classified_at: DateTime<Utc>,
}

impl ClassificationSummary {
    /// Hit count for a single rule code
    pub fn hits_for(&self, code: &str) -> usize {
        self.rule_hits
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, hits)| *hits)
            .unwrap_or(0)
    }
}

/// Every match record of a document, in original line order
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// One record per document line; `records[i].line_number == i + 1`
    pub records: Vec<MatchRecord>,
    /// Summary statistics
    pub summary: ClassificationSummary,
}

impl Classification {
    /// Create an empty classification tracking hits for the given codes
    pub fn new<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            records: Vec::new(),
            summary: ClassificationSummary {
                rule_hits: codes.into_iter().map(|code| (code.to_string(), 0)).collect(),
                classified_at: Utc::now(),
                ..Default::default()
            },
        }
    }

    /// Append the record for the next line
    pub fn add_record(&mut self, record: MatchRecord) {
        debug_assert_eq!(record.line_number, self.records.len() + 1);

        if record.is_empty() {
            self.summary.unmatched_lines += 1;
        }
        for code in &record.codes {
            if let Some((_, hits)) =
                self.summary.rule_hits.iter_mut().find(|(c, _)| c.as_str() == *code)
            {
                *hits += 1;
            }
        }
        self.summary.total_lines += 1;
        self.records.push(record);
    }

    /// Record for a 1-indexed line number
    pub fn record(&self, line_number: usize) -> Option<&MatchRecord> {
        line_number.checked_sub(1).and_then(|i| self.records.get(i))
    }

    /// Records in ascending line order
    pub fn iter(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter()
    }

    /// Number of classified lines
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the classified document was empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Set the execution time
    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }
}

/// Error types that can occur while classifying a document
#[derive(Debug, thiserror::Error)]
pub enum LineRulesError {
    /// A command-line or API argument was not recognised
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The input document does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Report could not be serialised
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl LineRulesError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Create a file-not-found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into() }
    }
}

/// Result type for line rule operations
pub type LineRulesResult<T> = Result<T, LineRulesError>;
