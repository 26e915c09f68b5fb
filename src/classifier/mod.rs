//! Line classification for Line Rules
//!
//! CDD Principle: Domain Services - the classifier evaluates a rule set over a document
//! - Every line is classified; none is skipped, whatever the report mode
//! - Rules are independent, so lines may be classified in parallel
//! - Records always come back in ascending line order

use crate::domain::classification::{Classification, MatchRecord};
use crate::domain::document::{Document, Line};
use crate::rules::RuleSet;
use rayon::prelude::*;
use std::time::Instant;

/// Evaluates every rule of a rule set against every line of a document
#[derive(Debug, Clone)]
pub struct LineClassifier {
    rules: RuleSet,
}

/// Options for customizing classification behavior
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Whether to classify lines in parallel
    pub parallel: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl LineClassifier {
    /// Create a classifier over the given rules
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Create a classifier with every built-in rule
    pub fn with_defaults() -> Self {
        Self::new(RuleSet::all())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classify a single line
    pub fn classify_line(&self, line: &Line) -> MatchRecord {
        MatchRecord::new(line.number, self.rules.matching_codes(&line.text))
    }

    /// Classify a document sequentially
    pub fn classify(&self, document: &Document) -> Classification {
        self.classify_with_options(document, &ClassifyOptions { parallel: false })
    }

    /// Classify a document, one record per line in original order
    pub fn classify_with_options(
        &self,
        document: &Document,
        options: &ClassifyOptions,
    ) -> Classification {
        let start_time = Instant::now();

        tracing::debug!(
            "Classifying {} lines with {} rules (parallel: {})",
            document.len(),
            self.rules.len(),
            options.parallel
        );

        let records = if options.parallel && document.len() > 1 {
            self.classify_lines_parallel(document.lines())
        } else {
            self.classify_lines_sequential(document.lines())
        };

        let mut classification = Classification::new(self.rules.codes());
        for record in records {
            classification.add_record(record);
        }
        classification.set_execution_time(start_time.elapsed().as_millis() as u64);

        tracing::debug!(
            "Classified {} lines, {} without any match",
            classification.summary.total_lines,
            classification.summary.unmatched_lines
        );

        classification
    }

    fn classify_lines_sequential(&self, lines: &[Line]) -> Vec<MatchRecord> {
        lines.iter().map(|line| self.classify_line(line)).collect()
    }

    /// Indexed parallel collect keeps records in line order
    fn classify_lines_parallel(&self, lines: &[Line]) -> Vec<MatchRecord> {
        lines.par_iter().map(|line| self.classify_line(line)).collect()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}
