//! Documents and their lines
//!
//! A document is loaded once, split into lines that keep their terminators
//! verbatim, and never mutated afterwards.

use crate::domain::classification::{LineRulesError, LineRulesResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// A single line of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line number (1-indexed)
    pub number: usize,
    /// Raw text including the trailing terminator, if any
    pub text: String,
}

impl Line {
    /// Text with the `\n` or `\r\n` terminator removed
    pub fn content(&self) -> &str {
        strip_terminator(&self.text)
    }

    /// Whether the raw text ends with a line terminator
    pub fn has_terminator(&self) -> bool {
        self.text.ends_with('\n')
    }
}

/// Ordered lines of a loaded text file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Build a document from in-memory text
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split_inclusive('\n')
            .enumerate()
            .map(|(i, raw)| Line { number: i + 1, text: raw.to_string() })
            .collect();

        Self { lines }
    }

    /// Load a document from a UTF-8 text file
    pub fn load<P: AsRef<Path>>(path: P) -> LineRulesResult<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LineRulesError::file_not_found(path.display().to_string()),
            _ => LineRulesError::Io { source: e },
        })?;

        let document = Self::from_text(&content);
        tracing::debug!("Loaded {} lines from '{}'", document.len(), path.display());

        Ok(document)
    }

    /// Lines in original order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line by 1-indexed number
    pub fn line(&self, number: usize) -> Option<&Line> {
        number.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Remove a single trailing `\n` or `\r\n`
pub(crate) fn strip_terminator(text: &str) -> &str {
    text.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(text)
}
