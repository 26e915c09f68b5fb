//! Built-in line rules and the ordered rule set
//!
//! Architectural Principle: Closed Domain Vocabulary - every rule is an enum variant
//! - Predicates are pure, total functions over any string, including the empty one
//! - RuleSet fixes registration order, which is also the display order of matches
//! - Rule families (FP/FN) are derived from the code prefix, never stored separately

use crate::domain::classification::{LineRulesError, LineRulesResult};
use crate::domain::document::strip_terminator;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

lazy_static! {
    static ref ASCII_LETTER: Regex = Regex::new("[A-Za-z]").unwrap();
}

/// Maximum right-trimmed length (exclusive) for a line to count as short
const SHORT_LINE_LIMIT: usize = 100;

/// Grouping of rule codes used by the filter vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFamily {
    /// Codes starting with `FP`
    Positive,
    /// Codes starting with `FN`
    Negative,
}

impl RuleFamily {
    /// Code prefix shared by every rule of this family
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Positive => "FP",
            Self::Negative => "FN",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

/// A named predicate over a single line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Line ends with a full stop
    Fp001,
    /// Non-blank line shorter than 100 characters
    Fp002,
    /// At least five `a` characters
    Fp003,
    /// More than three `z` characters
    Fn201,
    /// Blank line
    Fn202,
    /// Non-blank line without any ASCII letter
    Fn203,
}

impl Rule {
    /// Every built-in rule in registration order
    pub const ALL: [Rule; 6] =
        [Rule::Fp001, Rule::Fp002, Rule::Fp003, Rule::Fn201, Rule::Fn202, Rule::Fn203];

    /// Stable, unique rule code
    pub fn code(self) -> &'static str {
        match self {
            Self::Fp001 => "FP001",
            Self::Fp002 => "FP002",
            Self::Fp003 => "FP003",
            Self::Fn201 => "FN201",
            Self::Fn202 => "FN202",
            Self::Fn203 => "FN203",
        }
    }

    /// Look up a built-in rule by its code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.code() == code)
    }

    pub fn family(self) -> RuleFamily {
        if self.code().starts_with(RuleFamily::Positive.prefix()) {
            RuleFamily::Positive
        } else {
            RuleFamily::Negative
        }
    }

    /// Human-readable description of what the rule checks
    pub fn description(self) -> &'static str {
        match self {
            Self::Fp001 => "Line ends with '.'",
            Self::Fp002 => "Line is not blank and has fewer than 100 characters",
            Self::Fp003 => "Line contains at least 5 'a' letters",
            Self::Fn201 => "Line contains more than 3 'z' letters",
            Self::Fn202 => "Line is empty",
            Self::Fn203 => "Line consists only of non-letter characters",
        }
    }

    /// Whether the rule matches the raw line text (terminator included)
    pub fn matches(self, line: &str) -> bool {
        match self {
            Self::Fp001 => strip_terminator(line).ends_with('.'),
            Self::Fp002 => {
                !line.trim().is_empty() && line.trim_end().chars().count() < SHORT_LINE_LIMIT
            }
            Self::Fp003 => count_char(line, 'a') >= 5,
            Self::Fn201 => count_char(line, 'z') > 3,
            Self::Fn202 => line.trim_end().is_empty(),
            Self::Fn203 => !line.trim().is_empty() && !ASCII_LETTER.is_match(line.trim_end()),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn count_char(line: &str, target: char) -> usize {
    line.chars().filter(|&c| c == target).count()
}

/// Ordered collection of rules with unique codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// All built-in rules in registration order
    pub fn all() -> Self {
        Self { rules: Rule::ALL.to_vec() }
    }

    /// Build a rule set from explicit rules, rejecting duplicates
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> LineRulesResult<Self> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();

        for rule in rules {
            if !seen.insert(rule) {
                return Err(LineRulesError::config(format!(
                    "Rule '{}' registered more than once",
                    rule.code()
                )));
            }
            ordered.push(rule);
        }

        Ok(Self { rules: ordered })
    }

    /// Copy of this set with the given codes removed, order preserved
    pub fn without<S: AsRef<str>>(&self, codes: &[S]) -> LineRulesResult<Self> {
        let mut removed = HashSet::new();

        for code in codes {
            let code = code.as_ref();
            let rule = Rule::from_code(code)
                .ok_or_else(|| LineRulesError::config(format!("Unknown rule code '{code}'")))?;
            if !removed.insert(rule) {
                tracing::warn!("Rule '{}' listed more than once", code);
            }
        }

        Ok(Self { rules: self.rules.iter().copied().filter(|r| !removed.contains(r)).collect() })
    }

    /// Restartable iterator over the rules in registration order
    pub fn iter(&self) -> impl Iterator<Item = Rule> + '_ {
        self.rules.iter().copied()
    }

    /// Look up a rule in this set by code
    pub fn get(&self, code: &str) -> Option<Rule> {
        self.iter().find(|rule| rule.code() == code)
    }

    /// Rule codes in registration order
    pub fn codes(&self) -> Vec<&'static str> {
        self.iter().map(Rule::code).collect()
    }

    /// Codes of every rule in this set that matches the line, in order
    pub fn matching_codes(&self, line: &str) -> Vec<&'static str> {
        self.iter().filter(|rule| rule.matches(line)).map(Rule::code).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = Rule;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Rule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter().copied()
    }
}
