//! Lesson validators.
//!
//! A validator judges a free-text submission against the requirements of a
//! lesson. Submissions are never compiled or executed: validators only look
//! for required substrings or patterns in the raw text, so every check is
//! pure and always terminates.
//!
//! Most validators are declarative [RuleSet]s. Checks which cannot be
//! expressed as a list of rules fall back to an injected [Predicate].

use std::{fmt, sync::Arc};

use itertools::Itertools;
use regex::Regex;
use strum_macros::Display;

/// Displayed when a submission passes its lesson's validator.
pub const MSG_PASS: &str = "Congratulations! You've completed the challenge.";

/// Displayed before the list of remediation hints when a submission fails.
pub const MSG_FAIL: &str = "The code didn't pass the test. Make sure you've \
                            included all necessary elements:";

/// Remediation hints used by validators which do not declare their own.
pub const HINTS_DEFAULT: [&str; 4] = [
    "Custom error enum with NameTooShort and NameTooLong",
    "Function signature returning Result<Vec<Symbol>, Error>",
    "Error checks for name length",
    "Correct return statement for successful case",
];

/// A single requirement a submission must meet.
#[derive(Clone, Debug)]
pub enum Rule {
    /// The submission contains `needle` verbatim.
    Contains { needle: String },
    /// The submission matches `pattern` somewhere.
    Matches { pattern: Regex },
}

impl Rule {
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains { needle: needle.into() }
    }

    pub fn matches(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Matches { pattern: Regex::new(pattern)? })
    }

    pub fn check(&self, submission: &str) -> bool {
        match self {
            Self::Contains { needle } => submission.contains(needle.as_str()),
            Self::Matches { pattern } => pattern.is_match(submission),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains { needle } => write!(f, "contains `{needle}`"),
            Self::Matches { pattern } => write!(f, "matches /{pattern}/"),
        }
    }
}

/// A declarative validator: a submission passes when it meets **every**
/// rule.
///
/// A set with no rules accepts anything. Curriculum files reject empty sets
/// at load time.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    hints: Vec<String>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules, hints: vec![] }
    }

    /// Shorthand for a set of [Rule::Contains] rules.
    pub fn contains_all<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(needles.into_iter().map(Rule::contains).collect())
    }

    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn check(&self, submission: &str) -> bool {
        self.rules.iter().all(|rule| rule.check(submission))
    }

    /// Remediation hints, falling back to [HINTS_DEFAULT] when none were
    /// declared.
    pub fn hints(&self) -> Vec<&str> {
        if self.hints.is_empty() {
            HINTS_DEFAULT.to_vec()
        } else {
            self.hints.iter().map(String::as_str).collect()
        }
    }
}

/// An injected check for requirements which are not expressible as a
/// [RuleSet].
///
/// The wrapped function must be pure: it may not capture mutable state or
/// perform I/O.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    check: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    hints: Vec<String>,
}

impl Predicate {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self { name: name.into(), check: Arc::new(check), hints: vec![] }
    }

    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, submission: &str) -> bool {
        (self.check)(submission)
    }

    pub fn hints(&self) -> Vec<&str> {
        if self.hints.is_empty() {
            HINTS_DEFAULT.to_vec()
        } else {
            self.hints.iter().map(String::as_str).collect()
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub enum Validator {
    Rules(RuleSet),
    Predicate(Predicate),
}

impl Validator {
    pub fn check(&self, submission: &str) -> bool {
        match self {
            Self::Rules(rules) => rules.check(submission),
            Self::Predicate(predicate) => predicate.check(submission),
        }
    }

    pub fn hints(&self) -> Vec<&str> {
        match self {
            Self::Rules(rules) => rules.hints(),
            Self::Predicate(predicate) => predicate.hints(),
        }
    }

    /// Compares `submission` against this validator, producing a [Verdict]
    /// with every remediation hint on failure.
    pub fn verdict(&self, submission: &str) -> Verdict {
        if self.check(submission) {
            Verdict::Pass
        } else {
            Verdict::Fail {
                hints: self.hints().into_iter().map(String::from).collect(),
            }
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules(rules) => {
                write!(f, "{}", rules.rules().iter().join(" and "))
            }
            Self::Predicate(predicate) => {
                write!(f, "predicate `{}`", predicate.name())
            }
        }
    }
}

impl From<RuleSet> for Validator {
    fn from(rules: RuleSet) -> Self {
        Self::Rules(rules)
    }
}

impl From<Predicate> for Validator {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

/// Outcome of a submission. Failures carry all remediation hints, which are
/// meant to be displayed together.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum Verdict {
    Pass,
    Fail { hints: Vec<String> },
}
