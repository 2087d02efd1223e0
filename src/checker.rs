//! Checking analyzer result dumps against expected values.
//!
//! A result dump has one `<identifier> -> <value>` pair per line. Values are either printed
//! concrete values or one of the lattice tokens `top` and `bottom`.
//!
//! The checker scans lines in order with two states:
//!
//! - [`State::Scanning`]: every `bottom` value produces a warning. When the target identifier
//!   shows up, its value is compared with the expected one and the checker moves to
//!   [`State::Done`]. A `top` value always ends the check as "sound", whatever was expected.
//! - [`State::Done`]: no further lines are read, so only the first occurrence of the target counts.
//!
//! Without a target, the whole dump is scanned for `bottom` values only.

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;

use crate::directive::split_lines;
use crate::error::{Error, Result};

/// Lattice top.
pub const TOP: &str = "top";
/// Lattice bottom.
pub const BOTTOM: &str = "bottom";

/// One line of a result dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub identifier: String,
    pub value: String,
}

impl ResultEntry {
    pub fn new(identifier: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            value: value.into(),
        }
    }

    /// Parses `<identifier> -> <value>`; `line` is the 1-based line number used in errors.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let (identifier, value) = text.split_once("->").ok_or_else(|| Error::MissingSeparator {
            line,
            text: text.trim_end().to_string(),
        })?;
        Ok(Self::new(identifier.trim(), value.trim()))
    }

    pub fn is_top(&self) -> bool {
        self.value == TOP
    }

    pub fn is_bottom(&self) -> bool {
        self.value == BOTTOM
    }
}

/// The identifier to look for and the value it should have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub target: String,
    pub expected: String,
}

impl Expectation {
    pub fn new(target: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            expected: expected.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    Scanning,
    Done,
}

/// A finding reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Some identifier is bottom.
    Bottom { identifier: String },
    /// The target is top: sound, but not the precision that was asked for.
    TopOverride { identifier: String, expected: String },
    /// The target has the expected value.
    Match { identifier: String, value: String },
    /// The target has some other value.
    Mismatch {
        identifier: String,
        actual: String,
        expected: String,
    },
    /// The target never appeared.
    TargetMissing { target: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Bottom { identifier } => {
                write!(f, "warning: {} is bottom (unreachable, or the analysis lost it)", identifier)
            }
            Diagnostic::TopOverride { identifier, expected } => write!(
                f,
                "{} is top: sound, but possibly not what was intended (expected {})",
                identifier, expected
            ),
            Diagnostic::Match { identifier, value } => write!(f, "ok: {} -> {}", identifier, value),
            Diagnostic::Mismatch {
                identifier,
                actual,
                expected,
            } => write!(f, "FAIL: {} -> {}, expected {}", identifier, actual, expected),
            Diagnostic::TargetMissing { target } => write!(f, "FAIL: {} does not appear in the results", target),
        }
    }
}

/// Overall outcome of a check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No target was given.
    Unchecked,
    Pass,
    /// The target is top.
    Sound,
    Fail,
    Missing,
}

impl Verdict {
    pub fn is_failure(self) -> bool {
        matches!(self, Verdict::Fail | Verdict::Missing)
    }
}

/// Diagnostics of a finished check, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
    pub entries_scanned: usize,
}

impl Report {
    pub fn verdict(&self) -> Verdict {
        self.diagnostics
            .iter()
            .rev()
            .find_map(|d| match d {
                Diagnostic::Bottom { .. } => None,
                Diagnostic::TopOverride { .. } => Some(Verdict::Sound),
                Diagnostic::Match { .. } => Some(Verdict::Pass),
                Diagnostic::Mismatch { .. } => Some(Verdict::Fail),
                Diagnostic::TargetMissing { .. } => Some(Verdict::Missing),
            })
            .unwrap_or(Verdict::Unchecked)
    }

    pub fn bottoms(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Bottom { identifier } => Some(identifier.as_str()),
            _ => None,
        })
    }
}

/// Line-by-line state machine.
#[derive(Debug)]
pub struct Checker {
    expectation: Option<Expectation>,
    state: State,
    report: Report,
}

impl Checker {
    pub fn new(expectation: Option<Expectation>) -> Self {
        Self {
            expectation,
            state: State::Scanning,
            report: Report::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Feeds one entry. Entries fed after the checker is done are ignored.
    pub fn step(&mut self, entry: &ResultEntry) -> State {
        if self.state == State::Done {
            return State::Done;
        }
        self.report.entries_scanned += 1;

        if entry.is_bottom() {
            self.report.diagnostics.push(Diagnostic::Bottom {
                identifier: entry.identifier.clone(),
            });
        }

        if let Some(exp) = &self.expectation {
            if entry.identifier == exp.target {
                let diagnostic = if entry.is_top() {
                    Diagnostic::TopOverride {
                        identifier: entry.identifier.clone(),
                        expected: exp.expected.clone(),
                    }
                } else if entry.value == exp.expected {
                    Diagnostic::Match {
                        identifier: entry.identifier.clone(),
                        value: entry.value.clone(),
                    }
                } else {
                    Diagnostic::Mismatch {
                        identifier: entry.identifier.clone(),
                        actual: entry.value.clone(),
                        expected: exp.expected.clone(),
                    }
                };
                debug!("target found: {:?}", diagnostic);
                self.report.diagnostics.push(diagnostic);
                self.state = State::Done;
            }
        }

        self.state
    }

    pub fn finish(mut self) -> Report {
        if let (Some(exp), State::Scanning) = (&self.expectation, self.state) {
            self.report.diagnostics.push(Diagnostic::TargetMissing {
                target: exp.target.clone(),
            });
        }
        self.report
    }
}

/// Checks result lines. Blank lines are skipped; lines after the target are never parsed.
pub fn check<'a>(lines: impl IntoIterator<Item = &'a str>, expectation: Option<Expectation>) -> Result<Report> {
    let mut checker = Checker::new(expectation);
    for (i, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry = ResultEntry::parse(line, i + 1)?;
        if checker.step(&entry) == State::Done {
            break;
        }
    }
    Ok(checker.finish())
}

/// Reads `path` and checks it.
pub fn check_file(path: impl AsRef<Path>, expectation: Option<Expectation>) -> Result<Report> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    check(split_lines(&text), expectation)
}
