//! Proof lines and the event log.

use std::fmt;

use nde_parser::{Formula, Input, Rule};

use crate::scope::ScopeId;

/// A reference to earlier work, as cited by a rule application.
/// Indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Citation {
    Line(usize),
    Box { start: usize, end: usize },
}

impl Citation {
    /// The citation an input makes, if any. Inline formulas cite nothing.
    pub fn of(input: &Input) -> Option<Citation> {
        match input {
            Input::Line(n) => Some(Citation::Line(*n)),
            Input::Box { start, end } => Some(Citation::Box {
                start: *start,
                end: *end,
            }),
            Input::Formula(_) => None,
        }
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Citation::Line(n) => write!(f, "{}", n + 1),
            Citation::Box { start, end } => write!(f, "{}-{}", start + 1, end + 1),
        }
    }
}

/// How a line was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Justification {
    Premise,
    Assumption,
    Rule { rule: Rule, citations: Vec<Citation> },
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Justification::Premise => f.write_str("premise"),
            Justification::Assumption => f.write_str("assumption"),
            Justification::Rule { rule, citations } => {
                f.write_str(rule.name())?;
                for (i, citation) in citations.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{}{}", sep, citation)?;
                }
                Ok(())
            }
        }
    }
}

/// One accepted row of the proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub formula: Formula,
    pub justification: Justification,
    /// Box that was active when the line was added (`None` at top level).
    pub scope: Option<ScopeId>,
}

/// Chronological record of everything that shaped the proof. Box
/// boundaries are not lines, but a renderer needs them to draw subproofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Open,
    Close,
    /// The line at this index was appended.
    Line(usize),
}
