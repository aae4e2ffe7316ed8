// proof/src/state.rs — Proof state machine
//
// Lines are append-only (undo truncates the last one). Boxes are pushed by
// `open` and popped by `close` but never discarded. Every operation either
// succeeds completely or leaves lines, boxes and the event log untouched.

use nde_parser::{Application, Formula};
use tracing::{debug, trace};

use crate::error::{ProofError, Result};
use crate::line::{Citation, Event, Justification, Line};
use crate::rules;
use crate::scope::{ScopeId, ScopeTree};

/// A natural deduction proof under construction.
#[derive(Debug, Clone, Default)]
pub struct Proof {
    lines: Vec<Line>,
    scopes: ScopeTree,
    events: Vec<Event>,
    /// Reason the most recent rule application failed.
    diagnostic: Option<String>,
}

impl Proof {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Accessors ────────────────────────────────────────────

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn last_line(&self) -> Option<&Line> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Number of open boxes around the next line.
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Deepest box nesting of any line.
    pub fn max_depth(&self) -> usize {
        self.lines
            .iter()
            .map(|line| self.scopes.depth_of(line.scope))
            .max()
            .unwrap_or(0)
    }

    // ─── Visibility ───────────────────────────────────────────

    /// True if the next line is the first of the innermost open box (or of
    /// the whole proof, when no box is open).
    pub fn at_beginning_of_scope(&self) -> bool {
        match self.scopes.active_scope() {
            Some(scope) => scope.start == self.lines.len(),
            None => self.lines.is_empty(),
        }
    }

    /// A line may be cited if it exists and its box is still open around the
    /// current position (or it is at top level).
    pub fn can_reference_line(&self, index: usize) -> bool {
        match self.lines.get(index) {
            Some(line) => self.scopes.is_visible(line.scope),
            None => false,
        }
    }

    /// A closed box may be cited wherever a line in its parent box could be.
    pub fn can_reference_box(&self, start: usize, end: usize) -> bool {
        self.box_with_range(start, end)
            .map(|id| self.scopes.is_visible(self.scopes.get(id).parent))
            .unwrap_or(false)
    }

    /// The closed box spanning exactly `[start, end]`, found from the box
    /// recorded on line `start`. Every line in the range must lie inside
    /// that box; after an undo, a box's range can hold lines of other boxes.
    pub fn box_with_range(&self, start: usize, end: usize) -> Option<ScopeId> {
        if end < start || end >= self.lines.len() {
            return None;
        }
        let id = self.scopes.find_box(self.lines[start].scope, start, end)?;
        let contained = self.lines[start..=end]
            .iter()
            .all(|line| self.scopes.ancestors(line.scope).any(|a| a == id));
        contained.then_some(id)
    }

    /// Formula of a visible line.
    pub(crate) fn visible_line(&self, index: usize) -> Result<&Formula> {
        if !self.can_reference_line(index) {
            trace!(line = index + 1, "line reference rejected");
            return Err(ProofError::LineNotVisible(index));
        }
        Ok(&self.lines[index].formula)
    }

    /// First and last formulas of a visible box.
    pub(crate) fn visible_box(&self, start: usize, end: usize) -> Result<(&Formula, &Formula)> {
        if !self.can_reference_box(start, end) {
            trace!(start = start + 1, end = end + 1, "box reference rejected");
            return Err(ProofError::BoxNotVisible { start, end });
        }
        Ok((&self.lines[start].formula, &self.lines[end].formula))
    }

    // ─── Operations ───────────────────────────────────────────

    fn push_line(&mut self, formula: Formula, justification: Justification) -> usize {
        let index = self.lines.len();
        debug!(line = index + 1, %formula, %justification, "line added");
        self.lines.push(Line {
            formula,
            justification,
            scope: self.scopes.active(),
        });
        self.events.push(Event::Line(index));
        index
    }

    /// Add a premise. Returns its index.
    pub fn premise(&mut self, formula: Formula) -> usize {
        self.push_line(formula, Justification::Premise)
    }

    /// Add an assumption; only allowed as the first line of a box.
    pub fn assume(&mut self, formula: Formula) -> Result<usize> {
        if !self.at_beginning_of_scope() {
            return Err(ProofError::AssumptionNotAtStart);
        }
        Ok(self.push_line(formula, Justification::Assumption))
    }

    /// Open a box at the current position.
    pub fn open(&mut self) -> ScopeId {
        let id = self.scopes.push(self.lines.len());
        self.events.push(Event::Open);
        debug!(start = self.lines.len() + 1, depth = self.depth(), "box opened");
        id
    }

    /// Close the innermost open box.
    pub fn close(&mut self) -> Result<ScopeId> {
        let id = self
            .scopes
            .pop(self.lines.len())
            .ok_or(ProofError::NoOpenBox)?;
        self.events.push(Event::Close);
        debug!(depth = self.depth(), "box closed");
        Ok(id)
    }

    /// Apply an inference rule. Inline formula inputs are moved into the
    /// new line. On failure the reason is also kept in [`Proof::diagnostic`].
    pub fn apply(&mut self, application: Application) -> Result<usize> {
        self.diagnostic = None;

        let rule = application.rule;
        let citations: Vec<Citation> = application.inputs.iter().filter_map(Citation::of).collect();

        match rules::derive(self, rule, application.inputs) {
            Ok(formula) => Ok(self.push_line(formula, Justification::Rule { rule, citations })),
            Err(err) => {
                debug!(%rule, error = %err, "rule rejected");
                self.diagnostic = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Remove the most recent line. Boxes are not reopened or retracted,
    /// even if one becomes empty.
    pub fn undo(&mut self) -> Result<Line> {
        let line = self.lines.pop().ok_or(ProofError::NothingToUndo)?;
        if let Some(pos) = self.events.iter().rposition(|e| matches!(e, Event::Line(_))) {
            self.events.remove(pos);
        }
        debug!(remaining = self.lines.len(), "line undone");
        Ok(line)
    }
}
