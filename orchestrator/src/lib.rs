// orchestrator/src/lib.rs — Session pipeline
//
// One session owns one proof. Each input line runs the same pipeline:
//   1. skip blank lines and `#` comments
//   2. parse: text → Command
//   3. dispatch the command to the proof
// The returned `Outcome` tells a front end what changed, so the REPL and the
// batch checker share every step except printing.

pub mod display;

use nde_parser::{is_blank_or_comment, parse_command, Command, ParseError};
use nde_proof::{Line, Proof, ProofError};
use tracing::{debug, info};

/// Why a command was rejected. The proof is unchanged in every case.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("\"{command}\", unable to apply rule: {source}")]
    Rule {
        command: String,
        #[source]
        source: ProofError,
    },

    #[error("{0}")]
    Proof(#[from] ProofError),
}

/// What a successfully executed command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank line or comment.
    Skipped,
    /// A line was appended at this index.
    Line(usize),
    Opened,
    Closed,
    /// The last line was removed.
    Undone(Line),
    /// A LaTeX document to be written to `NAME.tex`.
    Exported { name: String, document: String },
}

#[derive(Debug, Default)]
pub struct Session {
    proof: Proof,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn proof(&self) -> &Proof {
        &self.proof
    }

    /// Number the next line will get (1-based).
    pub fn next_line_number(&self) -> usize {
        self.proof.len() + 1
    }

    /// Run one line of input.
    pub fn execute(&mut self, input: &str) -> Result<Outcome, SessionError> {
        if is_blank_or_comment(input) {
            return Ok(Outcome::Skipped);
        }

        let command = parse_command(input).inspect_err(|err| {
            debug!(%err, "parse failed");
        })?;
        debug!(%command, "executing");

        let outcome = match command {
            Command::Presume(formula) => Outcome::Line(self.proof.premise(formula)),
            Command::Assume(formula) => Outcome::Line(self.proof.assume(formula)?),
            Command::Open => {
                self.proof.open();
                Outcome::Opened
            }
            Command::Close => {
                self.proof.close()?;
                Outcome::Closed
            }
            Command::Apply(application) => {
                let index = self
                    .proof
                    .apply(application)
                    .map_err(|source| SessionError::Rule {
                        command: input.trim().to_string(),
                        source,
                    })?;
                Outcome::Line(index)
            }
            Command::Undo => Outcome::Undone(self.proof.undo()?),
            Command::Export(name) => {
                let document = nde_tex::render(&self.proof);
                info!(%name, lines = self.proof.len(), "proof exported");
                Outcome::Exported { name, document }
            }
        };
        Ok(outcome)
    }

    /// Text a terminal front end echoes for `outcome`, if any.
    pub fn describe(&self, outcome: &Outcome, column: usize) -> Option<String> {
        match outcome {
            Outcome::Line(index) => display::line_row(&self.proof, *index, column),
            // Opened: the gutter belongs to the enclosing box.
            Outcome::Opened => Some(display::gutter(None, self.proof.depth().saturating_sub(1))),
            Outcome::Closed => Some(display::gutter(None, self.proof.depth())),
            Outcome::Skipped | Outcome::Undone(_) | Outcome::Exported { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nde_parser::Formula;

    #[test]
    fn comments_and_blanks_are_skipped() {
        let mut session = Session::new();
        assert_eq!(session.execute(""), Ok(Outcome::Skipped));
        assert_eq!(session.execute("  # a note"), Ok(Outcome::Skipped));
        assert!(session.proof().is_empty());
    }

    #[test]
    fn presume_appends_a_line() {
        let mut session = Session::new();
        assert_eq!(session.execute("presume p ^ q"), Ok(Outcome::Line(0)));
        assert_eq!(session.next_line_number(), 2);
    }

    #[test]
    fn parse_errors_pass_through() {
        let mut session = Session::new();
        let err = session.execute("presume p ^").unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
        assert!(session.proof().is_empty());
    }

    #[test]
    fn rule_errors_quote_the_command() {
        let mut session = Session::new();
        session.execute("presume p").unwrap();
        let err = session.execute("  apply ^e1 1 ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"apply ^e1 1\", unable to apply rule: line 1 is not a conjunction"
        );
    }

    #[test]
    fn scope_errors_are_plain() {
        let mut session = Session::new();
        assert_eq!(session.execute("close").unwrap_err().to_string(), "no boxes to close");
        assert_eq!(session.execute("undo").unwrap_err().to_string(), "nothing to undo");
    }

    #[test]
    fn undo_returns_the_removed_line() {
        let mut session = Session::new();
        session.execute("presume p").unwrap();
        match session.execute("undo").unwrap() {
            Outcome::Undone(line) => assert_eq!(line.formula, Formula::atom("p")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn export_renders_current_proof() {
        let mut session = Session::new();
        session.execute("presume p").unwrap();
        match session.execute("export notes").unwrap() {
            Outcome::Exported { name, document } => {
                assert_eq!(name, "notes");
                assert!(document.contains("p & premise"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn describe_boxes() {
        let mut session = Session::new();
        let opened = session.execute("open").unwrap();
        assert_eq!(session.describe(&opened, 80).as_deref(), Some("      "));
        let line = session.execute("assume p").unwrap();
        assert_eq!(
            session.describe(&line, 14).as_deref(),
            Some("   1. | p    assumption")
        );
        let closed = session.execute("close").unwrap();
        assert_eq!(session.describe(&closed, 80).as_deref(), Some("      "));
    }
}
