//! Failures of proof operations.
//!
//! Every variant is recoverable: the proof is left exactly as it was before
//! the failing call. Line numbers in messages are 1-based, as the user typed
//! them.

/// Why a proof operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProofError {
    // ─── Input shape ────────────────────────────────────────────
    #[error("invalid rule inputs")]
    InvalidInputs,

    // ─── Visibility ─────────────────────────────────────────────
    #[error("line {} is not visible here", .0 + 1)]
    LineNotVisible(usize),

    #[error("box {}-{} is not visible here", .start + 1, .end + 1)]
    BoxNotVisible { start: usize, end: usize },

    // ─── Structure ──────────────────────────────────────────────
    #[error("line {} is not {expected}", .line + 1)]
    WrongShape { line: usize, expected: &'static str },

    #[error("lines {} and {} do not match", .left + 1, .right + 1)]
    Mismatch { left: usize, right: usize },

    // ─── Scope discipline ───────────────────────────────────────
    #[error("no boxes to close")]
    NoOpenBox,

    #[error("assumption must appear at beginning of box")]
    AssumptionNotAtStart,

    #[error("nothing to undo")]
    NothingToUndo,
}

/// Broad classes of [`ProofError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInputs,
    Visibility,
    StructuralMismatch,
    ScopeDiscipline,
}

impl ProofError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProofError::InvalidInputs => ErrorKind::InvalidInputs,
            ProofError::LineNotVisible(_) | ProofError::BoxNotVisible { .. } => {
                ErrorKind::Visibility
            }
            ProofError::WrongShape { .. } | ProofError::Mismatch { .. } => {
                ErrorKind::StructuralMismatch
            }
            ProofError::NoOpenBox
            | ProofError::AssumptionNotAtStart
            | ProofError::NothingToUndo => ErrorKind::ScopeDiscipline,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProofError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_use_one_based_lines() {
        assert_eq!(ProofError::LineNotVisible(2).to_string(), "line 3 is not visible here");
        assert_eq!(
            ProofError::BoxNotVisible { start: 1, end: 3 }.to_string(),
            "box 2-4 is not visible here"
        );
        assert_eq!(
            ProofError::WrongShape { line: 0, expected: "a conjunction" }.to_string(),
            "line 1 is not a conjunction"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(ProofError::Mismatch { left: 0, right: 1 }.kind(), ErrorKind::StructuralMismatch);
        assert_eq!(ProofError::NoOpenBox.kind(), ErrorKind::ScopeDiscipline);
    }
}
