// proof/src/lib.rs
//
// Proof engine for propositional natural deduction. A proof is a sequence of
// lines (premises, assumptions, rule conclusions) interleaved with boxes
// (subproofs). The engine enforces:
//   - assumptions only open a box
//   - citations only reach lines and closed boxes that are still in scope
//   - each rule's structural pattern
// Every operation is all-or-nothing.

pub mod error;
pub mod line;
mod rules;
pub mod scope;
pub mod state;

pub use error::{ErrorKind, ProofError, Result};
pub use line::{Citation, Event, Justification, Line};
pub use scope::{Scope, ScopeId, ScopeTree};
pub use state::Proof;
