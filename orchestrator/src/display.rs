//! Plain-text rendering of proof rows for terminal front ends.
//!
//! A row is a gutter (line number and one `| ` per enclosing box), the
//! formula, and the justification starting at a fixed annotation column.

use std::fmt::Write;

use nde_proof::Proof;

/// Column (1-based) at which justifications start unless told otherwise.
pub const DEFAULT_ANNOTATION_COLUMN: usize = 80;

const BOX_RULE: &str = "| ";

/// Gutter for a numbered line, or a blank one for box boundaries.
pub fn gutter(number: Option<usize>, depth: usize) -> String {
    let mut out = String::with_capacity(6 + BOX_RULE.len() * depth);
    match number {
        Some(n) => {
            let _ = write!(out, "{:>4}. ", n);
        }
        None => out.push_str("      "),
    }
    for _ in 0..depth {
        out.push_str(BOX_RULE);
    }
    out
}

/// Join `left` and `annotation` so the annotation starts at `column`.
/// At least one space separates them when `left` is too wide.
pub fn row(left: &str, annotation: &str, column: usize) -> String {
    let width = left.chars().count();
    let pad = column.saturating_sub(1).saturating_sub(width).max(1);
    if annotation.is_empty() {
        return left.to_string();
    }
    format!("{left}{:pad$}{annotation}", "")
}

/// Full row for line `index` of `proof`.
pub fn line_row(proof: &Proof, index: usize, column: usize) -> Option<String> {
    let line = proof.line(index)?;
    let depth = proof.scopes().depth_of(line.scope);
    let left = format!("{}{}", gutter(Some(index + 1), depth), line.formula);
    Some(row(&left, &line.justification.to_string(), column))
}
