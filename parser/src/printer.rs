// parser/src/printer.rs — Formula printing
//
// One printer serves every surface (REPL, scripts, LaTeX); a `Notation`
// supplies the operator spellings. Binary subformulas are parenthesized when
// they bind no tighter than their parent, so `p ^ (q ^ r)` and
// `(p => q) => r` keep their explicit grouping and the wire output re-parses
// to the same tree, as long as its parenthesis and binary-operator nesting
// stays within the grammar's depth limit. Negation runs are not limited.

use std::fmt;

use crate::ast::Formula;
use crate::syntax;

/// Operator spellings for one output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notation {
    pub not: &'static str,
    pub and: &'static str,
    pub or: &'static str,
    pub implies: &'static str,
    pub contradiction: &'static str,
}

impl Notation {
    /// The command-line vocabulary.
    pub const WIRE: Notation = Notation {
        not: syntax::NOT,
        and: syntax::AND,
        or: syntax::OR,
        implies: syntax::IMPLIES,
        contradiction: syntax::CONTRADICTION,
    };
}

/// Write `form` to `out` using `notation`.
pub fn write_formula<W: fmt::Write + ?Sized>(
    out: &mut W,
    form: &Formula,
    notation: &Notation,
) -> fmt::Result {
    match form {
        Formula::Not(inner) => {
            out.write_str(notation.not)?;
            write_operand(out, inner, form.precedence(), notation)
        }
        Formula::And(l, r) => write_binary(out, l, notation.and, r, form.precedence(), notation),
        Formula::Or(l, r) => write_binary(out, l, notation.or, r, form.precedence(), notation),
        Formula::Implies(l, r) => {
            write_binary(out, l, notation.implies, r, form.precedence(), notation)
        }
        Formula::Contradiction => out.write_str(notation.contradiction),
        Formula::Atom(name) => out.write_str(name),
    }
}

/// Render `form` into a fresh string.
pub fn formula_to_string(form: &Formula, notation: &Notation) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_formula(&mut out, form, notation);
    out
}

fn write_binary<W: fmt::Write + ?Sized>(
    out: &mut W,
    left: &Formula,
    op: &str,
    right: &Formula,
    prec: u8,
    notation: &Notation,
) -> fmt::Result {
    write_operand(out, left, prec, notation)?;
    write!(out, " {} ", op)?;
    write_operand(out, right, prec, notation)
}

fn write_operand<W: fmt::Write + ?Sized>(
    out: &mut W,
    operand: &Formula,
    parent_prec: u8,
    notation: &Notation,
) -> fmt::Result {
    if operand.is_binary() && operand.precedence() <= parent_prec {
        out.write_char('(')?;
        write_formula(out, operand, notation)?;
        out.write_char(')')
    } else {
        write_formula(out, operand, notation)
    }
}
