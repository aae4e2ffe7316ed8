// parser/src/lib.rs
//
// Text front end of the natural deduction engine. Pipeline:
//   1. Split the command keyword (and rule name) off the line
//   2. Lex the remainder (Logos DFA)
//   3. Parse formulas / input chains (recursive descent)
//
// The printer is the inverse direction: it renders formulas in the same
// vocabulary so printed output can be fed back in.

pub mod ast;
pub mod grammar;
pub mod lexer;
pub mod printer;
pub mod syntax;

pub use ast::{Application, Command, Formula, Input, Rule};
pub use grammar::{parse_command, parse_formula, ParseError};
pub use printer::{formula_to_string, write_formula, Notation};

/// True for lines the command interpreter ignores: blank lines and comments.
pub fn is_blank_or_comment(line: &str) -> bool {
    match line.trim_start().chars().next() {
        None => true,
        Some(c) => c == syntax::COMMENT,
    }
}
