// parser/src/grammar.rs — Recursive descent parser for proof commands
//
// A command line is a keyword word, optionally a rule-name word, and a
// remainder that is lexed into formula/input tokens.
//
//   command  → presume formula | assume formula | open | close | undo
//            | export NAME | apply RULE inputs?
//   inputs   → input (',' input)*
//   input    → NUMBER ('-' NUMBER)? | formula
//   formula  → andor ('=>' formula)?          (right-associative)
//   andor    → unit (('^' | '/') andor)?      (one shared level, right chain)
//   unit     → NAME | '_|_' | '(' formula ')' | '-' unit
//
// Conjunction and disjunction deliberately share a precedence level:
// `p ^ q / r` is `p ^ (q / r)` and `p / q ^ r` is `p / (q ^ r)`.

use crate::ast::*;
use crate::lexer::{tokenize, Lexeme, Token};
use crate::syntax::keyword;

/// Maximum recursion depth to prevent stack overflow on pathological input.
const MAX_DEPTH: usize = 128;

/// Syntax error with the byte position it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (column {})", .position + 1)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Recursive descent parser over one lexed formula or input chain.
pub struct Parser<'a> {
    tokens: &'a [Lexeme<'a>],
    pos: usize,
    depth: usize,
    /// Byte offset reported for errors at end of input.
    end: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Lexeme<'a>], end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            end,
        }
    }

    // ─── Depth guard ──────────────────────────────────────────

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(self.error("maximum nesting depth exceeded"))
        } else {
            Ok(())
        }
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ─── Token inspection ─────────────────────────────────────

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|l| l.token)
    }

    fn peek_is(&self, token: Token) -> bool {
        self.peek() == Some(token)
    }

    fn advance(&mut self) -> Option<&'a Lexeme<'a>> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    /// Consume `token` if it is next. Returns true if consumed.
    fn eat(&mut self, token: Token) -> bool {
        if self.peek_is(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, message: &str) -> ParseError {
        let position = self
            .tokens
            .get(self.pos)
            .map_or(self.end, |l| l.offset);
        ParseError::new(message, position)
    }

    /// Fail unless every token has been consumed.
    pub fn expect_end(&self) -> Result<(), ParseError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("trailing tokens"))
        }
    }

    // ─── Formulas ─────────────────────────────────────────────

    /// formula → andor ('=>' formula)?
    pub fn parse_formula(&mut self) -> Result<Formula, ParseError> {
        self.enter()?;
        let result = self.parse_implication();
        self.leave();
        result
    }

    fn parse_implication(&mut self) -> Result<Formula, ParseError> {
        let lhs = self.parse_andor()?;
        if self.eat(Token::Implies) {
            let rhs = self.parse_formula()?;
            return Ok(Formula::implies(lhs, rhs));
        }
        Ok(lhs)
    }

    /// andor → unit (('^' | '/') andor)?
    fn parse_andor(&mut self) -> Result<Formula, ParseError> {
        self.enter()?;
        let result = self.parse_andor_inner();
        self.leave();
        result
    }

    fn parse_andor_inner(&mut self) -> Result<Formula, ParseError> {
        let lhs = self.parse_unit()?;
        if self.eat(Token::And) {
            let rhs = self.parse_andor()?;
            return Ok(Formula::and(lhs, rhs));
        }
        if self.eat(Token::Or) {
            let rhs = self.parse_andor()?;
            return Ok(Formula::or(lhs, rhs));
        }
        Ok(lhs)
    }

    /// unit → NAME | '_|_' | '(' formula ')' | '-' unit
    fn parse_unit(&mut self) -> Result<Formula, ParseError> {
        self.enter()?;
        let result = self.parse_unit_inner();
        self.leave();
        result
    }

    fn parse_unit_inner(&mut self) -> Result<Formula, ParseError> {
        match self.peek() {
            Some(Token::Name) => {
                let lexeme = self.advance().ok_or_else(|| self.error("expected name"))?;
                Formula::try_atom(lexeme.text)
                    .ok_or_else(|| ParseError::new("syntax error in formula", lexeme.offset))
            }
            Some(Token::Contradiction) => {
                self.pos += 1;
                Ok(Formula::Contradiction)
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let inner = self.parse_formula()?;
                if !self.eat(Token::RParen) {
                    return Err(self.error("syntax error in formula: expected ')'"));
                }
                Ok(inner)
            }
            Some(Token::Not) => {
                // A run of negations is folded in a loop, so it costs one
                // level of depth however long it is.
                let mut negations = 0usize;
                while self.eat(Token::Not) {
                    negations += 1;
                }
                let mut form = self.parse_unit()?;
                for _ in 0..negations {
                    form = Formula::not(form);
                }
                Ok(form)
            }
            Some(_) => Err(self.error("syntax error in formula")),
            None => Err(self.error("syntax error in formula: unexpected end of input")),
        }
    }

    // ─── Rule inputs ──────────────────────────────────────────

    /// inputs → input (',' input)*
    pub fn parse_inputs(&mut self) -> Result<Vec<Input>, ParseError> {
        let mut inputs = vec![self.parse_input()?];
        while self.eat(Token::Comma) {
            inputs.push(self.parse_input()?);
        }
        Ok(inputs)
    }

    /// input → NUMBER ('-' NUMBER)? | formula
    fn parse_input(&mut self) -> Result<Input, ParseError> {
        if !self.peek_is(Token::Number) {
            return self.parse_formula().map(Input::Formula);
        }

        let start = self.parse_line_number()?;
        if !self.eat(Token::Not) {
            return Ok(Input::Line(start));
        }
        if !self.peek_is(Token::Number) {
            return Err(self.error("invalid rule input syntax: expected line number"));
        }
        let end = self.parse_line_number()?;
        Ok(Input::Box { start, end })
    }

    /// Consume a 1-based line number and return it 0-based.
    fn parse_line_number(&mut self) -> Result<usize, ParseError> {
        let lexeme = self
            .advance()
            .ok_or_else(|| self.error("expected line number"))?;
        let n: usize = lexeme
            .text
            .parse()
            .map_err(|_| ParseError::new("line number too large", lexeme.offset))?;
        n.checked_sub(1)
            .ok_or_else(|| ParseError::new("line numbers start at 1", lexeme.offset))
    }
}

// ─── Command level ───────────────────────────────────────────────

/// Split the next whitespace-delimited word off `text[from..]`.
/// Returns the word (empty at end of input) and the offset just past it.
fn next_word(text: &str, from: usize) -> (&str, usize) {
    let rest = &text[from..];
    let skipped = rest.len() - rest.trim_start().len();
    let start = from + skipped;
    let len = text[start..]
        .find(char::is_whitespace)
        .unwrap_or(text.len() - start);
    (&text[start..start + len], start + len)
}

/// Parse the remainder `text[from..]` as a complete formula.
fn parse_formula_rest(text: &str, from: usize) -> Result<Formula, ParseError> {
    let tokens = tokenize(&text[from..], from)?;
    let mut parser = Parser::new(&tokens, text.len());
    let formula = parser.parse_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

fn expect_no_rest(text: &str, from: usize) -> Result<(), ParseError> {
    let (word, _) = next_word(text, from);
    if word.is_empty() {
        Ok(())
    } else {
        let position = text.len() - text[from..].trim_start().len();
        Err(ParseError::new("trailing tokens", position))
    }
}

/// Parse one command line.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let (word, after) = next_word(line, 0);
    if word.is_empty() {
        return Err(ParseError::new("empty input", 0));
    }

    match word {
        keyword::PRESUME => parse_formula_rest(line, after).map(Command::Presume),
        keyword::ASSUME => parse_formula_rest(line, after).map(Command::Assume),
        keyword::OPEN => expect_no_rest(line, after).map(|_| Command::Open),
        keyword::CLOSE => expect_no_rest(line, after).map(|_| Command::Close),
        keyword::UNDO => expect_no_rest(line, after).map(|_| Command::Undo),
        keyword::EXPORT => {
            let (name, after_name) = next_word(line, after);
            if name.is_empty() {
                return Err(ParseError::new("expected export name", line.len()));
            }
            expect_no_rest(line, after_name)?;
            Ok(Command::Export(name.to_string()))
        }
        keyword::APPLY => parse_application(line, after).map(Command::Apply),
        other => Err(ParseError::new(
            format!("unknown command {}", other),
            line.len() - line.trim_start().len(),
        )),
    }
}

fn parse_application(line: &str, from: usize) -> Result<Application, ParseError> {
    let (name, after) = next_word(line, from);
    if name.is_empty() {
        return Err(ParseError::new("expected rule name", line.len()));
    }
    let rule = Rule::from_name(name).ok_or_else(|| {
        ParseError::new(format!("unknown rule {}", name), after - name.len())
    })?;

    let tokens = tokenize(&line[after..], after)?;
    if tokens.is_empty() {
        return Ok(Application::new(rule, Vec::new()));
    }

    let mut parser = Parser::new(&tokens, line.len());
    let inputs = parser.parse_inputs()?;
    parser.expect_end()?;
    Ok(Application::new(rule, inputs))
}

/// Parse a standalone formula (used by tests and tooling).
pub fn parse_formula(text: &str) -> Result<Formula, ParseError> {
    parse_formula_rest(text, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Formula {
        Formula::atom("p")
    }
    fn q() -> Formula {
        Formula::atom("q")
    }
    fn r() -> Formula {
        Formula::atom("r")
    }

    #[test]
    fn test_atom() {
        assert_eq!(parse_formula("p").unwrap(), p());
        assert_eq!(parse_formula("  rain ").unwrap(), Formula::atom("rain"));
    }

    #[test]
    fn test_implication_is_right_associative() {
        let f = parse_formula("p => q => r").unwrap();
        assert_eq!(f, Formula::implies(p(), Formula::implies(q(), r())));
    }

    #[test]
    fn test_andor_share_level_right_chain() {
        assert_eq!(
            parse_formula("p ^ q / r").unwrap(),
            Formula::and(p(), Formula::or(q(), r()))
        );
        assert_eq!(
            parse_formula("p / q ^ r").unwrap(),
            Formula::or(p(), Formula::and(q(), r()))
        );
    }

    #[test]
    fn test_andor_binds_tighter_than_implication() {
        assert_eq!(
            parse_formula("p ^ q => r / p").unwrap(),
            Formula::implies(Formula::and(p(), q()), Formula::or(r(), p()))
        );
    }

    #[test]
    fn test_negation_applies_to_next_unit() {
        assert_eq!(
            parse_formula("-p ^ q").unwrap(),
            Formula::and(Formula::not(p()), q())
        );
        assert_eq!(
            parse_formula("-(p ^ q)").unwrap(),
            Formula::not(Formula::and(p(), q()))
        );
        assert_eq!(
            parse_formula("--p").unwrap(),
            Formula::not(Formula::not(p()))
        );
    }

    #[test]
    fn test_contradiction_literal() {
        assert_eq!(
            parse_formula("-_|_").unwrap(),
            Formula::not(Formula::Contradiction)
        );
    }

    #[test]
    fn test_parenthesized_left_implication() {
        assert_eq!(
            parse_formula("(p => q) => r").unwrap(),
            Formula::implies(Formula::implies(p(), q()), r())
        );
    }

    #[test]
    fn test_unbalanced_parens() {
        assert!(parse_formula("(p ^ q").is_err());
        let err = parse_formula("p ^ q)").unwrap_err();
        assert_eq!(err.message, "trailing tokens");
        assert_eq!(err.position, 5);
    }

    #[test]
    fn test_dangling_operator() {
        let err = parse_formula("p =>").unwrap_err();
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_depth_limit_does_not_crash() {
        let deep = format!("{}p{}", "(".repeat(500), ")".repeat(500));
        let err = parse_formula(&deep).unwrap_err();
        assert!(err.message.contains("depth"));
    }

    #[test]
    fn test_long_negation_chain_parses() {
        let mut expected = p();
        for _ in 0..500 {
            expected = Formula::not(expected);
        }
        let negs = format!("{}p", "-".repeat(500));
        assert_eq!(parse_formula(&negs).unwrap(), expected);
        assert_eq!(parse_formula(&expected.to_string()).unwrap(), expected);
    }

    #[test]
    fn test_negated_parens_still_count_depth() {
        let deep = format!("{}p{}", "-(".repeat(300), ")".repeat(300));
        let err = parse_formula(&deep).unwrap_err();
        assert!(err.message.contains("depth"));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command("open").unwrap(), Command::Open);
        assert_eq!(parse_command("  close ").unwrap(), Command::Close);
        assert_eq!(parse_command("undo").unwrap(), Command::Undo);
        assert_eq!(
            parse_command("export proof").unwrap(),
            Command::Export("proof".into())
        );
    }

    #[test]
    fn test_trailing_words_rejected() {
        assert_eq!(parse_command("open now").unwrap_err().message, "trailing tokens");
        assert!(parse_command("export a b").is_err());
        assert!(parse_command("presume p q").is_err());
    }

    #[test]
    fn test_presume_and_assume() {
        assert_eq!(
            parse_command("presume p => q").unwrap(),
            Command::Presume(Formula::implies(p(), q()))
        );
        assert_eq!(
            parse_command("assume -p").unwrap(),
            Command::Assume(Formula::not(p()))
        );
    }

    #[test]
    fn test_apply_inputs() {
        let cmd = parse_command("apply /e 1, 2-4, 5-7").unwrap();
        assert_eq!(
            cmd,
            Command::Apply(Application::new(
                Rule::OrElim,
                vec![
                    Input::Line(0),
                    Input::Box { start: 1, end: 3 },
                    Input::Box { start: 4, end: 6 },
                ]
            ))
        );
    }

    #[test]
    fn test_apply_inline_formula_inputs() {
        let cmd = parse_command("apply /i2 q ^ r, 1").unwrap();
        assert_eq!(
            cmd,
            Command::Apply(Application::new(
                Rule::OrIntro2,
                vec![Input::Formula(Formula::and(q(), r())), Input::Line(0)]
            ))
        );
        let lem = parse_command("apply LEM p => q").unwrap();
        assert_eq!(
            lem,
            Command::Apply(Application::new(
                Rule::ExcludedMiddle,
                vec![Input::Formula(Formula::implies(p(), q()))]
            ))
        );
    }

    #[test]
    fn test_apply_without_inputs() {
        assert_eq!(
            parse_command("apply copy").unwrap(),
            Command::Apply(Application::new(Rule::Copy, vec![]))
        );
    }

    #[test]
    fn test_apply_spaced_box() {
        let cmd = parse_command("apply =>i 2 - 3").unwrap();
        assert_eq!(
            cmd,
            Command::Apply(Application::new(
                Rule::ImpliesIntro,
                vec![Input::Box { start: 1, end: 2 }]
            ))
        );
    }

    #[test]
    fn test_line_zero_rejected() {
        let err = parse_command("apply copy 0").unwrap_err();
        assert_eq!(err.message, "line numbers start at 1");
        assert_eq!(err.position, 11);
    }

    #[test]
    fn test_unknown_rule_and_command() {
        assert_eq!(
            parse_command("apply ->e 1, 2").unwrap_err().message,
            "unknown rule ->e"
        );
        assert_eq!(
            parse_command("prove p").unwrap_err().message,
            "unknown command prove"
        );
        assert!(parse_command("apply").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn test_incomplete_box() {
        assert!(parse_command("apply -i 2-").is_err());
        assert!(parse_command("apply ^i 1,").is_err());
    }
}
