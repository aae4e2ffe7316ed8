use logos::Logos;

use crate::ParseError;

/// Tokens of formulas and rule input chains.
///
/// Command keywords and rule names are whitespace-delimited words and are
/// split off by the grammar before the remainder of the line is lexed.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\n\f\r]+")]
pub enum Token {
    // --------------------------------------------------
    // Connectives
    // --------------------------------------------------
    #[token("-")]
    Not,

    #[token("^")]
    And,

    #[token("/")]
    Or,

    #[token("=>")]
    Implies,

    #[token("_|_")]
    Contradiction,

    // --------------------------------------------------
    // Atoms and line numbers
    // --------------------------------------------------

    // Names are purely alphabetic; digits never belong to a name so that
    // `1-3` and `p` stay unambiguous inside input chains.
    #[regex(r"[a-zA-Z]+")]
    Name,

    #[regex(r"[0-9]+")]
    Number,

    // --------------------------------------------------
    // Punctuation
    // --------------------------------------------------
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,
}

/// A token with its source slice and byte offset in the lexed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub token: Token,
    pub text: &'a str,
    pub offset: usize,
}

/// Tokenizer: Logos DFA over `input`. `base` is the byte offset of `input`
/// inside the full command line, so error positions point into the line the
/// user typed.
pub fn tokenize(input: &str, base: usize) -> Result<Vec<Lexeme<'_>>, ParseError> {
    let mut lex = Token::lexer(input);
    let mut lexemes = Vec::new();

    while let Some(token) = lex.next() {
        let offset = base + lex.span().start;
        match token {
            Ok(token) => lexemes.push(Lexeme {
                token,
                text: lex.slice(),
                offset,
            }),
            Err(()) => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", lex.slice()),
                    offset,
                ))
            }
        }
    }

    Ok(lexemes)
}
