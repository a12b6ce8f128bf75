// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;
use crate::HoconError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    Int(String),
    Float(String),
    /// String body with the surrounding quotes removed, escapes untouched.
    String(String),
    Ident(String),

    // --- punctuation ---
    Symbol(char),

    Eof,
}

impl Token {
    /// Source-like text of the token, used for keys and error messages.
    pub fn text(&self) -> String {
        match self {
            Token::Int(s) | Token::Float(s) | Token::Ident(s) => s.clone(),
            Token::String(s) => format!("\"{}\"", s),
            Token::Symbol(c) => c.to_string(),
            Token::Eof => String::new(),
        }
    }

    pub fn is_symbol(&self, c: char) -> bool {
        matches!(self, Token::Symbol(s) if *s == c)
    }
}

/// A token plus where it started.
///
/// `joined` is true when nothing (whitespace or comments) separated this
/// token from the previous one, which is how `+=` and `${` are recognised.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
    pub joined: bool,
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn next_token(&mut self) -> Result<Spanned, HoconError> {
        tokenizer::next_token(self)
    }
}
