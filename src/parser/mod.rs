// Author: Dustin Pilgrim
// License: MIT

use std::mem;
use std::path::{Path, PathBuf};

use crate::HoconError;
use crate::ast::{Map, Value};
use crate::lexer::{Lexer, Spanned, Token};
use crate::resolver;

mod include;
mod object;
mod value;

/// Recursive-descent parser over a single token stream.
///
/// The parser owns the cursor: every extraction routine takes `&mut Parser`
/// and leaves it on the first token after whatever it consumed.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Spanned,
    peek: Spanned,
    base_dir: Option<PathBuf>,
    include_stack: Vec<PathBuf>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, HoconError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            peek,
            base_dir: None,
            include_stack: Vec::new(),
        })
    }

    /// Directory that relative include paths are resolved against.
    pub fn with_base_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Files currently being parsed, outermost first. Used to reject include cycles.
    pub fn with_include_stack(mut self, stack: Vec<PathBuf>) -> Self {
        self.include_stack = stack;
        self
    }

    /// Advance one token, returning the one that was current.
    pub(crate) fn bump(&mut self) -> Result<Spanned, HoconError> {
        let next = self.lexer.next_token()?;
        let upcoming = mem::replace(&mut self.peek, next);
        Ok(mem::replace(&mut self.current, upcoming))
    }

    pub(crate) fn current(&self) -> &Token {
        &self.current.token
    }

    pub(crate) fn peek(&self) -> &Spanned {
        &self.peek
    }

    /// True when no whitespace or comment separates the current token from the previous one.
    pub(crate) fn joined(&self) -> bool {
        self.current.joined
    }

    pub(crate) fn line(&self) -> usize {
        self.current.line
    }

    pub(crate) fn column(&self) -> usize {
        self.current.column
    }

    /// True when the cursor sits on `c` immediately followed by `next` with no gap.
    pub(crate) fn at_pair(&self, c: char, next: char) -> bool {
        self.current.token.is_symbol(c) && self.peek.token.is_symbol(next) && self.peek.joined
    }

    pub(crate) fn expect_symbol(&mut self, expected: char, message: &str) -> Result<(), HoconError> {
        if !self.current().is_symbol(expected) {
            return Err(HoconError::SyntaxError {
                message: message.into(),
                line: self.line(),
                column: self.column(),
                hint: Some(format!("Expected '{}', got '{}'", expected, self.current().text())),
                code: Some(202),
            });
        }
        self.bump()?;
        Ok(())
    }

    /// Parse and resolve a whole document.
    ///
    /// Object-rooted documents have their substitutions resolved against the
    /// finished tree; array-rooted documents are returned as parsed.
    pub fn parse(&mut self) -> Result<Value, HoconError> {
        match self.parse_document()? {
            Value::Object(items) => Ok(Value::object(resolver::resolve_document(&items)?)),
            array => Ok(array),
        }
    }

    /// Parse a document into its raw tree, substitutions left in place.
    pub fn parse_document(&mut self) -> Result<Value, HoconError> {
        let root = if self.current().is_symbol('[') {
            value::parse_array(self)?
        } else {
            Value::object(self.parse_root_object()?)
        };
        self.expect_end()?;
        Ok(root)
    }

    pub(crate) fn parse_root_object(&mut self) -> Result<Map, HoconError> {
        object::parse_object(self)
    }

    fn expect_end(&self) -> Result<(), HoconError> {
        match self.current() {
            Token::Eof => Ok(()),
            other => Err(HoconError::SyntaxError {
                message: format!("invalid token {}", other.text()),
                line: self.line(),
                column: self.column(),
                hint: Some("Unexpected content after the root value".into()),
                code: Some(204),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
