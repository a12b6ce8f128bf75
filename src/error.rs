// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// The main error type for HOCON lexing, parsing and resolution.
///
/// Every failure is fatal to the parse that raised it. Positioned variants
/// carry the 1-based line and column of the offending token.
#[derive(Debug, Clone, PartialEq)]
pub enum HoconError {
    /// Structural problems: unmatched braces/brackets, malformed includes,
    /// trailing tokens after the root value.
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A token that cannot start a value.
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed.
    UnclosedString {
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Forbidden characters and misplaced periods in keys or substitution paths.
    KeyError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    SubstitutionError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Included resources that exist but cannot be spliced in.
    IncludeError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A lookup path with nothing at the end of it.
    NotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl HoconError {
    pub(crate) fn not_found(path: &str) -> Self {
        HoconError::NotFound {
            path: path.to_string(),
            hint: Some("Check the key path for typos".into()),
            code: Some(304),
        }
    }

    pub(crate) fn leading_period(line: usize, column: usize) -> Self {
        Self::period_error("leading period '.'", line, column, 221)
    }

    pub(crate) fn trailing_period(line: usize, column: usize) -> Self {
        Self::period_error("trailing period '.'", line, column, 222)
    }

    pub(crate) fn adjacent_periods(line: usize, column: usize) -> Self {
        Self::period_error("two adjacent periods '.'", line, column, 223)
    }

    fn period_error(message: &str, line: usize, column: usize, code: u32) -> Self {
        HoconError::KeyError {
            message: message.into(),
            line,
            column,
            hint: Some(r#"Use a quoted "" empty string if you want an empty element"#.into()),
            code: Some(code),
        }
    }

    pub(crate) fn forbidden_character(key: &str, line: usize, column: usize) -> Self {
        HoconError::KeyError {
            message: format!("{:?} is a forbidden character in keys", key),
            line,
            column,
            hint: Some("Quote the key if it needs special characters".into()),
            code: Some(220),
        }
    }

    /// Note on a positioned error that it was raised inside the included file
    /// `path`. Nested includes stack one line per file, innermost first.
    pub(crate) fn in_included_file(mut self, path: &str) -> Self {
        if let HoconError::SyntaxError { hint, .. }
        | HoconError::InvalidToken { hint, .. }
        | HoconError::UnclosedString { hint, .. }
        | HoconError::KeyError { hint, .. }
        | HoconError::SubstitutionError { hint, .. } = &mut self
        {
            let note = format!("in included file '{}'", path);
            *hint = Some(match hint.take() {
                Some(h) => format!("{}\n  → {}", h, note),
                None => note,
            });
        }
        self
    }

    /// Human-readable error category.
    pub fn category(&self) -> &'static str {
        match self {
            HoconError::SyntaxError { .. } => "Syntax Error",
            HoconError::InvalidToken { .. } => "Invalid Value",
            HoconError::UnclosedString { .. } => "Unclosed String",
            HoconError::KeyError { .. } => "Invalid Key",
            HoconError::SubstitutionError { .. } => "Invalid Substitution",
            HoconError::TypeError { .. } => "Type Error",
            HoconError::FileError { .. } => "File Error",
            HoconError::IncludeError { .. } => "Include Error",
            HoconError::NotFound { .. } => "Path Not Found",
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            HoconError::SyntaxError { code, .. }
            | HoconError::InvalidToken { code, .. }
            | HoconError::UnclosedString { code, .. }
            | HoconError::KeyError { code, .. }
            | HoconError::SubstitutionError { code, .. }
            | HoconError::TypeError { code, .. }
            | HoconError::FileError { code, .. }
            | HoconError::IncludeError { code, .. }
            | HoconError::NotFound { code, .. } => *code,
        }
    }

    /// Source position as `(line, column)`, when the error has one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            HoconError::SyntaxError { line, column, .. }
            | HoconError::InvalidToken { line, column, .. }
            | HoconError::UnclosedString { line, column, .. }
            | HoconError::KeyError { line, column, .. }
            | HoconError::SubstitutionError { line, column, .. } => Some((*line, *column)),
            HoconError::TypeError { .. }
            | HoconError::FileError { .. }
            | HoconError::IncludeError { .. }
            | HoconError::NotFound { .. } => None,
        }
    }

    fn hint(&self) -> Option<&String> {
        match self {
            HoconError::SyntaxError { hint, .. }
            | HoconError::InvalidToken { hint, .. }
            | HoconError::UnclosedString { hint, .. }
            | HoconError::KeyError { hint, .. }
            | HoconError::SubstitutionError { hint, .. }
            | HoconError::TypeError { hint, .. }
            | HoconError::FileError { hint, .. }
            | HoconError::IncludeError { hint, .. }
            | HoconError::NotFound { hint, .. } => hint.as_ref(),
        }
    }
}

impl fmt::Display for HoconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category();
        match self {
            HoconError::SyntaxError { message, line, column, .. }
            | HoconError::KeyError { message, line, column, .. }
            | HoconError::SubstitutionError { message, line, column, .. } => {
                write!(f, "[HOCON] {} at {}:{}: {}", category, line, column, message)?
            }
            HoconError::InvalidToken { token, line, column, .. } => {
                write!(f, "[HOCON] {} '{}' at {}:{}", category, token, line, column)?
            }
            HoconError::UnclosedString { line, column, .. } => {
                write!(f, "[HOCON] {} at {}:{}", category, line, column)?
            }
            HoconError::TypeError { message, .. } => {
                write!(f, "[HOCON] {}: {}", category, message)?
            }
            HoconError::FileError { message, path, .. }
            | HoconError::IncludeError { message, path, .. } => {
                write!(f, "[HOCON] {} '{}': {}", category, path, message)?
            }
            HoconError::NotFound { path, .. } => {
                write!(f, "[HOCON] {}: '{}'", category, path)?
            }
        }

        if let Some(h) = self.hint() {
            write!(f, " Hint: {}", h)?;
        }
        if let Some(c) = self.code() {
            write!(f, " Code: {}", c)?;
        }
        Ok(())
    }
}

impl std::error::Error for HoconError {}
