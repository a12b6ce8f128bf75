use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Look `n` characters past the current one without consuming anything.
pub(super) fn peek_nth(lexer: &Lexer, n: usize) -> Option<char> {
    lexer.input.clone().nth(n)
}

/// Skip whitespace and `#` / `//` line comments.
///
/// Returns true if anything was skipped.
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) -> bool {
    let mut skipped = false;
    while let Some(c) = lexer.peek {
        match c {
            c if c.is_whitespace() => {
                bump(lexer);
            }
            '#' => skip_line(lexer),
            '/' if peek_nth(lexer, 0) == Some('/') => skip_line(lexer),
            _ => break,
        }
        skipped = true;
    }
    skipped
}

fn skip_line(lexer: &mut Lexer) {
    while let Some(ch) = bump(lexer) {
        if ch == '\n' {
            break;
        }
    }
}
