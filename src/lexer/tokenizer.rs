use super::*;
use super::scanner::{bump, peek_nth, skip_whitespace_and_comments};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Spanned, HoconError> {
    let skipped = skip_whitespace_and_comments(lexer);
    let line = lexer.line;
    let column = lexer.column + 1;

    let token = match lexer.peek {
        None => Token::Eof,
        Some('"') => tokenize_string(lexer, line, column)?,
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer),
        Some('-') if peek_nth(lexer, 0).is_some_and(|c| c.is_ascii_digit()) => {
            tokenize_number(lexer)
        }
        Some(c) if c.is_alphabetic() || c == '_' => tokenize_identifier(lexer),
        Some(c) => {
            bump(lexer);
            Token::Symbol(c)
        }
    };

    Ok(Spanned {
        token,
        line,
        column,
        joined: !skipped,
    })
}

fn tokenize_string(lexer: &mut Lexer, line: usize, column: usize) -> Result<Token, HoconError> {
    bump(lexer); // consume opening '"'
    let mut content = String::new();

    loop {
        match bump(lexer) {
            Some('"') => return Ok(Token::String(content)),
            Some('\\') => {
                // Keep the escape as written; it only stops the next char closing the string.
                content.push('\\');
                match bump(lexer) {
                    Some('\n') | None => break,
                    Some(next_ch) => content.push(next_ch),
                }
            }
            Some('\n') | None => break,
            Some(ch) => content.push(ch),
        }
    }

    Err(HoconError::UnclosedString {
        line,
        column,
        hint: Some("String literal not closed before end of line".into()),
        code: Some(103),
    })
}

fn tokenize_number(lexer: &mut Lexer) -> Token {
    let mut num = String::new();
    let mut is_float = false;

    if lexer.peek == Some('-') {
        num.push('-');
        bump(lexer);
    }
    push_digits(lexer, &mut num);

    if lexer.peek == Some('.') && peek_nth(lexer, 0).is_some_and(|c| c.is_ascii_digit()) {
        is_float = true;
        num.push('.');
        bump(lexer);
        push_digits(lexer, &mut num);
    }

    if matches!(lexer.peek, Some('e') | Some('E')) {
        let signed = matches!(peek_nth(lexer, 0), Some('+') | Some('-'));
        let digit_at = if signed { 1 } else { 0 };
        if peek_nth(lexer, digit_at).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            for _ in 0..=digit_at {
                if let Some(ch) = bump(lexer) {
                    num.push(ch);
                }
            }
            push_digits(lexer, &mut num);
        }
    }

    if is_float {
        Token::Float(num)
    } else {
        Token::Int(num)
    }
}

fn push_digits(lexer: &mut Lexer, num: &mut String) {
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            num.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }
}

fn tokenize_identifier(lexer: &mut Lexer) -> Token {
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '_' || ch == '-' {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    Token::Ident(ident)
}
