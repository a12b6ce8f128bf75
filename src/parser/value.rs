use super::*;
use crate::ast::Substitution;
use crate::utils::is_forbidden;

pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, HoconError> {
    match parser.current() {
        Token::Int(_) => parse_int_value(parser),
        Token::Float(_) => parse_float_value(parser),
        Token::String(_) => parse_string_value(parser),
        Token::Ident(_) => parse_keyword_value(parser),
        Token::Symbol('{') => Ok(Value::object(object::parse_object(parser)?)),
        Token::Symbol('[') => parse_array(parser),
        Token::Symbol('$') if parser.at_pair('$', '{') => parse_substitution(parser),
        _ => Err(invalid_value(parser, "Unexpected token in value position")),
    }
}

fn invalid_value(parser: &Parser, hint: &str) -> HoconError {
    HoconError::InvalidToken {
        token: parser.current().text(),
        line: parser.line(),
        column: parser.column(),
        hint: Some(hint.into()),
        code: Some(210),
    }
}

fn parse_int_value(parser: &mut Parser) -> Result<Value, HoconError> {
    let n = parser
        .current()
        .text()
        .parse::<i64>()
        .map_err(|_| invalid_value(parser, "Integer does not fit in 64 bits"))?;
    parser.bump()?;
    Ok(Value::Int(n))
}

fn parse_float_value(parser: &mut Parser) -> Result<Value, HoconError> {
    let n = parser
        .current()
        .text()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid_value(parser, "Float is out of single-precision range"))?;
    parser.bump()?;
    Ok(Value::Float32(n))
}

fn parse_string_value(parser: &mut Parser) -> Result<Value, HoconError> {
    let Token::String(s) = parser.current() else {
        return Err(invalid_value(parser, "Expected a quoted string"));
    };
    let value = Value::String(s.replace('"', ""));
    parser.bump()?;
    Ok(value)
}

fn parse_keyword_value(parser: &mut Parser) -> Result<Value, HoconError> {
    let value = match parser.current().text().as_str() {
        "null" => Value::Null,
        "true" | "yes" | "on" => Value::Boolean(true),
        "false" | "no" | "off" => Value::Boolean(false),
        _ => {
            return Err(invalid_value(
                parser,
                "Unquoted text must be null or a boolean (true/yes/on, false/no/off); quote strings",
            ));
        }
    };
    parser.bump()?;
    Ok(value)
}

pub(super) fn parse_array(parser: &mut Parser) -> Result<Value, HoconError> {
    let (open_line, open_column) = (parser.line(), parser.column());
    parser.bump()?; // consume [
    let mut values = Vec::new();

    loop {
        match parser.current() {
            Token::Symbol(']') => {
                parser.bump()?;
                return Ok(Value::array(values));
            }
            Token::Eof => {
                return Err(HoconError::SyntaxError {
                    message: "invalid config array! brackets do not match".into(),
                    line: open_line,
                    column: open_column,
                    hint: Some("Add the missing ']'".into()),
                    code: Some(206),
                });
            }
            _ => {
                values.push(parse_value(parser)?);
                if parser.current().is_symbol(',') {
                    parser.bump()?;
                }
            }
        }
    }
}

/// Parse `${path}` / `${?path}`; the cursor is on the `$`.
fn parse_substitution(parser: &mut Parser) -> Result<Value, HoconError> {
    let (line, column) = (parser.line(), parser.column());
    parser.bump()?; // skip "$"
    parser.bump()?; // skip "{"

    let optional = parser.current().is_symbol('?');
    if optional {
        parser.bump()?;
    }

    if parser.current().is_symbol('}') {
        return Err(HoconError::SubstitutionError {
            message: "path expression cannot be empty".into(),
            line: parser.line(),
            column: parser.column(),
            hint: Some("Write the path to substitute, e.g. ${server.host}".into()),
            code: Some(240),
        });
    }

    let mut segments = Vec::new();
    push_path_segment(parser, &mut segments)?;

    loop {
        match parser.current() {
            Token::Symbol('}') => {
                parser.bump()?;
                break;
            }
            Token::Symbol('.') => {
                let (dot_line, dot_column) = (parser.line(), parser.column());
                parser.bump()?;
                match parser.current() {
                    Token::Symbol('.') => {
                        return Err(HoconError::adjacent_periods(parser.line(), parser.column()));
                    }
                    Token::Symbol('}') => {
                        return Err(HoconError::trailing_period(dot_line, dot_column));
                    }
                    _ => push_path_segment(parser, &mut segments)?,
                }
            }
            Token::Symbol(c) if is_forbidden(*c) => {
                return Err(HoconError::forbidden_character(
                    &c.to_string(),
                    parser.line(),
                    parser.column(),
                ));
            }
            other => {
                let message = match other {
                    Token::Eof => "missing closing brace".to_string(),
                    other => format!("expected '.' or '}}' in path, got '{}'", other.text()),
                };
                return Err(HoconError::SubstitutionError {
                    message,
                    line: parser.line(),
                    column: parser.column(),
                    hint: None,
                    code: Some(241),
                });
            }
        }
    }

    Ok(Value::Substitution(Substitution {
        path: segments.join("."),
        optional,
        line,
        column,
    }))
}

fn push_path_segment(parser: &mut Parser, segments: &mut Vec<String>) -> Result<(), HoconError> {
    if parser.current() == &Token::Eof {
        return Err(HoconError::SubstitutionError {
            message: "missing closing brace".into(),
            line: parser.line(),
            column: parser.column(),
            hint: None,
            code: Some(241),
        });
    }
    object::push_key_segment(parser, segments)
}
