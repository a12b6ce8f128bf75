use std::sync::Arc;

use super::*;
use crate::ast::merge_objects;
use crate::utils::is_forbidden;

/// Extract an object body.
///
/// Consumes an opening `{` when present and then stops at the matching `}`;
/// without one (document roots) it runs to end of input.
pub(super) fn parse_object(parser: &mut Parser) -> Result<Map, HoconError> {
    let braced = parser.current().is_symbol('{');
    let (open_line, open_column) = (parser.line(), parser.column());
    if braced {
        parser.bump()?;
    }

    let mut items = Map::new();

    loop {
        match parser.current() {
            Token::Eof if braced => {
                return Err(HoconError::SyntaxError {
                    message: "invalid config object! braces do not match".into(),
                    line: open_line,
                    column: open_column,
                    hint: Some("Add the missing '}'".into()),
                    code: Some(206),
                });
            }
            Token::Eof => return Ok(items),
            Token::Symbol('}') if braced => {
                parser.bump()?;
                return Ok(items);
            }
            Token::Symbol('}') => {
                return Err(HoconError::SyntaxError {
                    message: "invalid config object! unexpected '}'".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Remove the extra '}'".into()),
                    code: Some(206),
                });
            }
            Token::Ident(word) if word == "include" && !is_key_continuation(parser.peek()) => {
                parser.bump()?;
                let included = include::parse_include(parser)?;
                merge_objects(&mut items, included);
            }
            _ => parse_field(parser, &mut items)?,
        }

        if parser.current().is_symbol(',') {
            parser.bump()?;
        }
    }
}

/// `include` followed by one of these is an ordinary key named "include".
fn is_key_continuation(next: &Spanned) -> bool {
    matches!(next.token, Token::Symbol('=' | ':' | '.' | '{' | '+'))
}

/// Parse one `key.path <op> value` entry and apply it to `items`.
fn parse_field(parser: &mut Parser, items: &mut Map) -> Result<(), HoconError> {
    let path = parse_key_path(parser)?;

    let operator = match parser.current() {
        Token::Symbol('{') => Operator::Assign,
        Token::Symbol('=') | Token::Symbol(':') => {
            parser.bump()?;
            Operator::Assign
        }
        Token::Symbol('+') if parser.at_pair('+', '=') => {
            parser.bump()?;
            parser.bump()?;
            Operator::Append
        }
        Token::Symbol(c) if is_forbidden(*c) && parser.joined() => {
            return Err(HoconError::forbidden_character(&c.to_string(), parser.line(), parser.column()));
        }
        other => {
            return Err(HoconError::SyntaxError {
                message: format!("expected '=', ':', '+=' or '{{' after key, got '{}'", other.text()),
                line: parser.line(),
                column: parser.column(),
                hint: Some(format!("Give the key '{}' a value", path.join("."))),
                code: Some(207),
            });
        }
    };

    let value = value::parse_value(parser)?;

    let Some((key, parents)) = path.split_last() else {
        return Ok(());
    };
    let target = descend(items, parents);
    match operator {
        Operator::Assign => assign(target, key.clone(), value),
        Operator::Append => append(target, key, value)?,
    }
    Ok(())
}

enum Operator {
    Assign,
    Append,
}

/// Read a dotted key path up to (not including) its operator.
pub(super) fn parse_key_path(parser: &mut Parser) -> Result<Vec<String>, HoconError> {
    let mut path = Vec::new();
    push_key_segment(parser, &mut path)?;

    while parser.current().is_symbol('.') {
        let (line, column) = (parser.line(), parser.column());
        parser.bump()?; // skip "."

        if parser.current().is_symbol('.') {
            return Err(HoconError::adjacent_periods(parser.line(), parser.column()));
        }
        if is_separator(parser) {
            return Err(HoconError::trailing_period(line, column));
        }
        push_key_segment(parser, &mut path)?;
    }

    Ok(path)
}

/// Read one key token. Unquoted floats such as `1.5` contribute two segments.
pub(super) fn push_key_segment(parser: &mut Parser, path: &mut Vec<String>) -> Result<(), HoconError> {
    let (line, column) = (parser.line(), parser.column());
    match parser.current() {
        Token::Ident(_) | Token::Int(_) => {
            let text = parser.current().text();
            parser.bump()?;
            path.push(text);
        }
        Token::String(s) => {
            let key = s.replace('"', "");
            parser.bump()?;
            path.push(key);
        }
        Token::Float(s) => {
            let segments: Vec<String> = s.split('.').map(String::from).collect();
            parser.bump()?;
            path.extend(segments);
        }
        Token::Symbol('.') => return Err(HoconError::leading_period(line, column)),
        Token::Symbol(c) if is_forbidden(*c) => {
            return Err(HoconError::forbidden_character(&c.to_string(), line, column));
        }
        Token::Symbol(c) => {
            return Err(HoconError::KeyError {
                message: format!("{:?} cannot be used as a key", c),
                line,
                column,
                hint: Some("Keys are identifiers, integers or quoted strings".into()),
                code: Some(224),
            });
        }
        Token::Eof => {
            return Err(HoconError::SyntaxError {
                message: "unexpected end of input, expected a key".into(),
                line,
                column,
                hint: None,
                code: Some(201),
            });
        }
    }
    Ok(())
}

fn is_separator(parser: &Parser) -> bool {
    matches!(parser.current(), Token::Symbol('=') | Token::Symbol(':')) || parser.at_pair('+', '=')
}

/// Walk `parents` from `items`, creating objects as needed.
///
/// A non-object in the way is replaced, the same as assigning an object over it.
fn descend<'m>(mut current: &'m mut Map, parents: &[String]) -> &'m mut Map {
    for seg in parents {
        let slot = current
            .entry(seg.clone())
            .or_insert_with(|| Value::object(Map::new()));
        current = ensure_object(slot);
    }
    current
}

fn ensure_object(slot: &mut Value) -> &mut Map {
    match slot {
        Value::Object(items) => Arc::make_mut(items),
        other => {
            *other = Value::object(Map::new());
            ensure_object(other)
        }
    }
}

/// Store `value` under `key`, deep-merging when both sides are objects.
fn assign(items: &mut Map, key: String, value: Value) {
    merge_objects(items, Map::from([(key, value)]));
}

fn append(items: &mut Map, key: &str, value: Value) -> Result<(), HoconError> {
    match items.get_mut(key) {
        None => {
            items.insert(key.to_string(), Value::array(vec![value]));
        }
        Some(Value::Array(values)) => Arc::make_mut(values).push(value),
        Some(existing) => {
            return Err(HoconError::TypeError {
                message: format!(
                    "value: {:?} of the key: {:?} is not an array",
                    existing.to_string(),
                    key
                ),
                hint: Some("'+=' only appends to arrays".into()),
                code: Some(230),
            });
        }
    }
    Ok(())
}
