// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io::ErrorKind;

use tracing::debug;

use super::*;

/// A parsed `include` directive.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct IncludeDirective {
    pub path: String,
    pub required: bool,
}

/// Parse the directive after the `include` keyword and load its root object.
pub(super) fn parse_include(parser: &mut Parser) -> Result<Map, HoconError> {
    let directive = parse_directive(parser)?;
    load_include(parser, &directive)
}

/// `["required"(] ["file"|"classpath"(] "path" [)] [)]`
pub(super) fn parse_directive(parser: &mut Parser) -> Result<IncludeDirective, HoconError> {
    let required = is_keyword(parser, &["required"]);
    if required {
        parser.bump()?;
        parser.expect_symbol('(', "invalid include value! missing opening parenthesis")?;
    }

    let wrapped = is_keyword(parser, &["file", "classpath"]);
    if wrapped {
        parser.bump()?;
        parser.expect_symbol('(', "invalid include value! missing opening parenthesis")?;
    }

    let path = match parser.current() {
        Token::String(s) => s.replace('"', ""),
        _ => {
            return Err(HoconError::SyntaxError {
                message: "invalid include value! expected quoted string, optionally wrapped in 'file(...)' or 'classpath(...)'".into(),
                line: parser.line(),
                column: parser.column(),
                hint: Some(r#"Write include "file.conf" or include required("file.conf")"#.into()),
                code: Some(250),
            });
        }
    };
    parser.bump()?;

    if wrapped {
        parser.expect_symbol(')', "invalid include value! missing closing parenthesis")?;
    }
    if required {
        parser.expect_symbol(')', "invalid include value! missing closing parenthesis")?;
    }

    Ok(IncludeDirective { path, required })
}

fn is_keyword(parser: &Parser, words: &[&str]) -> bool {
    matches!(parser.current(), Token::Ident(w) if words.contains(&w.as_str()))
}

fn load_include(parser: &Parser, directive: &IncludeDirective) -> Result<Map, HoconError> {
    let path = resolve_include_path(&directive.path, parser.base_dir.as_deref())?;

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound && !directive.required => {
            debug!(path = %path.display(), "skipping missing optional include");
            return Ok(Map::new());
        }
        Err(e) => {
            return Err(HoconError::FileError {
                message: format!("could not parse resource: {}", e),
                path: path.display().to_string(),
                hint: directive
                    .required
                    .then(|| "The include is marked required(...)".to_string()),
                code: Some(301),
            });
        }
    };

    let canonical = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
    if parser.include_stack.contains(&canonical) {
        debug!(path = %canonical.display(), "include cycle detected");
        return Err(HoconError::IncludeError {
            message: "include cycle detected".into(),
            path: path.display().to_string(),
            hint: Some("A file may not include itself, directly or through other files".into()),
            code: Some(303),
        });
    }

    debug!(path = %path.display(), "including resource");

    let mut stack = parser.include_stack.clone();
    stack.push(canonical);
    let nested_base = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let included = path.display().to_string();
    let mut nested = Parser::new(&content)
        .map_err(|e| e.in_included_file(&included))?
        .with_base_dir(nested_base)
        .with_include_stack(stack);

    if nested.current().is_symbol('[') {
        return Err(HoconError::IncludeError {
            message: "invalid included file! included file cannot contain an array as the root value".into(),
            path: path.display().to_string(),
            hint: Some("Included files must be object-rooted".into()),
            code: Some(302),
        });
    }

    let items = nested
        .parse_root_object()
        .map_err(|e| e.in_included_file(&included))?;
    nested.expect_end().map_err(|e| e.in_included_file(&included))?;
    Ok(items)
}

/// Expand `~/` and resolve relative paths against `base_dir`.
pub(crate) fn resolve_include_path(raw_path: &str, base_dir: Option<&Path>) -> Result<PathBuf, HoconError> {
    let mut p = if let Some(rest) = raw_path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| HoconError::FileError {
            message: "Could not determine home directory for ~ expansion".into(),
            path: raw_path.to_string(),
            hint: Some("Set HOME or use an absolute path in the include".into()),
            code: Some(300),
        })?;
        home.join(rest)
    } else {
        PathBuf::from(raw_path)
    };

    if p.is_relative() {
        if let Some(base) = base_dir {
            p = base.join(p);
        }
    }
    Ok(p)
}
