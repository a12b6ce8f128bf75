/// Best-effort search of the raw source for the line that sets `key`.
///
/// Tracks `name {` ... `}` scopes line by line. Falls back to the first line
/// whose last key segment matches. Returns `(0, "<key not found>")` on a miss.
pub(super) fn find_config_line(key: &str, raw_content: &str) -> (usize, String) {
    let simple_key = key.rsplit('.').next().unwrap_or(key);
    let mut scope_stack: Vec<String> = Vec::new();
    let mut fallback = None;

    for (idx, line) in raw_content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        if trimmed.starts_with('}') {
            scope_stack.pop();
            continue;
        }

        let Some((line_key, rest)) = split_key(trimmed) else {
            continue;
        };

        let full_path = {
            let mut path = scope_stack.clone();
            path.push(line_key.to_string());
            path.join(".")
        };

        if full_path == key {
            return (idx + 1, trimmed.to_string());
        }
        if fallback.is_none() && line_key.rsplit('.').next() == Some(simple_key) {
            fallback = Some((idx + 1, trimmed.to_string()));
        }

        let value = rest.trim_start_matches(['=', ':']).trim_start();
        if value.starts_with('{') && !value.contains('}') {
            scope_stack.push(line_key.to_string());
        }
    }

    fallback.unwrap_or_else(|| (0, "<key not found>".into()))
}

/// Split `key = value`, `key: value`, `key += value` or `key {` at the operator.
fn split_key(line: &str) -> Option<(&str, &str)> {
    let end = line.find(['=', ':', '{', '+'])?;
    let key = line[..end].trim().trim_matches('"');
    if key.is_empty() || key == "include" {
        None
    } else {
        Some((key, &line[end..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
# service settings
server {
  host = "localhost"
  port: 8080
  tls { enabled = true }
}
client.port = 9090
"#;

    #[test]
    fn test_finds_scoped_key() {
        assert_eq!(find_config_line("server.port", SOURCE), (5, "port: 8080".into()));
        assert_eq!(find_config_line("client.port", SOURCE), (8, "client.port = 9090".into()));
    }

    #[test]
    fn test_single_line_objects_do_not_open_scopes() {
        assert_eq!(find_config_line("server.tls", SOURCE).0, 6);
        assert_eq!(find_config_line("client.port", SOURCE).0, 8);
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(find_config_line("nothing.here", SOURCE).0, 0);
    }
}
