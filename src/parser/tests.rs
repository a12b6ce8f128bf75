#[cfg(test)]
use super::*;

fn parse(input: &str) -> Result<Value, HoconError> {
    Parser::new(input)?.parse()
}

fn parse_ok(input: &str) -> Value {
    parse(input).unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", input, e))
}

fn get<'v>(value: &'v Value, path: &str) -> &'v Value {
    let segments: Vec<&str> = path.split('.').collect();
    value
        .lookup(&segments)
        .unwrap_or_else(|| panic!("missing path {}", path))
}

#[test]
fn test_parser_basic_document() {
    let input = r#"
app {
  name = "demo"
  version: 3
  ratio = 0.5
  debug = on
  verbose = no
  owner = null
}
"#;

    let root = parse_ok(input);

    assert_eq!(get(&root, "app.name"), &Value::String("demo".into()));
    assert_eq!(get(&root, "app.version"), &Value::Int(3));
    assert_eq!(get(&root, "app.ratio"), &Value::Float32(0.5));
    assert_eq!(get(&root, "app.debug"), &Value::Boolean(true));
    assert_eq!(get(&root, "app.verbose"), &Value::Boolean(false));
    assert_eq!(get(&root, "app.owner"), &Value::Null);
}

#[test]
fn test_braced_and_empty_roots() {
    assert_eq!(parse_ok("{ a = 1 }"), parse_ok("a = 1"));
    assert_eq!(parse_ok("{}"), Value::object(Map::new()));
    assert_eq!(parse_ok(""), Value::object(Map::new()));
}

#[test]
fn test_array_root() {
    let root = parse_ok(r#"[1, "two", [3], { four = 4 }]"#);
    let values = root.as_array().expect("Expected array root");
    assert_eq!(values.len(), 4);
    assert_eq!(values[1], Value::String("two".into()));
    assert_eq!(values[2], Value::array(vec![Value::Int(3)]));
    assert_eq!(get(&values[3], "four"), &Value::Int(4));
}

#[test]
fn test_array_root_keeps_substitutions() {
    let root = parse_ok("[${a}]");
    assert!(matches!(
        root.as_array().unwrap()[0],
        Value::Substitution(ref s) if s.path == "a" && !s.optional
    ));
}

#[test]
fn test_empty_array_and_optional_commas() {
    let root = parse_ok("empty = []\nlist = [1 2, 3,]");
    assert_eq!(get(&root, "empty"), &Value::array(vec![]));
    assert_eq!(
        get(&root, "list"),
        &Value::array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn test_dotted_key_equivalence() {
    assert_eq!(parse_ok("a.b.c = 1"), parse_ok("a { b { c = 1 } }"));
}

#[test]
fn test_dotted_key_does_not_absorb_siblings() {
    let root = parse_ok("a.b = 1\nc = 2\nd { e.f = 3, g = 4 }");
    let keys: Vec<&String> = root.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["a", "c", "d"]);
    assert_eq!(get(&root, "a"), &parse_ok("b = 1"));
    assert_eq!(get(&root, "c"), &Value::Int(2));
    assert_eq!(get(&root, "d.e.f"), &Value::Int(3));
    assert_eq!(get(&root, "d.g"), &Value::Int(4));
}

#[test]
fn test_dotted_keys_merge_into_existing_object() {
    let root = parse_ok("a.x = 1\na.y = 2\na { z = 3 }");
    assert_eq!(get(&root, "a"), &parse_ok("x = 1, y = 2, z = 3"));
}

#[test]
fn test_dotted_key_with_braces() {
    assert_eq!(parse_ok("a.b { c = 1 }"), parse_ok("a.b.c = 1"));
}

#[test]
fn test_duplicate_key_override() {
    assert_eq!(get(&parse_ok("{a: 1, a: 2}"), "a"), &Value::Int(2));
}

#[test]
fn test_duplicate_key_object_merge() {
    let root = parse_ok("{a: {x:1}, a: {y:2}}");
    assert_eq!(get(&root, "a"), &parse_ok("x = 1, y = 2"));
}

#[test]
fn test_scalar_then_object_overrides() {
    let root = parse_ok("a = 1\na { x = 1 }\nb { x = 1 }\nb = 2");
    assert_eq!(get(&root, "a"), &parse_ok("x = 1"));
    assert_eq!(get(&root, "b"), &Value::Int(2));
}

#[test]
fn test_append_accumulation() {
    let created = parse_ok("{a += 1, a += 2}");
    assert_eq!(
        get(&created, "a"),
        &Value::array(vec![Value::Int(1), Value::Int(2)])
    );

    let extended = parse_ok("{a = [1], a += 2}");
    assert_eq!(get(&created, "a"), get(&extended, "a"));
}

#[test]
fn test_append_through_dotted_key() {
    let root = parse_ok("x.list += \"a\"\nx.list += \"b\"");
    assert_eq!(
        get(&root, "x.list"),
        &Value::array(vec![Value::String("a".into()), Value::String("b".into())])
    );
}

#[test]
fn test_append_to_non_array_is_type_error() {
    let err = parse("a = 1\na += 2").unwrap_err();
    assert!(matches!(err, HoconError::TypeError { code: Some(230), .. }));
}

#[test]
fn test_spaced_plus_is_not_append() {
    let err = parse("a + = 1").unwrap_err();
    assert!(matches!(err, HoconError::SyntaxError { code: Some(207), .. }));
}

#[test]
fn test_quoted_keys() {
    let root = parse_ok(r#""a.b" = 1, "with space" = 2"#);
    let items = root.as_object().unwrap();
    assert_eq!(items.get("a.b"), Some(&Value::Int(1)));
    assert_eq!(items.get("with space"), Some(&Value::Int(2)));
}

#[test]
fn test_numeric_keys() {
    let root = parse_ok("1 = \"one\"");
    assert_eq!(get(&root, "1"), &Value::String("one".into()));

    let root = parse_ok("ports.8080 = \"http\"");
    assert_eq!(get(&root, "ports.8080"), &Value::String("http".into()));
}

#[test]
fn test_strings_drop_quotes_only() {
    let root = parse_ok(r#"s = "say \"hi\"""#);
    assert_eq!(get(&root, "s"), &Value::String(r"say \hi\".into()));
}

#[test]
fn test_forbidden_key_characters() {
    for c in ["$", "]", ",", "+", "`", "^", "?", "!", "@", "*", "&", "\\", "(", ")"] {
        for input in [format!("{} = 1", c), format!("a.{} = 1", c), format!("x {{ y.{}.z = 1 }}", c)] {
            let err = parse(&input).unwrap_err();
            assert!(
                matches!(err, HoconError::KeyError { code: Some(220), .. }),
                "{:?} should be rejected as a key, got {:?}",
                input,
                err
            );
        }
    }

    for input in ["= = 1", ": = 1", "{ = 1 }", "a.{ = 1", "a.[ = 1"] {
        assert_eq!(parse(input).unwrap_err().code(), Some(220), "{}", input);
    }
}

#[test]
fn test_forbidden_characters_inside_a_key() {
    for input in [
        "a@b = 1",
        "a$b = 1",
        "key? = 1",
        "a!b.c = 1",
        "x { a*b = 1 }",
        "a(b) = 1",
        "a^ = 1",
        "a.b&c = 1",
    ] {
        let err = parse(input).unwrap_err();
        assert!(
            matches!(err, HoconError::KeyError { code: Some(220), .. }),
            "{:?} should be rejected as a key, got {:?}",
            input,
            err
        );
    }

    let err = parse("key? = 1").unwrap_err();
    assert_eq!(err.position(), Some((1, 4)));
}

#[test]
fn test_other_symbols_are_not_keys() {
    for input in ["/ = 1", "a./ = 1", "% = 1", "x = ${a.%}"] {
        let err = parse(input).unwrap_err();
        assert!(
            matches!(err, HoconError::KeyError { code: Some(224), .. }),
            "{:?} should be rejected as a key, got {:?}",
            input,
            err
        );
    }
}

#[test]
fn test_period_errors() {
    let cases = [
        (".a = 1", 221, (1, 1)),
        ("a. = 1", 222, (1, 2)),
        ("a.+= 1", 222, (1, 2)),
        ("a..b = 1", 223, (1, 3)),
        ("x = ${.a}", 221, (1, 7)),
        ("x = ${a.}", 222, (1, 8)),
        ("x = ${a..b}", 223, (1, 9)),
    ];
    for (input, code, position) in cases {
        let err = parse(input).unwrap_err();
        assert_eq!(err.code(), Some(code), "{}", input);
        assert_eq!(err.position(), Some(position), "{}", input);
    }
}

#[test]
fn test_substitution_syntax_errors() {
    let empty = parse("a = ${}").unwrap_err();
    assert_eq!(empty.code(), Some(240));

    let unclosed = parse("a = ${b").unwrap_err();
    assert_eq!(unclosed.code(), Some(241));

    let forbidden = parse("a = ${b!}").unwrap_err();
    assert_eq!(forbidden.code(), Some(220));

    let spaced = parse("a = $ {b}").unwrap_err();
    assert!(matches!(spaced, HoconError::InvalidToken { .. }));
}

#[test]
fn test_substitution_resolution() {
    let root = parse_ok("{a = 1, b = ${a}}");
    assert_eq!(get(&root, "b"), &Value::Int(1));
}

#[test]
fn test_optional_substitution_does_not_fail() {
    let root = parse_ok("{b = ${?missing}, c = 1}");
    assert!(root.lookup(&["b"]).is_none());
    assert_eq!(get(&root, "c"), &Value::Int(1));
}

#[test]
fn test_required_substitution_failure() {
    let err = parse("{b = ${missing}}").unwrap_err();
    assert!(matches!(err, HoconError::SubstitutionError { code: Some(242), .. }));
}

#[test]
fn test_unmatched_structures() {
    let object = parse("a { b = 1").unwrap_err();
    assert_eq!(object.code(), Some(206));
    assert_eq!(object.position(), Some((1, 3)));

    let array = parse("a = [1, 2").unwrap_err();
    assert_eq!(array.code(), Some(206));

    let stray = parse("a = 1 }").unwrap_err();
    assert_eq!(stray.code(), Some(206));

    let trailing = parse("{ a = 1 } b = 2").unwrap_err();
    assert_eq!(trailing.code(), Some(204));
}

#[test]
fn test_unrecognized_values() {
    for input in ["a = bare", "a = }", "a = ", "a = 99999999999999999999", "a = 1e99"] {
        let err = parse(input).unwrap_err();
        assert!(
            matches!(err, HoconError::InvalidToken { code: Some(210), .. }),
            "{:?} should be an invalid value, got {:?}",
            input,
            err
        );
    }
}

#[test]
fn test_include_as_plain_key() {
    let root = parse_ok("include = 1\ninclude.x = 2");
    assert_eq!(get(&root, "include.x"), &Value::Int(2));
}

#[test]
fn test_missing_optional_include_is_skipped() {
    let root = parse_ok("include \"definitely-not-here-7f3a.conf\"\na = 1");
    assert_eq!(root, parse_ok("a = 1"));
}

#[test]
fn test_missing_required_include_fails() {
    let err = parse("include required(\"definitely-not-here-7f3a.conf\")").unwrap_err();
    assert!(matches!(err, HoconError::FileError { code: Some(301), .. }));
}

#[test]
fn test_comments_are_not_data() {
    let root = parse_ok("# header\na = 1 // trailing\n// b = 2\n");
    assert_eq!(root, parse_ok("a = 1"));
}

#[test]
fn test_negative_and_float_numbers() {
    let root = parse_ok("a = -3\nb = -1.5\nc = 2e3");
    assert_eq!(get(&root, "a"), &Value::Int(-3));
    assert_eq!(get(&root, "b"), &Value::Float32(-1.5));
    assert_eq!(get(&root, "c"), &Value::Float32(2000.0));
}

fn write(dir: &std::path::Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("Failed to write fixture");
}

fn parse_in(dir: &std::path::Path, input: &str) -> Result<Value, HoconError> {
    Parser::new(input)?.with_base_dir(dir).parse()
}

#[test]
fn test_include_merges_at_its_position() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "base.conf", "server { host = \"localhost\", port = 80 }\nname = \"base\"");

    let root = parse_in(dir.path(), "name = \"first\"\ninclude \"base.conf\"\nserver.port = 8080").unwrap();
    assert_eq!(get(&root, "name"), &Value::String("base".into()));
    assert_eq!(get(&root, "server.host"), &Value::String("localhost".into()));
    assert_eq!(get(&root, "server.port"), &Value::Int(8080));
}

#[test]
fn test_include_inside_nested_object() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "db.conf", "user = \"admin\"");

    let root = parse_in(dir.path(), "db { include required(file(\"db.conf\")), pool = 4 }").unwrap();
    assert_eq!(get(&root, "db.user"), &Value::String("admin".into()));
    assert_eq!(get(&root, "db.pool"), &Value::Int(4));
}

#[test]
fn test_nested_includes_resolve_relative_to_includer() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("conf.d")).unwrap();
    write(dir.path(), "main.conf", "include \"conf.d/a.conf\"");
    write(&dir.path().join("conf.d"), "a.conf", "a = 1\ninclude \"b.conf\"");
    write(&dir.path().join("conf.d"), "b.conf", "b = ${a}");

    let root = parse_in(dir.path(), "include \"main.conf\"").unwrap();
    assert_eq!(get(&root, "a"), &Value::Int(1));
    assert_eq!(get(&root, "b"), &Value::Int(1));
}

#[test]
fn test_include_file_with_array_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "list.conf", "[1, 2]");

    let err = parse_in(dir.path(), "include \"list.conf\"").unwrap_err();
    assert!(matches!(err, HoconError::IncludeError { code: Some(302), .. }));
}

#[test]
fn test_include_cycle_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.conf", "a = 1\ninclude \"b.conf\"");
    write(dir.path(), "b.conf", "b = 2\ninclude \"a.conf\"");

    let err = parse_in(dir.path(), "include \"a.conf\"").unwrap_err();
    assert!(matches!(err, HoconError::IncludeError { code: Some(303), .. }));
}

#[test]
fn test_errors_inside_included_file_surface() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.conf", "a = {");

    let err = parse_in(dir.path(), "include \"bad.conf\"").unwrap_err();
    assert_eq!(err.code(), Some(206));
    assert_eq!(err.position(), Some((1, 5)));
    assert!(err.to_string().contains("bad.conf"), "{}", err);
}

#[test]
fn test_errors_in_nested_includes_name_each_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "outer.conf", "a = 1
include \"inner.conf\"");
    write(dir.path(), "inner.conf", "b = 2
c@d = 3");

    let err = parse_in(dir.path(), "include \"outer.conf\"").unwrap_err();
    assert!(matches!(err, HoconError::KeyError { code: Some(220), line: 2, .. }), "{:?}", err);
    let text = err.to_string();
    let inner = text.find("inner.conf").unwrap();
    let outer = text.find("outer.conf").unwrap();
    assert!(inner < outer, "{}", text);
}
