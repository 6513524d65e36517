use toml_tree::{ErrorKind, parse_str};

fn failure(input: &str) -> (ErrorKind, Option<usize>) {
    match parse_str(input) {
        Ok(doc) => panic!("expected an error for {:?}, parsed {:?}", input, doc),
        Err(e) => (e.kind(), e.line()),
    }
}

#[test]
fn heterogeneous_array() {
    assert_eq!(failure("arr = [1, \"a\"]"), (ErrorKind::HeterogeneousArray, Some(1)));
    assert_eq!(failure("a = 1\narr = [1, 2.0]"), (ErrorKind::HeterogeneousArray, Some(2)));
}

#[test]
fn table_redefinition() {
    assert_eq!(
        failure("[a]\nx = 1\n[a]\ny = 2"),
        (ErrorKind::TableRedefinition, Some(3))
    );
    assert_eq!(failure("a = 1\n[a]"), (ErrorKind::TableRedefinition, Some(2)));
    assert_eq!(failure("[a]\n[[a]]"), (ErrorKind::TableRedefinition, Some(2)));
    assert_eq!(failure("[[a]]\n[a]"), (ErrorKind::TableRedefinition, Some(2)));
}

#[test]
fn duplicate_keys() {
    assert_eq!(failure("a = 1\na = 2"), (ErrorKind::DuplicateKey, Some(2)));
    assert_eq!(failure("[t]\nx = 1\n\nx = 2"), (ErrorKind::DuplicateKey, Some(4)));
    assert_eq!(failure("p = { x = 1, x = 2 }"), (ErrorKind::DuplicateKey, Some(1)));
    assert_eq!(failure("a = 1\n[a.b]"), (ErrorKind::DuplicateKey, Some(2)));
    assert_eq!(failure("a = 1\na.b = 2"), (ErrorKind::DuplicateKey, Some(2)));
}

#[test]
fn same_key_in_sibling_tables_is_fine() {
    assert!(parse_str("x = 1\n[a]\nx = 2\n[b]\nx = 3\n").is_ok());
    assert!(parse_str("[[t]]\nx = 1\n[[t]]\nx = 2\n").is_ok());
}

#[test]
fn malformed_numbers() {
    assert_eq!(
        failure("n = 9223372036854775808"),
        (ErrorKind::MalformedNumber, Some(1))
    );
    assert_eq!(failure("n = 1__0"), (ErrorKind::MalformedNumber, Some(1)));
    assert_eq!(failure("n = 10_"), (ErrorKind::MalformedNumber, Some(1)));
    assert_eq!(failure("n = 1."), (ErrorKind::MalformedNumber, Some(1)));
    assert_eq!(failure("n = 1e"), (ErrorKind::MalformedNumber, Some(1)));
    assert_eq!(failure("n = 1e999"), (ErrorKind::MalformedNumber, Some(1)));
}

#[test]
fn malformed_dates() {
    assert_eq!(
        failure("d = 1979-05-27T07:32:00"),
        (ErrorKind::MalformedDate, Some(1))
    );
    assert_eq!(
        failure("d = 1979-05-27T07:32:00.Z"),
        (ErrorKind::MalformedDate, Some(1))
    );
    assert_eq!(
        failure("d = 1979-05-27T07:32:00+7:00"),
        (ErrorKind::MalformedDate, Some(1))
    );
}

#[test]
fn invalid_values() {
    assert_eq!(failure("v = @"), (ErrorKind::InvalidValue, Some(1)));
    assert_eq!(failure("v ="), (ErrorKind::InvalidValue, Some(1)));
    assert_eq!(failure("s = \"bad \\q escape\""), (ErrorKind::InvalidValue, Some(1)));
    assert_eq!(failure("b = truthy"), (ErrorKind::InvalidBoolean, Some(1)));
    assert_eq!(failure("b = fals"), (ErrorKind::InvalidBoolean, Some(1)));
}

#[test]
fn malformed_keys() {
    assert_eq!(failure("[]"), (ErrorKind::MalformedKey, Some(1)));
    assert_eq!(failure("[a..b]"), (ErrorKind::MalformedKey, Some(1)));
    assert_eq!(failure("a b = 1"), (ErrorKind::MalformedKey, Some(1)));
    assert_eq!(failure("[a#b]"), (ErrorKind::MalformedKey, Some(1)));
    assert_eq!(failure("= 1"), (ErrorKind::MalformedKey, Some(1)));
    assert_eq!(failure("\"open = 1"), (ErrorKind::MalformedKey, Some(1)));
}

#[test]
fn unterminated_constructs() {
    assert_eq!(failure("[a"), (ErrorKind::UnterminatedConstruct, Some(1)));
    assert_eq!(failure("[[a]"), (ErrorKind::UnterminatedConstruct, Some(1)));
    assert_eq!(failure("s = \"open"), (ErrorKind::UnterminatedConstruct, Some(1)));
    assert_eq!(failure("s = 'open"), (ErrorKind::UnterminatedConstruct, Some(1)));
    assert_eq!(
        failure("s = \"\"\"never\nclosed\n"),
        (ErrorKind::UnterminatedConstruct, Some(2))
    );
    assert_eq!(
        failure("arr = [1,\n2,\n"),
        (ErrorKind::UnterminatedConstruct, Some(2))
    );
    assert_eq!(failure("t = { a = 1"), (ErrorKind::UnterminatedConstruct, Some(1)));
}

#[test]
fn trailing_and_unexpected_characters() {
    assert_eq!(failure("a = 1 2"), (ErrorKind::TrailingCharacters, Some(1)));
    assert_eq!(failure("[a] x"), (ErrorKind::TrailingCharacters, Some(1)));
    assert_eq!(failure("a = \"x\"y"), (ErrorKind::TrailingCharacters, Some(1)));
    assert_eq!(failure("a 1"), (ErrorKind::MalformedKey, Some(1)));
    assert_eq!(failure("\"a\" 1"), (ErrorKind::UnexpectedCharacter, Some(1)));
    assert_eq!(failure("arr = [1 2]"), (ErrorKind::UnexpectedCharacter, Some(1)));
    assert_eq!(failure("t = { a = 1 b = 2 }"), (ErrorKind::UnexpectedCharacter, Some(1)));
}

#[test]
fn error_display_names_kind_and_line() {
    let err = parse_str("ok = 1\nbad = [1, \"a\"]").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("heterogeneous array at line 2:"), "{}", msg);
    assert!(msg.contains("array of integer cannot hold a string"), "{}", msg);
}
