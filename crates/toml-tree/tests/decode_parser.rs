use toml_tree::{Datetime, Kind, Value, parse_str};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn scalars_and_comments() -> TestResult {
    let doc = parse_str(
        "# leading comment\n\
         title = \"TOML\" # trailing\n\
         \n\
         \tcount = 1_000\n\
         ratio = -0.25\n\
         big = 6.626e-34\n\
         on = true\n\
         off = false\n",
    )?;
    assert_eq!(doc.get_as::<String>("title").as_deref(), Some("TOML"));
    assert_eq!(doc.get_as::<i64>("count"), Some(1000));
    assert_eq!(doc.get_as::<f64>("ratio"), Some(-0.25));
    assert_eq!(doc.get_as::<f64>("big"), Some(6.626e-34));
    assert_eq!(doc.get_as::<bool>("on"), Some(true));
    assert_eq!(doc.get_as::<bool>("off"), Some(false));
    assert_eq!(doc.len(), 6);
    Ok(())
}

#[test]
fn qualified_key_resolution() -> TestResult {
    let doc = parse_str("[a]\nb = 1\n[a.c]\nd = 2\n")?;
    assert_eq!(doc.get_qualified("a.c.d")?, &Value::Integer(2));
    assert_eq!(doc.get_qualified("a.b")?.as_integer(), Some(1));
    let err = doc.get_qualified("a.x").unwrap_err();
    assert_eq!(err.kind(), toml_tree::ErrorKind::KeyNotFound);
    Ok(())
}

#[test]
fn implicit_table_may_be_defined_later() -> TestResult {
    let doc = parse_str("[a.b]\n[a]\ny=2\n")?;
    assert_eq!(doc.get_qualified_as::<i64>("a.y")?, Some(2));
    assert!(doc.get_table_qualified("a.b")?.is_some_and(|t| t.is_empty()));
    Ok(())
}

#[test]
fn table_arrays_collect_tables() -> TestResult {
    let doc = parse_str("[[fruit]]\nname=\"apple\"\n[[fruit]]\nname=\"banana\"\n")?;
    let fruit = doc.get_table_array("fruit").ok_or("fruit missing")?;
    assert_eq!(fruit.len(), 2);
    let names: Vec<Option<String>> = fruit.iter().map(|t| t.get_as::<String>("name")).collect();
    assert_eq!(names, vec![Some("apple".to_owned()), Some("banana".to_owned())]);
    Ok(())
}

#[test]
fn sub_tables_attach_to_last_table_array_element() -> TestResult {
    let doc = parse_str(
        "[[fruit]]\n\
         name = \"apple\"\n\
         [fruit.physical]\n\
         color = \"red\"\n\
         [[fruit.variety]]\n\
         name = \"red delicious\"\n\
         [[fruit.variety]]\n\
         name = \"granny smith\"\n\
         [[fruit]]\n\
         name = \"banana\"\n\
         [[fruit.variety]]\n\
         name = \"plantain\"\n",
    )?;
    let fruit = doc.get_table_array("fruit").ok_or("fruit missing")?;
    assert_eq!(fruit.len(), 2);
    let apple = fruit.get(0).ok_or("apple missing")?;
    assert_eq!(apple.get_qualified_as::<String>("physical.color")?.as_deref(), Some("red"));
    assert_eq!(apple.get_table_array("variety").map(|v| v.len()), Some(2));
    let banana = fruit.get(1).ok_or("banana missing")?;
    assert!(!banana.contains("physical"));
    assert_eq!(banana.get_table_array("variety").map(|v| v.len()), Some(1));
    Ok(())
}

#[test]
fn escapes_in_basic_strings() -> TestResult {
    let doc = parse_str(r#"s = "a\tb"
all = "\b\t\n\f\r\"\\"
lit = 'C:\Users\nobody'
"#)?;
    assert_eq!(doc.get_as::<String>("s").as_deref(), Some("a\tb"));
    assert_eq!(
        doc.get_as::<String>("all").as_deref(),
        Some("\u{0008}\t\n\u{000C}\r\"\\")
    );
    assert_eq!(doc.get_as::<String>("lit").as_deref(), Some(r"C:\Users\nobody"));
    Ok(())
}

#[test]
fn multiline_strings() -> TestResult {
    let doc = parse_str("s = \"\"\"line1\nline2\"\"\"\n")?;
    assert_eq!(doc.get_as::<String>("s").as_deref(), Some("line1\nline2"));

    let doc = parse_str("s = \"\"\"\nfirst\n  second\n\"\"\"\n")?;
    assert_eq!(doc.get_as::<String>("s").as_deref(), Some("first\n  second\n"));

    let doc = parse_str("s = '''\nraw \\n text\n'''\n")?;
    assert_eq!(doc.get_as::<String>("s").as_deref(), Some("raw \\n text\n"));
    Ok(())
}

#[test]
fn line_ending_backslash_joins_lines() -> TestResult {
    let doc = parse_str("s = \"\"\"The quick \\\n\n     brown \\\n   fox.\"\"\"\n")?;
    assert_eq!(doc.get_as::<String>("s").as_deref(), Some("The quick brown fox."));
    Ok(())
}

#[test]
fn arrays_of_arrays_are_independently_uniform() -> TestResult {
    let doc = parse_str("arr = [[1,2], [\"a\",\"b\"]]\n")?;
    let arr = doc.get_array("arr").ok_or("arr missing")?;
    assert_eq!(arr.element_kind(), Some(Kind::Array));
    let inner = arr.nested_arrays();
    assert_eq!(inner.len(), 2);
    assert_eq!(inner[0].map(|a| a.values_of::<i64>()), Some(vec![Some(1), Some(2)]));
    assert_eq!(inner[1].and_then(|a| a.element_kind()), Some(Kind::String));
    Ok(())
}

#[test]
fn multi_line_array_with_comments_and_trailing_comma() -> TestResult {
    let doc = parse_str(
        "hosts = [\n\
         \t\"alpha\", # first\n\
         \n\
         \t\"omega\",\n\
         ]\n\
         after = 1\n",
    )?;
    let hosts = doc.get_array("hosts").ok_or("hosts missing")?;
    assert_eq!(
        hosts.values_of::<String>(),
        vec![Some("alpha".to_owned()), Some("omega".to_owned())]
    );
    assert_eq!(doc.get_as::<i64>("after"), Some(1));
    Ok(())
}

#[test]
fn inline_tables_and_arrays_of_them() -> TestResult {
    let doc = parse_str(
        "point = { x = 1, y = 2 }\n\
         empty = {}\n\
         points = [ { x = 1 }, { x = 2, tag = \"b\" } ]\n",
    )?;
    assert_eq!(doc.get_qualified_as::<i64>("point.y")?, Some(2));
    assert!(doc.get_table("empty").is_some_and(|t| t.is_empty()));
    let points = doc.get_array("points").ok_or("points missing")?;
    assert_eq!(points.element_kind(), Some(Kind::Table));
    assert_eq!(
        points.get(1).and_then(Value::as_table).and_then(|t| t.get_as::<String>("tag")),
        Some("b".to_owned())
    );
    Ok(())
}

#[test]
fn dotted_and_quoted_keys() -> TestResult {
    let doc = parse_str(
        "site.\"google.com\" = true\n\
         'literal key' = 1\n\
         [dog.\"tater.man\"]\n\
         type.name = \"pug\"\n",
    )?;
    let site = doc.get_table("site").ok_or("site missing")?;
    assert_eq!(site.get_as::<bool>("google.com"), Some(true));
    assert_eq!(doc.get_as::<i64>("literal key"), Some(1));
    let tater = doc
        .get_table("dog")
        .and_then(|d| d.get_table("tater.man"))
        .ok_or("tater.man missing")?;
    assert_eq!(tater.get_qualified_as::<String>("type.name")?.as_deref(), Some("pug"));
    Ok(())
}

#[test]
fn whitespace_around_header_segments() -> TestResult {
    let doc = parse_str("[ a . b ]\nx = 1\n[[ list ]]\n")?;
    assert_eq!(doc.get_qualified_as::<i64>("a.b.x")?, Some(1));
    assert_eq!(doc.get_table_array("list").map(|l| l.len()), Some(1));
    Ok(())
}

#[test]
fn datetimes() -> TestResult {
    let doc = parse_str(
        "utc = 1979-05-27T07:32:00Z\n\
         offset = 1979-05-27T00:32:00.999999-07:00\n\
         short = 1979-05-27T00:32:00.5+05:30\n",
    )?;
    assert_eq!(doc.get_as::<Datetime>("utc"), Some(Datetime::new(1979, 5, 27, 7, 32, 0)?));
    let offset = doc.get_as::<Datetime>("offset").ok_or("offset missing")?;
    assert_eq!(offset.microsecond(), Some(999_999));
    assert_eq!((offset.hour_offset(), offset.minute_offset()), (-7, 0));
    let short = doc.get_as::<Datetime>("short").ok_or("short missing")?;
    assert_eq!(short.microsecond(), Some(500_000));
    assert_eq!(short.offset_seconds(), 5 * 3600 + 30 * 60);
    Ok(())
}

#[test]
fn non_finite_floats() -> TestResult {
    let doc = parse_str("a = inf\nb = -inf\nc = nan\nd = +inf\n")?;
    assert_eq!(doc.get_as::<f64>("a"), Some(f64::INFINITY));
    assert_eq!(doc.get_as::<f64>("b"), Some(f64::NEG_INFINITY));
    assert!(doc.get_as::<f64>("c").is_some_and(f64::is_nan));
    assert_eq!(doc.get_as::<f64>("d"), Some(f64::INFINITY));
    Ok(())
}

#[test]
fn crlf_and_byte_order_mark() -> TestResult {
    let doc = parse_str("\u{feff}a = 1\r\n[t]\r\nb = \"x\"\r\n")?;
    assert_eq!(doc.get_as::<i64>("a"), Some(1));
    assert_eq!(doc.get_qualified_as::<String>("t.b")?.as_deref(), Some("x"));
    Ok(())
}

#[test]
fn integer_limits() -> TestResult {
    let doc = parse_str("max = 9223372036854775807\nmin = -9223372036854775808\n")?;
    assert_eq!(doc.get_as::<i64>("max"), Some(i64::MAX));
    assert_eq!(doc.get_as::<i64>("min"), Some(i64::MIN));
    Ok(())
}

#[test]
fn empty_document() -> TestResult {
    assert!(parse_str("")?.is_empty());
    assert!(parse_str("\n  # only a comment\n\n")?.is_empty());
    Ok(())
}

#[test]
fn reader_and_file_entry_points() -> TestResult {
    let doc = toml_tree::parse("a = 1\n".as_bytes())?;
    assert_eq!(doc.get_as::<i64>("a"), Some(1));

    let err = toml_tree::parse_file("/definitely/not/here.toml").unwrap_err();
    assert_eq!(err.kind(), toml_tree::ErrorKind::Io);
    Ok(())
}
