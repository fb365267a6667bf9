use ctempl_core::template::Literal;

fn s(text: &str) -> Literal {
    Literal::Str(text.to_string())
}

#[test]
fn parses_repeat_dict_in_declaration_order() {
    let parsed = Literal::parse("{'NAME': ['sum', 'mean'], 'INIT': [\"0\", '1'],}").unwrap();
    assert_eq!(
        parsed,
        Literal::Dict(vec![
            ("NAME".to_string(), Literal::List(vec![s("sum"), s("mean")])),
            ("INIT".to_string(), Literal::List(vec![s("0"), s("1")])),
        ])
    );
}

#[test]
fn parses_nested_dtype_rows_across_whitespace() {
    let parsed = Literal::parse("[['float64', 'intp'],\n   ['int32',   'intp']]").unwrap();
    let rows: Vec<Vec<String>> = match parsed {
        Literal::List(rows) => rows.into_iter().map(|r| r.into_string_list().unwrap()).collect(),
        other => panic!("expected list, got {other:?}"),
    };
    assert_eq!(rows, vec![vec!["float64", "intp"], vec!["int32", "intp"]]);
}

#[test]
fn handles_escapes_inside_strings() {
    let parsed = Literal::parse(r#"['it\'s', "say \"hi\"", 'a\\b', 'x\n']"#).unwrap();
    let items = parsed.into_string_list().unwrap();
    assert_eq!(items, vec!["it's", "say \"hi\"", "a\\b", "x\n"]);
}

#[test]
fn duplicate_keys_keep_the_last_value() {
    let parsed = Literal::parse("{'A': ['1'], 'A': ['2']}").unwrap();
    assert_eq!(parsed, Literal::Dict(vec![("A".to_string(), Literal::List(vec![s("2")]))]));
}

#[test]
fn empty_containers_parse() {
    assert_eq!(Literal::parse("[]").unwrap(), Literal::List(vec![]));
    assert_eq!(Literal::parse(" { } ").unwrap(), Literal::Dict(vec![]));
}

#[test]
fn rejects_unterminated_string() {
    let err = Literal::parse("['abc").unwrap_err();
    assert!(err.contains("unterminated string"), "unexpected error: {err}");
}

#[test]
fn rejects_trailing_input() {
    let err = Literal::parse("['a'] extra").unwrap_err();
    assert!(err.contains("trailing input"), "unexpected error: {err}");
}

#[test]
fn rejects_non_string_dict_keys() {
    let err = Literal::parse("{['a']: 'b'}").unwrap_err();
    assert!(err.contains("dict keys must be strings"), "unexpected error: {err}");
}

#[test]
fn rejects_bare_words() {
    let err = Literal::parse("[float64]").unwrap_err();
    assert!(err.contains("unexpected character `f`"), "unexpected error: {err}");
}

#[test]
fn string_list_conversion_rejects_nested_lists() {
    let err = Literal::parse("[['a']]").unwrap().into_string_list().unwrap_err();
    assert!(err.contains("expected a string"), "unexpected error: {err}");
}
