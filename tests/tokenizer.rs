use lexgraph::{tokenize, Cursor, Error, Matcher, RuleSet, Token, Tokenizer};
use pretty_assertions::assert_eq;

fn arithmetic_rules() -> RuleSet {
    let mut rules = RuleSet::new();
    rules.rule("number", Matcher::regex(r"-?(0|[1-9]\d*)").unwrap());
    rules.rule("operator", Matcher::regex(r"[-+]").unwrap());
    rules
        .rule("whitespace", Matcher::regex(r"\s+").unwrap())
        .skip();
    rules
}

/// Evaluates a sum expression like `3 + 5 - 1` on top of `expect()`.
fn calculate(expr: &str) -> Result<i64, Error> {
    let rules = arithmetic_rules();
    let mut tokens = Tokenizer::new(&rules, expr);
    let mut total = 0;
    let mut sign = 1;
    loop {
        let number = tokens.expect(&["number"])?;
        total += sign * number.value.parse::<i64>().unwrap_or(0);
        match tokens.advance()? {
            None => break,
            Some(op) => {
                assert_eq!(op.kind, "operator");
                sign = if op.value == "-" { -1 } else { 1 };
            }
        }
    }
    Ok(total)
}

#[test]
fn calculate_example() {
    assert_eq!(calculate("3 + 5 - 1").unwrap(), 7);

    let err = calculate("3 ++ 5 - 1").unwrap_err();
    match err {
        Error::UnexpectedToken { position, .. } => {
            assert_eq!(position, Cursor::new(3, 1, 4));
        }
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn tokenize_skips_whitespace() {
    let rules = arithmetic_rules();
    let tokens = tokenize(&rules, "3   +5 - 1").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    let values: Vec<_> = tokens.iter().map(|t| t.value).collect();
    assert_eq!(kinds, ["number", "operator", "number", "operator", "number"]);
    assert_eq!(values, ["3", "+", "5", "-", "1"]);
}

#[test]
fn zero_length_tokens_at_line_start() {
    let mut rules = RuleSet::new();
    rules
        .rule("indent", Matcher::regex("[ ]*").unwrap())
        .at_line_start_only();
    rules.rule("name", Matcher::regex(r"\w+").unwrap());
    rules.rule("ws", Matcher::regex(" +").unwrap()).skip();
    rules.rule("newline", Matcher::regex("\n").unwrap()).skip();

    let tokens = tokenize(&rules, "foobar baz\n  spam").unwrap();
    let tvs: Vec<_> = tokens.iter().map(Token::tv).collect();
    assert_eq!(
        tvs,
        [
            ("indent", ""),
            ("name", "foobar"),
            ("name", "baz"),
            ("indent", "  "),
            ("name", "spam"),
        ]
    );
}

#[test]
fn sentinel_is_emitted_exactly_once() {
    let mut rules = RuleSet::with_sentinel("eof", "");
    rules.rule("a", Matcher::regex("a+").unwrap());

    let mut tokens = Tokenizer::new(&rules, "aaaa");
    assert_eq!(
        tokens.expect(&["a", "eof"]).unwrap(),
        Token {
            kind: "a",
            value: "aaaa",
            position: Cursor::new(0, 1, 1),
            is_sentinel: false,
        }
    );
    assert_eq!(
        tokens.expect(&["a", "eof"]).unwrap(),
        Token {
            kind: "eof",
            value: "",
            position: Cursor::new(4, 1, 5),
            is_sentinel: true,
        }
    );
    assert_eq!(tokens.advance().unwrap(), None);
    assert!(tokens.is_exhausted());
    assert_eq!(tokens.advance().unwrap(), None);
}

#[test]
fn without_sentinel_iteration_simply_ends() {
    let mut rules = RuleSet::new();
    rules.rule("a", Matcher::regex("a+").unwrap());

    let tokens = tokenize(&rules, "aaaa").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(!tokens[0].is_sentinel);
}

#[test]
fn unmatched_input_reports_the_failing_position() {
    let rules = arithmetic_rules();
    let err = tokenize(&rules, "3 $ 4").unwrap_err();
    match err {
        Error::Tokenization { position } => assert_eq!(position, Cursor::new(2, 1, 3)),
        other => panic!("expected Tokenization, got {other:?}"),
    }
}

#[test]
fn expect_rejects_end_of_input() {
    let rules = arithmetic_rules();
    let mut tokens = Tokenizer::new(&rules, "7");
    tokens.expect(&["number"]).unwrap();
    let err = tokens.expect(&["number"]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedToken { .. }));
}

#[test]
fn string_literal_rule() {
    let mut rules = RuleSet::new();
    rules.rule("string", Matcher::string_literal());
    rules.rule("name", Matcher::regex(r"\w+").unwrap());
    rules.rule("ws", Matcher::regex(" +").unwrap()).skip();

    let tokens = tokenize(&rules, r#"f"foobar" plain 'x'"#).unwrap();
    let tvs: Vec<_> = tokens.iter().map(Token::tv).collect();
    assert_eq!(
        tvs,
        [
            ("string", r#"f"foobar""#),
            ("name", "plain"),
            ("string", "'x'"),
        ]
    );
}

#[test]
fn literal_rules_take_precedence_by_registration_order() {
    let mut rules = RuleSet::new();
    rules.rule("kw_let", Matcher::literal("let"));
    rules.rule("name", Matcher::regex(r"[a-z]+").unwrap());
    rules.rule("ws", Matcher::regex(" +").unwrap()).skip();

    let tokens = tokenize(&rules, "let letter").unwrap();
    let tvs: Vec<_> = tokens.iter().map(Token::tv).collect();
    // First match wins: "letter" still starts with "let", so the keyword
    // rule claims the prefix before the name rule gets a chance.
    assert_eq!(tvs, [("kw_let", "let"), ("kw_let", "let"), ("name", "ter")]);
}

#[test]
fn skip_only_input_yields_no_tokens() {
    let rules = arithmetic_rules();
    let tokens = tokenize(&rules, "   ").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn current_follows_the_last_produced_token() {
    let rules = arithmetic_rules();
    let mut tokens = Tokenizer::new(&rules, "1 + 2");
    assert!(tokens.current().is_none());
    tokens.advance().unwrap();
    assert_eq!(tokens.current().map(Token::tv), Some(("number", "1")));
    tokens.advance().unwrap();
    assert_eq!(tokens.current().map(Token::tv), Some(("operator", "+")));
}
