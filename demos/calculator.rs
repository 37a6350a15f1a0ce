//! Sum-expression calculator built on the tokenizer.
//!
//! Run with: `cargo run --example calculator -- "3 + 5 - 1"`

use lexgraph::{Matcher, Result, RuleSet, Tokenizer};

fn main() -> Result<()> {
    let expr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "3 + 5 - 1".to_string());

    let mut rules = RuleSet::with_sentinel("eof", "");
    rules.rule("number", Matcher::regex(r"-?(0|[1-9]\d*)")?);
    rules.rule("operator", Matcher::regex(r"[-+]")?);
    rules.rule("whitespace", Matcher::regex(r"\s+")?).skip();

    let mut tokens = Tokenizer::new(&rules, &expr);
    let mut total: i64 = 0;
    let mut sign = 1;
    loop {
        let number = tokens.expect(&["number"])?;
        total += sign * number.value.parse::<i64>().unwrap_or(0);
        let operator = tokens.expect(&["operator", "eof"])?;
        if operator.is_sentinel {
            break;
        }
        sign = if operator.value == "-" { -1 } else { 1 };
    }

    println!("{expr} = {total}");
    Ok(())
}
