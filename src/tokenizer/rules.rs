/// Rule definitions for the tokenizer.
///
/// A [`RuleSet`] is an ordered list of named [`Rule`]s, each wrapping a
/// [`Matcher`]. Matchers are a closed enum constructed at rule-set build
/// time; the tokenizer tries them in registration order and the first
/// successful match wins, regardless of match length.
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{escaped, is_not, take_while};
use nom::character::complete::{anychar, char};
use nom::combinator::{opt, recognize};
use nom::sequence::{delimited, pair};
use regex::Regex;

use crate::error::Result;
use crate::scanner::Scanner;

/// A matcher that, given the scanner state, either consumes a substring
/// (possibly zero-length) or declines and leaves the scanner untouched.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Regex match anchored at the cursor.
    Regex(Regex),
    /// Exact text match at the cursor.
    Literal(String),
    /// An optionally alpha-prefixed quoted string with backslash escapes,
    /// e.g. `f"foo"`, `'bar'` or `r"\d+"`.
    StringLiteral,
}

impl Matcher {
    /// Creates a regex matcher, failing if the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(Matcher::Regex(Regex::new(pattern)?))
    }

    /// Creates an exact-text matcher.
    pub fn literal(text: impl Into<String>) -> Self {
        Matcher::Literal(text.into())
    }

    /// Creates a quoted string literal matcher.
    pub fn string_literal() -> Self {
        Matcher::StringLiteral
    }

    /// Attempts a match at the scanner's cursor.
    ///
    /// On success the scanner is advanced past the matched text; on failure
    /// the scanner is left exactly where it was.
    pub(crate) fn try_match<'input>(&self, scanner: &mut Scanner<'input>) -> Option<&'input str> {
        match self {
            Matcher::Regex(pattern) => scanner.match_here(pattern).map(|found| found.as_str()),
            Matcher::Literal(text) => {
                let rest = scanner.rest();
                if rest.starts_with(text.as_str()) {
                    let value = &rest[..text.len()];
                    scanner.advance_to(scanner.pos().offset + value.len());
                    Some(value)
                } else {
                    None
                }
            }
            Matcher::StringLiteral => match string_literal(scanner.rest()) {
                Ok((_, value)) => {
                    scanner.advance_to(scanner.pos().offset + value.len());
                    Some(value)
                }
                Err(_) => None,
            },
        }
    }
}

fn string_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while(|c: char| c.is_ascii_alphabetic()),
        alt((double_quoted, single_quoted)),
    ))(input)
}

fn double_quoted(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('"'),
        opt(escaped(is_not("\"\\"), '\\', anychar)),
        char('"'),
    ))(input)
}

fn single_quoted(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('\''),
        opt(escaped(is_not("'\\"), '\\', anychar)),
        char('\''),
    ))(input)
}

/// A named matcher with its tokenization flags.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    matcher: Matcher,
    skip: bool,
    at_line_start_only: bool,
}

impl Rule {
    /// The token kind this rule produces.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Marks this rule's matches as consumed but not emitted as tokens.
    pub fn skip(&mut self) -> &mut Self {
        self.skip = true;
        self
    }

    /// Restricts this rule to positions where the column marks the start
    /// of a line.
    pub fn at_line_start_only(&mut self) -> &mut Self {
        self.at_line_start_only = true;
        self
    }

    pub fn is_skip(&self) -> bool {
        self.skip
    }

    pub fn is_at_line_start_only(&self) -> bool {
        self.at_line_start_only
    }

    pub(crate) fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

/// An ordered sequence of named rules, optionally with a sentinel token
/// emitted once when the input is exhausted.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    sentinel: Option<(&'static str, &'static str)>,
}

impl RuleSet {
    /// Creates an empty rule set with no sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty rule set that emits a `(kind, value)` sentinel
    /// token when the input is exhausted.
    pub fn with_sentinel(kind: &'static str, value: &'static str) -> Self {
        RuleSet {
            rules: Vec::new(),
            sentinel: Some((kind, value)),
        }
    }

    /// Registers a rule. Rules are evaluated in registration order.
    ///
    /// Returns the rule so flags can be chained:
    ///
    /// ```
    /// use lexgraph::{Matcher, RuleSet};
    ///
    /// let mut rules = RuleSet::new();
    /// rules.rule("word", Matcher::regex(r"\w+").unwrap());
    /// rules.rule("space", Matcher::regex(r"\s+").unwrap()).skip();
    /// ```
    pub fn rule(&mut self, name: &'static str, matcher: Matcher) -> &mut Rule {
        self.rules.push(Rule {
            name,
            matcher,
            skip: false,
            at_line_start_only: false,
        });
        let last = self.rules.len() - 1;
        &mut self.rules[last]
    }

    /// The registered rules in registration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The sentinel token, if one was declared.
    pub fn sentinel(&self) -> Option<(&'static str, &'static str)> {
        self.sentinel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_literal_accepts_prefixes_and_escapes() {
        assert_eq!(string_literal(r#"f"foobar""#), Ok(("", r#"f"foobar""#)));
        assert_eq!(string_literal(r#""a\"b" rest"#), Ok((" rest", r#""a\"b""#)));
        assert_eq!(string_literal("'' tail"), Ok((" tail", "''")));
        assert!(string_literal(r#" f"foobar""#).is_err());
        assert!(string_literal(r#""unterminated"#).is_err());
    }

    #[test]
    fn literal_matcher_is_anchored() {
        let mut scanner = Scanner::new("let x");
        let matcher = Matcher::literal("let");
        assert_eq!(matcher.try_match(&mut scanner), Some("let"));
        assert_eq!(scanner.pos().offset, 3);
        assert_eq!(matcher.try_match(&mut scanner), None);
        assert_eq!(scanner.pos().offset, 3);
    }
}
