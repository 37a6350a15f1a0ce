/// Rule-driven tokenization of text input.
///
/// This module provides the `Tokenizer` struct, which drives a [`Scanner`]
/// with an ordered [`RuleSet`] to produce a lazy sequence of [`Token`]s.
/// Tokens are pulled one at a time with [`Tokenizer::advance`]; the
/// tokenizer also implements `Iterator` for convenience.
use log::trace;

use crate::error::{Error, Result};
use crate::scanner::{Cursor, Scanner};

pub mod rules;

pub use rules::{Matcher, Rule, RuleSet};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A token produced by the tokenizer. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token<'input> {
    /// The name of the rule that produced this token (or the sentinel kind).
    pub kind: &'static str,
    /// The matched text, possibly empty.
    pub value: &'input str,
    /// Position of the start of the token.
    pub position: Cursor,
    /// Whether this is the synthetic end-of-input sentinel.
    pub is_sentinel: bool,
}

impl<'input> Token<'input> {
    /// The `(kind, value)` pair, convenient for assertions and matching.
    pub fn tv(&self) -> (&'static str, &'input str) {
        (self.kind, self.value)
    }
}

/// Lifecycle of the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Rules are still being applied to unconsumed input.
    Scanning,
    /// The sentinel token has been handed out; the next pull ends the stream.
    SentinelEmitted,
    /// Terminal. Every further pull yields nothing.
    Exhausted,
}

/// Converts a scanner's character stream into typed tokens under rule
/// precedence.
///
/// Rules are tried in registration order at the current position and the
/// first match wins. Matches from `skip` rules consume input without
/// surfacing a token. When the input is exhausted, a sentinel token is
/// emitted exactly once if the rule set declares one.
///
/// Zero-length matches are legal and emit a token, but a given buffer
/// offset produces at most one zero-length token: a second zero-length
/// match at the same offset is declined and the rule scan continues with
/// the remaining rules. Callers are still responsible for rule sets that
/// make progress overall; a set whose rules only ever match zero-length
/// away from the end of input will loop.
pub struct Tokenizer<'rules, 'input> {
    scanner: Scanner<'input>,
    rules: &'rules RuleSet,
    current: Option<Token<'input>>,
    state: State,
    last_empty: Option<usize>,
}

impl<'rules, 'input> Tokenizer<'rules, 'input> {
    /// Creates a tokenizer over `text`. No input is consumed until the
    /// first [`Tokenizer::advance`] call.
    pub fn new(rules: &'rules RuleSet, text: &'input str) -> Self {
        Tokenizer {
            scanner: Scanner::new(text),
            rules,
            current: None,
            state: State::Scanning,
            last_empty: None,
        }
    }

    /// The most recently produced token, if any.
    pub fn current(&self) -> Option<&Token<'input>> {
        self.current.as_ref()
    }

    /// The underlying scanner, positioned after the current token.
    pub fn scanner(&self) -> &Scanner<'input> {
        &self.scanner
    }

    /// Whether the token stream has ended (including the sentinel).
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Produces the next token.
    ///
    /// Returns `Ok(None)` once the stream has ended; further calls keep
    /// returning `Ok(None)`. Fails with [`Error::Tokenization`] when no
    /// rule matches at a non-end position, leaving the scanner at the
    /// failing position.
    pub fn advance(&mut self) -> Result<Option<Token<'input>>> {
        let rules = self.rules;
        loop {
            match self.state {
                State::Scanning => {}
                State::SentinelEmitted => {
                    self.state = State::Exhausted;
                    self.current = None;
                    return Ok(None);
                }
                State::Exhausted => {
                    self.current = None;
                    return Ok(None);
                }
            }

            if self.scanner.is_at_end() {
                match rules.sentinel() {
                    Some((kind, value)) => {
                        self.state = State::SentinelEmitted;
                        let token = Token {
                            kind,
                            value,
                            position: self.scanner.pos(),
                            is_sentinel: true,
                        };
                        self.current = Some(token);
                        return Ok(Some(token));
                    }
                    None => {
                        self.state = State::Exhausted;
                        self.current = None;
                        return Ok(None);
                    }
                }
            }

            let start = self.scanner.pos();
            let mut matched: Option<(&Rule, &'input str)> = None;
            for rule in rules.rules() {
                if rule.is_at_line_start_only() && start.column != 1 {
                    continue;
                }
                if let Some(value) = rule.matcher().try_match(&mut self.scanner) {
                    if value.is_empty() && self.last_empty == Some(start.offset) {
                        // This offset already produced a zero-length token;
                        // the scanner did not move, so keep trying rules.
                        continue;
                    }
                    matched = Some((rule, value));
                    break;
                }
            }

            let Some((rule, value)) = matched else {
                return Err(Error::Tokenization { position: start });
            };
            if value.is_empty() {
                self.last_empty = Some(start.offset);
            }
            trace!("rule {:?} matched {:?} at {}", rule.name(), value, start);
            if rule.is_skip() {
                continue;
            }

            let token = Token {
                kind: rule.name(),
                value,
                position: start,
                is_sentinel: false,
            };
            self.current = Some(token);
            return Ok(Some(token));
        }
    }

    /// Advances and requires the produced token's kind to be in `expected`.
    ///
    /// End of input also counts as unexpected. Used for grammar-directed
    /// parsing built on top of the tokenizer.
    pub fn expect(&mut self, expected: &[&'static str]) -> Result<Token<'input>> {
        let position = self.scanner.pos();
        match self.advance()? {
            Some(token) if expected.contains(&token.kind) => Ok(token),
            Some(token) => Err(Error::UnexpectedToken {
                expected: expected.to_vec(),
                found: format!("{} {:?}", token.kind, token.value),
                position: token.position,
            }),
            None => Err(Error::UnexpectedToken {
                expected: expected.to_vec(),
                found: "end of input".to_string(),
                position,
            }),
        }
    }
}

impl<'input> Iterator for Tokenizer<'_, 'input> {
    type Item = Result<Token<'input>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
