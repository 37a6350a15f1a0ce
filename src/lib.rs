// Core modules
pub mod digraph;
pub mod error;
pub mod scanner;
pub mod tokenizer;

// Re-export key types for public API
pub use digraph::algorithm::{remove_with_predecessors, topological_sort};
pub use digraph::DiGraph;
pub use error::{Error, Result};
pub use scanner::{Cursor, Scanner, Whence};
pub use tokenizer::{Matcher, Rule, RuleSet, Token, Tokenizer};

/// Tokenizes `text` with the given rule set and collects the result.
///
/// This is the simplest entry point for the tokenizer: it drives a
/// [`Tokenizer`] to exhaustion (including the sentinel token if the rule
/// set declares one) and returns every non-skip token in order.
///
/// # Errors
///
/// Fails with [`Error::Tokenization`] if some position in `text` is not
/// covered by any rule.
///
/// # Examples
///
/// ```
/// use lexgraph::{tokenize, Matcher, RuleSet};
///
/// let mut rules = RuleSet::new();
/// rules.rule("word", Matcher::regex(r"\w+").unwrap());
/// rules.rule("space", Matcher::regex(r"\s+").unwrap()).skip();
///
/// let tokens = tokenize(&rules, "hello world").unwrap();
/// let values: Vec<_> = tokens.iter().map(|t| t.value).collect();
/// assert_eq!(values, ["hello", "world"]);
/// ```
pub fn tokenize<'input>(rules: &RuleSet, text: &'input str) -> Result<Vec<Token<'input>>> {
    Tokenizer::new(rules, text).collect()
}
