//! # Regular expression matching with Thompson NFAs.
//!
//! A pattern is tokenized, reordered into postfix form, turned into an NFA
//! and then run over the input by subset simulation. Supported syntax:
//! ASCII alphanumeric literals, concatenation, `|`, `*`, `+`, `?` and
//! grouping with `(` and `)`. Matching is always against the whole input.
//!
//! ## Examples
//!
//! ```
//! let re = nfa_regex::compile("a(bb)+a*").unwrap();
//! assert!(nfa_regex::matches(&re, "abbbbaaaa"));
//! assert!(!nfa_regex::matches(&re, "abbb"));
//!
//! assert!(nfa_regex::do_matching("ab|cd", "cd").unwrap());
//! assert!(nfa_regex::compile("a.b").is_err());
//! ```
pub mod engine;
mod helper;

#[cfg(test)]
mod tests;

pub use engine::{
    builder::BuildError, compile, matcher::matches, print, Automaton, CompileError, State,
    StateId,
};

/// Compiles `pattern` and matches it against `text`.
///
/// Returns `Ok(true)` on match, `Ok(false)` otherwise, and `Err` if the
/// pattern is invalid. Use [`compile`] to match many inputs against the same
/// pattern.
pub fn do_matching(pattern: &str, text: &str) -> Result<bool, CompileError> {
    let automaton = compile(pattern)?;
    Ok(matches(&automaton, text))
}
