//! Regular expression engine.
//!
//! pattern -> tokens -> postfix tokens -> NFA -> match result
pub mod builder;
pub mod matcher;
mod sparse_set;
pub mod tokenizer;

use builder::BuildError;
use log::debug;
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};
use thiserror::Error;
use tokenizer::{Token, TokenKind};

/// Error returned by [`compile`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("unsupported character '{ch}' at position {pos}")]
    UnsupportedChar { pos: usize, ch: char },
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Identifier of a state, which is also its index in the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>04}", self.0)
    }
}

/// A node of the NFA.
///
/// Each state has at most one successor per input character, plus any
/// number of epsilon successors.
#[derive(Debug, Clone)]
pub struct State {
    id: StateId,
    accept: bool,
    transitions: BTreeMap<char, StateId>,
    epsilon: Vec<StateId>,
}

impl State {
    fn new(id: StateId, accept: bool) -> Self {
        State {
            id,
            accept,
            transitions: BTreeMap::new(),
            epsilon: Vec::new(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn is_accept(&self) -> bool {
        self.accept
    }

    /// Successor on input `c`, if any.
    pub fn transition(&self, c: char) -> Option<StateId> {
        self.transitions.get(&c).copied()
    }

    pub fn transitions(&self) -> impl Iterator<Item = (char, StateId)> + '_ {
        self.transitions.iter().map(|(c, id)| (*c, *id))
    }

    pub fn epsilon(&self) -> &[StateId] {
        &self.epsilon
    }
}

/// A compiled pattern.
///
/// States live in a single arena and refer to each other by [`StateId`], so
/// loops created by `*` and `+` need no shared ownership. Once built the
/// automaton is never modified; it can be shared between threads and queried
/// concurrently.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    start: StateId,
    end: StateId,
}

impl Automaton {
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The only accepting state.
    pub fn end(&self) -> StateId {
        self.end
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: even the empty pattern has one state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0)
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Whole-string match of `text`. See [`matcher::matches`].
    pub fn is_match(&self, text: &str) -> bool {
        matcher::matches(self, text)
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.states {
            write!(f, "{}:", s.id)?;
            if s.id == self.start {
                write!(f, " start")?;
            }
            if s.accept {
                write!(f, " accept")?;
            }
            for (c, to) in s.transitions() {
                write!(f, " '{c}' -> {to}")?;
            }
            for to in &s.epsilon {
                write!(f, " eps -> {to}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Compiles `pattern` into an automaton.
///
/// Characters other than ASCII alphanumerics and `| * + ? ( )` are rejected
/// with [`CompileError::UnsupportedChar`]. The empty pattern matches only the
/// empty string. An empty group is not an operand: `()` alone is the same as
/// the empty pattern, but `()a` or `a|()` fail with
/// [`BuildError::MissingOperand`].
pub fn compile(pattern: &str) -> Result<Automaton, CompileError> {
    let tokens = tokenizer::tokenize(pattern);
    if let Some((pos, tok)) = tokens
        .iter()
        .enumerate()
        .find(|(_, t)| t.kind() == TokenKind::Unknown)
    {
        debug!("rejecting pattern {pattern:?}: unsupported {tok} at {pos}");
        return Err(CompileError::UnsupportedChar {
            pos,
            ch: tok.as_char(),
        });
    }

    let postfix = tokenizer::to_postfix(&tokenizer::insert_concats(&tokens));
    let automaton = builder::build(&postfix)
        .inspect_err(|e| debug!("failed to build {pattern:?}: {e}"))?;

    debug!(
        "compiled {pattern:?}: postfix = {}, states = {}",
        postfix_string(&postfix),
        automaton.len()
    );

    Ok(automaton)
}

/// Parses `pattern` and prints its tokens, its postfix form and the states of
/// the resulting automaton to stdout.
///
/// # Examples
///
/// ```
/// nfa_regex::print("a(bb)+a*").unwrap();
/// ```
pub fn print(pattern: &str) -> Result<(), CompileError> {
    println!("pattern: {pattern}");

    let tokens = tokenizer::tokenize(pattern);
    print!("tokens:");
    for t in &tokens {
        print!(" {t}");
    }
    println!();

    let postfix = tokenizer::to_postfix(&tokenizer::insert_concats(&tokens));
    println!("postfix: {}", postfix_string(&postfix));

    let automaton = compile(pattern)?;
    println!();
    println!("states:");
    print!("{automaton}");

    Ok(())
}

fn postfix_string(postfix: &[Token]) -> String {
    postfix.iter().map(Token::as_char).collect()
}
