//! Builds an NFA from postfix tokens by Thompson construction.
use super::{tokenizer::Token, Automaton, State, StateId};
use crate::helper::safe_add;
use thiserror::Error;

/// Error raised while combining fragments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A token that cannot be combined, e.g. an unknown character or a
    /// parenthesis left over from an unbalanced pattern.
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),
    /// An operator without enough operands.
    #[error("missing operand for {0}")]
    MissingOperand(Token),
    /// More than one fragment is left after all tokens were consumed.
    #[error("malformed expression: {0} fragments left")]
    NotSingleFragment(usize),
    #[error("too many states")]
    StateOverflow,
}

/// A partial automaton with one entry and one accepting exit.
///
/// `end` is the only accepting state reachable from `start`. When a fragment
/// becomes part of a bigger one its `end` stops being accepting.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

/// Construction context. Owns the state arena, the id counter and the
/// fragment stack of a single build.
#[derive(Default, Debug)]
struct Builder {
    next_id: usize,
    states: Vec<State>,
    stack: Vec<Fragment>,
}

/// Builds an automaton from `postfix`.
///
/// An empty sequence yields a single state that is both start and accepting,
/// which matches only the empty string.
pub fn build(postfix: &[Token]) -> Result<Automaton, BuildError> {
    let mut builder = Builder::default();

    if postfix.is_empty() {
        let s = builder.new_state(true)?;
        builder.stack.push(Fragment { start: s, end: s });
    }

    for tok in postfix {
        builder.push_token(tok)?;
    }

    builder.finish()
}

impl Builder {
    fn push_token(&mut self, tok: &Token) -> Result<(), BuildError> {
        let frag = match tok {
            Token::Literal(c) => self.literal(*c)?,
            Token::Star => {
                let f = self.pop(tok)?;
                self.star(f)?
            }
            Token::Plus => {
                let f = self.pop(tok)?;
                self.plus(f)?
            }
            Token::Question => {
                let f = self.pop(tok)?;
                self.question(f)?
            }
            Token::Union => {
                let (f1, f2) = self.pop2(tok)?;
                self.union(f1, f2)?
            }
            Token::Concat => {
                let (f1, f2) = self.pop2(tok)?;
                self.concat(f1, f2)
            }
            Token::LParen | Token::RParen | Token::Unknown(_) => {
                return Err(BuildError::UnexpectedToken(*tok))
            }
        };

        self.stack.push(frag);
        Ok(())
    }

    fn finish(mut self) -> Result<Automaton, BuildError> {
        if self.stack.len() != 1 {
            return Err(BuildError::NotSingleFragment(self.stack.len()));
        }

        match self.stack.pop() {
            Some(Fragment { start, end }) => Ok(Automaton {
                states: self.states,
                start,
                end,
            }),
            None => Err(BuildError::NotSingleFragment(0)),
        }
    }

    fn pop(&mut self, op: &Token) -> Result<Fragment, BuildError> {
        self.stack.pop().ok_or(BuildError::MissingOperand(*op))
    }

    /// Pops the right operand and then the left one. Returns (left, right).
    fn pop2(&mut self, op: &Token) -> Result<(Fragment, Fragment), BuildError> {
        let right = self.pop(op)?;
        let left = self.pop(op)?;
        Ok((left, right))
    }

    fn new_state(&mut self, accept: bool) -> Result<StateId, BuildError> {
        let id = StateId(self.next_id);
        safe_add(&mut self.next_id, &1, || BuildError::StateOverflow)?;
        self.states.push(State::new(id, accept));
        Ok(id)
    }

    fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.0]
    }

    /// Turns `id` into an inner state: clears its accept flag and adds
    /// epsilon edges to `targets`.
    fn seal(&mut self, id: StateId, targets: &[StateId]) {
        let s = self.state_mut(id);
        s.accept = false;
        s.epsilon.extend_from_slice(targets);
    }

    /// ```text
    /// start --c--> end
    /// ```
    fn literal(&mut self, c: char) -> Result<Fragment, BuildError> {
        let start = self.new_state(false)?;
        let end = self.new_state(true)?;
        self.state_mut(start).transitions.insert(c, end);
        Ok(Fragment { start, end })
    }

    /// ```text
    /// start -e-> f.start ... f.end -e-> end
    /// start -e-> end
    /// f.end -e-> f.start
    /// ```
    fn star(&mut self, f: Fragment) -> Result<Fragment, BuildError> {
        let start = self.new_state(false)?;
        let end = self.new_state(true)?;
        self.state_mut(start).epsilon.extend([f.start, end]);
        self.seal(f.end, &[f.start, end]);
        Ok(Fragment { start, end })
    }

    /// Same as `star` without the `start -e-> end` bypass.
    fn plus(&mut self, f: Fragment) -> Result<Fragment, BuildError> {
        let start = self.new_state(false)?;
        let end = self.new_state(true)?;
        self.state_mut(start).epsilon.push(f.start);
        self.seal(f.end, &[f.start, end]);
        Ok(Fragment { start, end })
    }

    /// Same as `star` without the `f.end -e-> f.start` loop.
    fn question(&mut self, f: Fragment) -> Result<Fragment, BuildError> {
        let start = self.new_state(false)?;
        let end = self.new_state(true)?;
        self.state_mut(start).epsilon.extend([f.start, end]);
        self.seal(f.end, &[end]);
        Ok(Fragment { start, end })
    }

    /// ```text
    /// start -e-> f1.start ... f1.end -e-> end
    /// start -e-> f2.start ... f2.end -e-> end
    /// ```
    fn union(&mut self, f1: Fragment, f2: Fragment) -> Result<Fragment, BuildError> {
        let start = self.new_state(false)?;
        let end = self.new_state(true)?;
        self.state_mut(start).epsilon.extend([f1.start, f2.start]);
        self.seal(f1.end, &[end]);
        self.seal(f2.end, &[end]);
        Ok(Fragment { start, end })
    }

    /// Links `f1.end` to `f2.start`. No state is allocated.
    fn concat(&mut self, f1: Fragment, f2: Fragment) -> Fragment {
        self.seal(f1.end, &[f2.start]);
        Fragment {
            start: f1.start,
            end: f2.end,
        }
    }
}
