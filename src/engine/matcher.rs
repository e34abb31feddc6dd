//! Runs an automaton over an input string by subset simulation.
use super::{sparse_set::SparseSet, Automaton, StateId};
use log::trace;
use std::mem::swap;

/// Returns true if the whole of `text` is accepted by `automaton`.
///
/// All states the NFA can be in are tracked at once, so the run takes
/// O(len(text) * states) time and never backtracks. There is no substring
/// search: `bc` does not match `abcd`.
pub fn matches(automaton: &Automaton, text: &str) -> bool {
    let n = automaton.len();
    let mut current = SparseSet::new(n);
    let mut next = SparseSet::new(n);
    let mut work = Vec::new();

    current.insert(automaton.start());
    epsilon_closure(automaton, &mut current, &mut work);

    for (i, c) in text.chars().enumerate() {
        next.clear();
        for id in current.iter() {
            if let Some(to) = automaton.states[id.0].transition(c) {
                next.insert(to);
            }
        }
        epsilon_closure(automaton, &mut next, &mut work);
        trace!("pos = {i}, char = {c:?}, states = {}", next.len());

        if next.is_empty() {
            return false;
        }
        swap(&mut current, &mut next);
    }

    let accepted = current.iter().any(|id| automaton.states[id.0].is_accept());
    accepted
}

/// Extends `set` with every state reachable from it through epsilon edges.
///
/// `work` is scratch space. Each state is expanded at most once, so epsilon
/// cycles terminate.
fn epsilon_closure(automaton: &Automaton, set: &mut SparseSet, work: &mut Vec<StateId>) {
    work.clear();
    work.extend(set.iter());

    while let Some(id) = work.pop() {
        for &to in automaton.states[id.0].epsilon() {
            if set.insert(to) {
                work.push(to);
            }
        }
    }
}
