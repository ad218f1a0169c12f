//! Test support. Runtime matching is not part of the crate's surface, but
//! the tests need to check the language of a compiled automaton rather than
//! its exact shape, so this module runs a subset simulation over it.

use std::collections::{HashSet, VecDeque};

use crate::fsm::{Nfa, StateId};

/// All states reachable from `seeds` through epsilon edges alone, including
/// the seeds themselves.
pub(crate) fn epsilon_closure(nfa: &Nfa, seeds: &HashSet<StateId>) -> HashSet<StateId> {
    let mut closure = HashSet::new();
    let mut stack: Vec<StateId> = seeds.iter().copied().collect();
    while let Some(state) = stack.pop() {
        if closure.insert(state) {
            for &next in nfa.epsilons(state) {
                if !closure.contains(&next) {
                    stack.push(next);
                }
            }
        }
    }
    closure
}

/// Whether the automaton accepts `input` exactly, no anchoring semantics
/// beyond whole-string acceptance.
pub(crate) fn accepts(nfa: &Nfa, input: &str) -> bool {
    let mut current = epsilon_closure(nfa, &HashSet::from([nfa.start]));
    for symbol in input.chars() {
        let mut reached = HashSet::new();
        for &state in &current {
            if let Some(targets) = nfa.transitions(state).get(&symbol) {
                reached.extend(targets.iter().copied());
            }
        }
        if reached.is_empty() {
            return false;
        }
        current = epsilon_closure(nfa, &reached);
    }
    current.contains(&nfa.accept)
}

/// Every state reachable from the start over symbol or epsilon edges.
pub(crate) fn reachable_states(nfa: &Nfa) -> HashSet<StateId> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([nfa.start]);
    while let Some(state) = queue.pop_front() {
        if !visited.insert(state) {
            continue;
        }
        for targets in nfa.transitions(state).values() {
            queue.extend(targets.iter().copied());
        }
        queue.extend(nfa.epsilons(state).iter().copied());
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_closure_follows_chains() {
        let mut nfa = Nfa::new();
        let s0 = nfa.gen_state();
        let s1 = nfa.gen_state();
        let s2 = nfa.gen_state();
        nfa.add_epsilon(s0, s1);
        nfa.add_epsilon(s1, s2);

        let closure = epsilon_closure(&nfa, &HashSet::from([s0]));
        assert_eq!(closure, HashSet::from([s0, s1, s2]));
        assert_eq!(epsilon_closure(&nfa, &HashSet::from([s2])), HashSet::from([s2]));
    }

    #[test]
    fn test_epsilon_closure_terminates_on_cycles() {
        let mut nfa = Nfa::new();
        let s0 = nfa.gen_state();
        let s1 = nfa.gen_state();
        nfa.add_epsilon(s0, s1);
        nfa.add_epsilon(s1, s0);

        let closure = epsilon_closure(&nfa, &HashSet::from([s0]));
        assert_eq!(closure, HashSet::from([s0, s1]));
    }

    #[test]
    fn test_accepts_on_hand_built_automaton() {
        let mut nfa = Nfa::new();
        let s0 = nfa.gen_state();
        let s1 = nfa.gen_state();
        let s2 = nfa.gen_state();
        nfa.add_transition(s0, 'a', s1);
        nfa.add_epsilon(s1, s2);
        nfa.start = s0;
        nfa.accept = s2;

        assert!(accepts(&nfa, "a"));
        assert!(!accepts(&nfa, ""));
        assert!(!accepts(&nfa, "aa"));
        assert!(!accepts(&nfa, "b"));
    }

    #[test]
    fn test_reachable_states_ignores_orphans() {
        let mut nfa = Nfa::new();
        let s0 = nfa.gen_state();
        let s1 = nfa.gen_state();
        let orphan = nfa.gen_state();
        nfa.add_transition(s0, 'x', s1);
        nfa.start = s0;
        nfa.accept = s1;

        let reachable = reachable_states(&nfa);
        assert!(reachable.contains(&s0));
        assert!(reachable.contains(&s1));
        assert!(!reachable.contains(&orphan));
    }
}
