use std::collections::{HashMap, HashSet};

/// Index of a state in the automaton's arena. States are compared by index,
/// never by their outgoing edges: two states with identical transitions are
/// still distinct states.
pub type StateId = usize;

/// A sub-automaton under construction, as its entry state and its single
/// accepting state. Fragments are transient: composing one into a larger
/// fragment consumes it, only the states it points at persist.
pub type Fragment = (StateId, StateId);

#[derive(Debug, Default, Clone)]
struct State {
    transitions: HashMap<char, HashSet<StateId>>,
    epsilon: HashSet<StateId>,
}

/// A non-deterministic finite automaton. The arena owns every state created
/// while compiling an expression; they are dropped together with the
/// automaton.
#[derive(Debug, Default)]
pub struct Nfa {
    states: Vec<State>,
    pub start: StateId,
    pub accept: StateId,
}

impl Nfa {
    pub fn new() -> Nfa {
        Nfa {
            states: Vec::new(),
            start: Default::default(),
            accept: Default::default(),
        }
    }

    pub fn gen_state(&mut self) -> StateId {
        self.states.push(State::default());
        self.states.len() - 1
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Outgoing symbol transitions of a state, symbol to set of targets.
    /// Multiple targets for one symbol is what makes the automaton
    /// non-deterministic.
    pub fn transitions(&self, state: StateId) -> &HashMap<char, HashSet<StateId>> {
        &self.states[state].transitions
    }

    /// Outgoing epsilon transitions of a state.
    pub fn epsilons(&self, state: StateId) -> &HashSet<StateId> {
        &self.states[state].epsilon
    }

    pub fn add_transition(&mut self, from: StateId, symbol: char, to: StateId) {
        self.states[from]
            .transitions
            .entry(symbol)
            .or_default()
            .insert(to);
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].epsilon.insert(to);
    }

    fn fragment(&mut self) -> Fragment {
        (self.gen_state(), self.gen_state())
    }

    /// Fragment accepting exactly the one-character string `symbol`.
    pub fn literal(&mut self, symbol: char) -> Fragment {
        let (start, end) = self.fragment();
        self.add_transition(start, symbol, end);
        (start, end)
    }

    /// Kleene star over `inner`, zero or more repetitions.
    pub fn star(&mut self, inner: Fragment) -> Fragment {
        let (start, end) = self.fragment();
        self.add_epsilon(start, inner.0);
        // zero repetitions must stay reachable
        self.add_epsilon(start, end);
        self.add_epsilon(inner.1, inner.0);
        self.add_epsilon(inner.1, end);
        (start, end)
    }

    /// A fresh entry forks into both fragments and both accepts rejoin at a
    /// fresh exit.
    pub fn union(&mut self, lower: Fragment, upper: Fragment) -> Fragment {
        let (start, end) = self.fragment();
        self.add_epsilon(start, lower.0);
        self.add_epsilon(start, upper.0);
        self.add_epsilon(lower.1, end);
        self.add_epsilon(upper.1, end);
        (start, end)
    }

    /// Sequence `first` then `second` by bridging them with an epsilon edge.
    pub fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.add_epsilon(first.1, second.0);
        (first.0, second.1)
    }
}
