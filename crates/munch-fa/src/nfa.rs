use std::collections::{BTreeMap, BTreeSet};

use bit_set::BitSet;

use crate::{StateId, Symbol};

/// Anything subset construction can consume: transitions map a symbol to a
/// *set* of successors, and states may carry epsilon moves.
pub trait NondeterministicAutomaton {
    type Label: Ord + Copy;

    fn start(&self) -> StateId;

    fn state_count(&self) -> usize;

    fn label(&self, state: StateId) -> Option<Self::Label>;

    /// `None` when `state` has no transition on `symbol`.
    fn successors(&self, state: StateId, symbol: Symbol) -> Option<&BitSet>;

    fn epsilon_successors(&self, _state: StateId) -> Option<&BitSet> {
        None
    }

    /// Every symbol used by some transition, in ascending order.
    fn alphabet(&self) -> BTreeSet<Symbol>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState<L> {
    pub(crate) transitions: BTreeMap<Symbol, BitSet>,
    pub(crate) epsilon: BitSet,
    pub(crate) label: Option<L>,
}

impl<L> NfaState<L> {
    fn new() -> Self {
        NfaState {
            transitions: BTreeMap::new(),
            epsilon: BitSet::new(),
            label: None,
        }
    }

    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }

    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, &BitSet)> + '_ {
        self.transitions.iter().map(|(symbol, targets)| (*symbol, targets))
    }
}

// indices instead of pointers: state i lives at states[i], state 0 is the start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa<L> {
    pub(crate) states: Vec<NfaState<L>>,
}

impl<L: Ord + Copy> Default for Nfa<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Ord + Copy> Nfa<L> {
    pub fn new() -> Self {
        Nfa {
            states: vec![NfaState::new()],
        }
    }

    pub fn add_state(&mut self) -> StateId {
        StateId::from_push(&mut self.states, NfaState::new())
    }

    pub fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.states[from.index()]
            .transitions
            .entry(symbol)
            .or_default()
            .insert(to.index());
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from.index()].epsilon.insert(to.index());
    }

    /// Marks `state` accepting. An already accepting state keeps the smaller
    /// of the two labels.
    pub fn mark_accepting(&mut self, state: StateId, label: L) {
        let slot = &mut self.states[state.index()].label;
        *slot = Some(match *slot {
            Some(existing) => existing.min(label),
            None => label,
        });
    }

    /// Threads `pattern` through the trie rooted at the start state, reusing
    /// any shared prefix, and marks the final state with `label`.
    ///
    /// Returns the accepting state, or `None` for an empty pattern, which
    /// would otherwise make the start state accept the empty string.
    pub fn insert_literal(&mut self, pattern: &str, label: L) -> Option<StateId> {
        if pattern.is_empty() {
            return None;
        }

        let mut current = self.start();
        for symbol in pattern.chars() {
            // literal insertion never branches, so a successor set has at most one member
            let existing = self.states[current.index()]
                .transitions
                .get(&symbol)
                .and_then(|targets| targets.iter().next());

            current = match existing {
                Some(next) => StateId::new(next),
                None => {
                    let next = self.add_state();
                    self.add_transition(current, symbol, next);
                    next
                }
            };
        }

        self.mark_accepting(current, label);
        Some(current)
    }

    pub fn state(&self, state: StateId) -> &NfaState<L> {
        &self.states[state.index()]
    }
}

impl<L: Ord + Copy> NondeterministicAutomaton for Nfa<L> {
    type Label = L;

    fn start(&self) -> StateId {
        StateId::new(0)
    }

    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn label(&self, state: StateId) -> Option<L> {
        self.states[state.index()].label
    }

    fn successors(&self, state: StateId, symbol: Symbol) -> Option<&BitSet> {
        self.states[state.index()].transitions.get(&symbol)
    }

    fn epsilon_successors(&self, state: StateId) -> Option<&BitSet> {
        let epsilon = &self.states[state.index()].epsilon;
        if epsilon.is_empty() {
            None
        } else {
            Some(epsilon)
        }
    }

    fn alphabet(&self) -> BTreeSet<Symbol> {
        self.states
            .iter()
            .flat_map(|state| state.transitions.keys().copied())
            .collect()
    }
}
