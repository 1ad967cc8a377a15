use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
};

use petgraph::graph::{Graph, NodeIndex};

use crate::{StateId, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState<L> {
    pub(crate) transitions: BTreeMap<Symbol, StateId>,
    pub(crate) label: Option<L>,
}

impl<L> DfaState<L> {
    pub(crate) fn new(label: Option<L>) -> Self {
        DfaState {
            transitions: BTreeMap::new(),
            label,
        }
    }

    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }

    pub fn is_accepting(&self) -> bool {
        self.label.is_some()
    }

    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, StateId)> + '_ {
        self.transitions.iter().map(|(symbol, target)| (*symbol, *target))
    }
}

/// Deterministic automaton: at most one successor per symbol, start state 0.
///
/// Only [`determinize`](crate::determinize) and [`minimize`](crate::minimize)
/// produce values of this type, and nothing mutates one afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa<L> {
    pub(crate) states: Vec<DfaState<L>>,
}

impl<L: Copy> Dfa<L> {
    pub fn start(&self) -> StateId {
        StateId::new(0)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, state: StateId) -> &DfaState<L> {
        &self.states[state.index()]
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &DfaState<L>)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId::new(i), state))
    }

    pub fn step(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.states[state.index()].transitions.get(&symbol).copied()
    }

    pub fn label(&self, state: StateId) -> Option<L> {
        self.states[state.index()].label
    }

    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.states
            .iter()
            .flat_map(|state| state.transitions.keys().copied())
            .collect()
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|state| state.transitions.len()).sum()
    }

    /// Runs the whole of `input` and returns the label of the state it ends
    /// in; `None` if the walk gets stuck or ends in a non-accepting state.
    pub fn simulate(&self, input: &str) -> Option<L> {
        let mut state = self.start();
        for symbol in input.chars() {
            state = self.step(state, symbol)?;
        }
        self.label(state)
    }

    /// Relabels every accepting state, keeping the transition structure.
    pub fn map_labels<M, F>(&self, mut f: F) -> Dfa<M>
    where
        F: FnMut(L) -> M,
    {
        let states = self
            .states
            .iter()
            .map(|state| DfaState {
                transitions: state.transitions.clone(),
                label: state.label.map(&mut f),
            })
            .collect();

        Dfa { states }
    }
}

impl<L: Copy + Display> Dfa<L> {
    /// Graph view for DOT output; nodes are `id` or `id [label]`, edges carry
    /// the escaped symbol.
    pub fn to_graph(&self) -> Graph<String, String> {
        let mut graph = Graph::with_capacity(self.states.len(), self.transition_count());
        let nodes: Vec<NodeIndex> = self
            .states()
            .map(|(id, state)| match &state.label {
                Some(label) => graph.add_node(format!("{id} [{label}]")),
                None => graph.add_node(id.to_string()),
            })
            .collect();

        for (id, state) in self.states() {
            for (symbol, target) in state.transitions() {
                graph.add_edge(
                    nodes[id.index()],
                    nodes[target.index()],
                    symbol.escape_debug().to_string(),
                );
            }
        }

        graph
    }
}

// transition table dump, one block per state
impl<L: Copy + Display> Display for Dfa<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, state) in self.states() {
            write!(f, "state {id}")?;
            if let Some(label) = &state.label {
                write!(f, " [accept, {label}]")?;
            }
            writeln!(f, ":")?;
            for (symbol, target) in state.transitions() {
                writeln!(f, "    {} -> {target}", symbol.escape_debug())?;
            }
        }
        write!(f, "start: {}", self.start())
    }
}
