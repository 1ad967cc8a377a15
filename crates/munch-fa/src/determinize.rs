use std::collections::{hash_map::Entry, HashMap, VecDeque};

use bit_set::BitSet;

use crate::{
    dfa::{Dfa, DfaState},
    nfa::NondeterministicAutomaton,
    StateId, Symbol,
};

/// Subset construction. Every reachable set of source states becomes one
/// deterministic state, allocated in discovery order, so the start set gets
/// id 0 and a trie maps one-to-one onto its result.
#[tracing::instrument(level = "debug", skip_all, fields(nfa_states = nfa.state_count()))]
pub fn determinize<A: NondeterministicAutomaton>(nfa: &A) -> Dfa<A::Label> {
    let alphabet: Vec<Symbol> = nfa.alphabet().into_iter().collect();

    let mut initial_configuration = BitSet::with_capacity(nfa.state_count());
    initial_configuration.insert(nfa.start().index());
    epsilon_closure(nfa, &mut initial_configuration);

    let mut states: Vec<DfaState<A::Label>> = Vec::new();
    // configuration -> id
    let mut subsets: HashMap<BitSet, StateId> = HashMap::new();
    let mut work_queue: VecDeque<(BitSet, StateId)> = VecDeque::new();

    let initial_state = StateId::from_push(
        &mut states,
        DfaState::new(resolve_label(nfa, &initial_configuration)),
    );
    subsets.insert(initial_configuration.clone(), initial_state);
    work_queue.push_back((initial_configuration, initial_state));

    while let Some((configuration, source)) = work_queue.pop_front() {
        for &symbol in &alphabet {
            let mut target = delta(nfa, &configuration, symbol);
            if target.is_empty() {
                continue;
            }
            epsilon_closure(nfa, &mut target);

            let target_state = match subsets.entry(target) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let label = resolve_label(nfa, entry.key());
                    let id = StateId::from_push(&mut states, DfaState::new(label));
                    work_queue.push_back((entry.key().clone(), id));
                    entry.insert(id);
                    id
                }
            };

            states[source.index()].transitions.insert(symbol, target_state);
        }
    }

    tracing::debug!(dfa_states = states.len(), "subset construction finished");
    Dfa { states }
}

// basic BFS over epsilon moves
fn epsilon_closure<A: NondeterministicAutomaton>(nfa: &A, set: &mut BitSet) {
    let mut queue: VecDeque<usize> = set.iter().collect();

    while let Some(i) = queue.pop_front() {
        if let Some(next) = nfa.epsilon_successors(StateId::new(i)) {
            for n in next.iter() {
                if set.insert(n) {
                    queue.push_back(n);
                }
            }
        }
    }
}

fn delta<A: NondeterministicAutomaton>(nfa: &A, set: &BitSet, symbol: Symbol) -> BitSet {
    let mut result = BitSet::with_capacity(nfa.state_count());

    for i in set.iter() {
        if let Some(targets) = nfa.successors(StateId::new(i), symbol) {
            result.union_with(targets);
        }
    }

    result
}

// accepting iff some member accepts; the smallest member label wins
fn resolve_label<A: NondeterministicAutomaton>(nfa: &A, set: &BitSet) -> Option<A::Label> {
    set.iter()
        .filter_map(|i| nfa.label(StateId::new(i)))
        .min()
}
