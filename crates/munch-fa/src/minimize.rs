use std::collections::BTreeMap;

use bit_set::BitSet;

use crate::{
    dfa::{Dfa, DfaState},
    StateId, Symbol,
};

// per symbol: group index of the target, None for a missing transition
type Signature = Vec<Option<usize>>;

/// Partition refinement (Moore's algorithm).
///
/// States start out grouped by label, with one extra group for the
/// non-accepting ones. Each round splits every group by the signature of its
/// members over the whole alphabet, until a round splits nothing. The result
/// has one state per final group, numbered by the lowest member, which keeps
/// the start state at 0.
#[tracing::instrument(level = "debug", skip_all, fields(dfa_states = dfa.state_count()))]
pub fn minimize<L: Ord + Copy>(dfa: &Dfa<L>) -> Dfa<L> {
    let alphabet: Vec<Symbol> = dfa.alphabet().into_iter().collect();

    let mut partition = initial_partition(dfa);
    let initial_groups = partition.len();
    let mut rounds = 0;

    loop {
        let refined = refine(dfa, &alphabet, &partition);
        rounds += 1;
        tracing::trace!(round = rounds, groups = refined.len(), "refinement round");

        // groups only ever split, so an unchanged count means a fixpoint
        let stable = refined.len() == partition.len();
        partition = refined;
        if stable {
            break;
        }
    }

    debug_assert!(rounds <= dfa.state_count() - initial_groups + 1);
    tracing::debug!(rounds, min_states = partition.len(), "partition refinement converged");

    partition.sort_by_key(|group| group.iter().next());
    let group_of = group_indices(&partition, dfa.state_count());
    debug_assert_eq!(group_of[dfa.start().index()], 0);

    let states = partition
        .iter()
        .map(|group| match group.iter().next() {
            Some(representative) => {
                let original = &dfa.states[representative];
                DfaState {
                    transitions: original
                        .transitions
                        .iter()
                        .map(|(&symbol, &target)| {
                            (symbol, StateId::new(group_of[target.index()]))
                        })
                        .collect(),
                    label: original.label,
                }
            }
            None => DfaState::new(None),
        })
        .collect();

    Dfa { states }
}

fn initial_partition<L: Ord + Copy>(dfa: &Dfa<L>) -> Vec<BitSet> {
    let mut by_label: BTreeMap<Option<L>, BitSet> = BTreeMap::new();
    for (id, state) in dfa.states() {
        by_label.entry(state.label).or_default().insert(id.index());
    }
    by_label.into_values().collect()
}

fn refine<L: Copy>(dfa: &Dfa<L>, alphabet: &[Symbol], partition: &[BitSet]) -> Vec<BitSet> {
    let group_of = group_indices(partition, dfa.state_count());
    let mut refined = Vec::with_capacity(partition.len());

    for group in partition {
        let mut splits: BTreeMap<Signature, BitSet> = BTreeMap::new();
        for state in group.iter() {
            let signature: Signature = alphabet
                .iter()
                .map(|&symbol| {
                    dfa.step(StateId::new(state), symbol)
                        .map(|target| group_of[target.index()])
                })
                .collect();
            splits.entry(signature).or_default().insert(state);
        }
        refined.extend(splits.into_values());
    }

    refined
}

fn group_indices(partition: &[BitSet], state_count: usize) -> Vec<usize> {
    let mut group_of = vec![0; state_count];
    for (i, group) in partition.iter().enumerate() {
        for state in group.iter() {
            group_of[state] = i;
        }
    }
    group_of
}
