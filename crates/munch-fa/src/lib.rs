//! Finite automata over `char` symbols with generic accept labels.
//!
//! Labels only need a total order: whenever several states collapse into one
//! (a repeated literal, a subset of NFA states) the minimum label wins.

mod determinize;
mod dfa;
mod minimize;
mod nfa;


pub type Symbol = char;

munch_util::make_type_idx!(
    /// Position of a state in its automaton. The start state is always 0.
    pub StateId
);

pub use determinize::determinize;
pub use dfa::{Dfa, DfaState};
pub use minimize::minimize;
pub use nfa::{Nfa, NfaState, NondeterministicAutomaton};
