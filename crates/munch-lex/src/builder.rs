use munch_fa::Nfa;

use crate::{PatternRule, TokenCategory};

/// How a state reached by several rules picks its category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// Lowest [`TokenCategory`] ordinal wins, whatever the rule order.
    #[default]
    CategoryOrdinal,
    /// The rule declared first wins.
    FirstDeclared,
}

impl TieBreak {
    pub fn priority(self, rule_index: usize, category: TokenCategory) -> Priority {
        let rank = match self {
            TieBreak::CategoryOrdinal => usize::from(category.ordinal()),
            TieBreak::FirstDeclared => rule_index,
        };
        Priority { rank, category }
    }
}

/// Accept label of the pattern automaton. Ordered by rank first, so merging
/// labels by minimum applies the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority {
    pub rank: usize,
    pub category: TokenCategory,
}

/// Inserts every rule into one trie sharing the start state.
#[tracing::instrument(level = "debug", skip_all, fields(rules = rules.len(), tie_break = ?tie_break))]
pub fn build_pattern_automaton(rules: &[PatternRule], tie_break: TieBreak) -> Nfa<Priority> {
    let mut nfa = Nfa::new();

    for (i, rule) in rules.iter().enumerate() {
        let priority = tie_break.priority(i, rule.category);
        if nfa.insert_literal(&rule.pattern, priority).is_none() {
            tracing::warn!(rule = i, "empty pattern skipped");
        }
    }

    nfa
}

#[cfg(test)]
mod tests {
    use munch_fa::{NondeterministicAutomaton, StateId};

    use super::{build_pattern_automaton, TieBreak};
    use crate::{PatternRule, TokenCategory};

    fn accepting_category(rules: &[PatternRule], tie_break: TieBreak, pattern: &str) -> Option<TokenCategory> {
        let nfa = build_pattern_automaton(rules, tie_break);
        let mut state = nfa.start();
        for symbol in pattern.chars() {
            let next = nfa.successors(state, symbol)?.iter().next()?;
            state = StateId::new(next);
        }
        nfa.label(state).map(|priority| priority.category)
    }

    #[test]
    fn category_ordinal_ignores_rule_order() {
        let rules = [
            PatternRule::new(TokenCategory::Identifier, "if"),
            PatternRule::new(TokenCategory::Keyword, "if"),
        ];
        assert_eq!(
            accepting_category(&rules, TieBreak::CategoryOrdinal, "if"),
            Some(TokenCategory::Keyword)
        );
    }

    #[test]
    fn first_declared_follows_rule_order() {
        let rules = [
            PatternRule::new(TokenCategory::Identifier, "if"),
            PatternRule::new(TokenCategory::Keyword, "if"),
        ];
        assert_eq!(
            accepting_category(&rules, TieBreak::FirstDeclared, "if"),
            Some(TokenCategory::Identifier)
        );
    }

    #[test]
    fn empty_pattern_leaves_start_rejecting() {
        let rules = [PatternRule::new(TokenCategory::Keyword, "")];
        let nfa = build_pattern_automaton(&rules, TieBreak::default());
        assert_eq!(nfa.state_count(), 1);
        assert_eq!(nfa.label(nfa.start()), None);
    }
}
