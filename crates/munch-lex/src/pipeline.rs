use munch_fa::{determinize, minimize, Dfa, NondeterministicAutomaton};

use crate::{build_pattern_automaton, PatternRule, TieBreak, TokenCategory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    pub tie_break: TieBreak,
}

/// rules -> trie -> subset construction -> partition refinement
///
/// Tie-break ranks only matter while states are being merged, so labels are
/// projected down to plain categories before minimization.
#[tracing::instrument(level = "debug", skip_all, fields(rules = rules.len()))]
pub fn compile_rules(rules: &[PatternRule], options: LexerOptions) -> Dfa<TokenCategory> {
    let nfa = build_pattern_automaton(rules, options.tie_break);
    let dfa = determinize(&nfa).map_labels(|priority| priority.category);
    let minimized = minimize(&dfa);

    tracing::debug!(
        nfa_states = nfa.state_count(),
        dfa_states = dfa.state_count(),
        min_states = minimized.state_count(),
        "compiled pattern rules"
    );

    minimized
}

#[cfg(test)]
mod tests {
    use super::{compile_rules, LexerOptions};
    use crate::{PatternRule, TieBreak, TokenCategory};

    #[test]
    fn keywords_sharing_a_tail_collapse() {
        let rules = [
            PatternRule::new(TokenCategory::Keyword, "for"),
            PatternRule::new(TokenCategory::Keyword, "xor"),
            PatternRule::new(TokenCategory::Keyword, "or"),
        ];
        let dfa = compile_rules(&rules, LexerOptions::default());

        // start, {f, x}, {fo, xo, o}, {for, xor, or}
        assert_eq!(dfa.state_count(), 4);
        assert_eq!(dfa.simulate("xor"), Some(TokenCategory::Keyword));
        assert_eq!(dfa.simulate("fo"), None);
    }

    #[test]
    fn same_category_ranks_merge_after_projection() {
        let rules = [
            PatternRule::new(TokenCategory::Operator, "+"),
            PatternRule::new(TokenCategory::Operator, "-"),
        ];
        let options = LexerOptions {
            tie_break: TieBreak::FirstDeclared,
        };
        let dfa = compile_rules(&rules, options);

        // both accepting states carry different ranks but the same category
        assert_eq!(dfa.state_count(), 2);
    }
}
