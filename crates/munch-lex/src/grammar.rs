use crate::TokenCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub category: TokenCategory,
    /// Matched verbatim, never empty.
    pub pattern: String,
}

impl PatternRule {
    pub fn new(category: TokenCategory, pattern: impl Into<String>) -> PatternRule {
        PatternRule {
            category,
            pattern: pattern.into(),
        }
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Reads `CATEGORY -> pattern` lines, splitting on the first `->`.
///
/// Lines without an arrow or with nothing on either side are dropped, so an
/// empty pattern never reaches the automaton builder.
pub fn parse_grammar(def_string: &str) -> Vec<PatternRule> {
    let mut rules = Vec::new();
    for (i, line) in def_string.lines().enumerate() {
        let Some((name, pattern)) = line.split_once("->") else {
            if !line.trim_matches(is_blank).is_empty() {
                tracing::trace!(line = i + 1, "grammar line without '->' ignored");
            }
            continue;
        };

        let name = name.trim_matches(is_blank);
        let pattern = pattern.trim_matches(is_blank);
        if name.is_empty() || pattern.is_empty() {
            tracing::trace!(line = i + 1, "grammar line with an empty side ignored");
            continue;
        }

        rules.push(PatternRule::new(TokenCategory::from_name(name), pattern));
    }

    tracing::debug!(rules = rules.len(), "parsed grammar");
    rules
}
