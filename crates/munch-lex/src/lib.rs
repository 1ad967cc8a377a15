mod builder;
mod category;
mod error;
mod grammar;
mod pipeline;
mod scanner;

pub use builder::{build_pattern_automaton, Priority, TieBreak};
pub use category::TokenCategory;
pub use error::LexError;
pub use grammar::{parse_grammar, PatternRule};
pub use pipeline::{compile_rules, LexerOptions};
pub use scanner::{ScanResult, Scanner, Token, TokenStream};

pub use munch_fa::Dfa;
