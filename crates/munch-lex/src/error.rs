use thiserror::Error;

/// Recoverable scanning failure. The scanner skips one character and keeps
/// going after reporting it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("lexical error: line {line}, column {column}: unrecognized character {found:?}")]
    UnrecognizedInput {
        line: usize,
        /// 1-based, counted in characters.
        column: usize,
        found: char,
    },
}
