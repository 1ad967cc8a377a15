use std::{
    fmt::{self, Display},
    iter::Enumerate,
    str::Lines,
};

use munch_fa::Dfa;

use crate::{compile_rules, LexError, LexerOptions, PatternRule, TokenCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// 1-based.
    pub line: usize,
    pub category: TokenCategory,
    pub lexeme: &'src str,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.line, self.category, self.lexeme)
    }
}

/// Outcome of one maximal munch attempt. Cursors are byte offsets into the
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanResult<'src> {
    EndOfLine,
    Failed {
        found: char,
        at: usize,
        next: usize,
    },
    Ok {
        lexeme: &'src str,
        category: TokenCategory,
        next: usize,
    },
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub struct Scanner {
    dfa: Dfa<TokenCategory>,
}

impl Scanner {
    pub fn new(dfa: Dfa<TokenCategory>) -> Self {
        Self { dfa }
    }

    // run the whole construction pipeline up front
    pub fn from_rules(rules: &[PatternRule], options: LexerOptions) -> Self {
        Self::new(compile_rules(rules, options))
    }

    pub fn automaton(&self) -> &Dfa<TokenCategory> {
        &self.dfa
    }

    // implements "maximal munch" lexing - always try to "eat" as many characters as possible to form next token
    // a cursor past the end or inside a multi-byte character counts as end of line
    pub fn next_word<'src>(&self, line: &'src str, start_cursor: usize) -> ScanResult<'src> {
        let Some(rest) = line.get(start_cursor..) else {
            return ScanResult::EndOfLine;
        };
        let start = start_cursor + (rest.len() - rest.trim_start_matches(is_separator).len());
        let Some(first) = line[start..].chars().next() else {
            return ScanResult::EndOfLine;
        };

        let mut state = self.dfa.start();
        let mut last_accept: Option<(usize, TokenCategory)> = None;

        for (offset, c) in line[start..].char_indices() {
            let Some(next_state) = self.dfa.step(state, c) else {
                break;
            };
            state = next_state;

            if let Some(category) = self.dfa.label(state) {
                last_accept = Some((start + offset + c.len_utf8(), category));
            }
        }

        match last_accept {
            Some((end, category)) => ScanResult::Ok {
                lexeme: &line[start..end],
                category,
                next: end,
            },
            None => ScanResult::Failed {
                found: first,
                at: start,
                next: start + first.len_utf8(),
            },
        }
    }

    /// Lazily scans `source` line by line. Lexical errors come through the
    /// same ordered stream as the tokens; scanning always resumes one
    /// character past a failure.
    pub fn tokens<'s, 'src>(&'s self, source: &'src str) -> TokenStream<'s, 'src> {
        TokenStream {
            scanner: self,
            lines: source.lines().enumerate(),
            current: None,
            cursor: 0,
        }
    }
}

pub struct TokenStream<'s, 'src> {
    scanner: &'s Scanner,
    lines: Enumerate<Lines<'src>>,
    current: Option<(usize, &'src str)>,
    cursor: usize,
}

impl<'src> Iterator for TokenStream<'_, 'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((line_number, line)) = self.current else {
                let (i, line) = self.lines.next()?;
                self.current = Some((i + 1, line));
                self.cursor = 0;
                continue;
            };

            match self.scanner.next_word(line, self.cursor) {
                ScanResult::EndOfLine => self.current = None,
                ScanResult::Ok {
                    lexeme,
                    category,
                    next,
                } => {
                    self.cursor = next;
                    return Some(Ok(Token {
                        line: line_number,
                        category,
                        lexeme,
                    }));
                }
                ScanResult::Failed { found, at, next } => {
                    self.cursor = next;
                    let column = line[..at].chars().count() + 1;
                    tracing::trace!(line = line_number, column, ?found, "no token matches");
                    return Some(Err(LexError::UnrecognizedInput {
                        line: line_number,
                        column,
                        found,
                    }));
                }
            }
        }
    }
}
