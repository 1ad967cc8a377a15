use std::fmt::{self, Display};

/// Closed set of token categories. Declaration order is the ordinal used by
/// [`TieBreak::CategoryOrdinal`](crate::TieBreak::CategoryOrdinal): `Keyword`
/// ranks first, `Unknown` last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Constant,
    Delimiter,
    Operator,
    Unknown,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 6] = [
        TokenCategory::Keyword,
        TokenCategory::Identifier,
        TokenCategory::Constant,
        TokenCategory::Delimiter,
        TokenCategory::Operator,
        TokenCategory::Unknown,
    ];

    /// Grammar spelling. Anything unrecognised is `Unknown`.
    pub fn from_name(name: &str) -> TokenCategory {
        match name {
            "KEYWORD" => TokenCategory::Keyword,
            "IDENTIFIER" => TokenCategory::Identifier,
            "CONSTANT" => TokenCategory::Constant,
            "DELIMITER" => TokenCategory::Delimiter,
            "OPERATOR" => TokenCategory::Operator,
            _ => TokenCategory::Unknown,
        }
    }

    pub fn to_name(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "KEYWORD",
            TokenCategory::Identifier => "IDENTIFIER",
            TokenCategory::Constant => "CONSTANT",
            TokenCategory::Delimiter => "DELIMITER",
            TokenCategory::Operator => "OPERATOR",
            TokenCategory::Unknown => "UNKNOWN",
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}
