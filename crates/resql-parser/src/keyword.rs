// Clause keywords recognized by the locator.
//
// The table is fixed and ordered by grammar position, so `Ord` on `Keyword`
// is the order clauses must appear in: SELECT FROM WHERE GROUP BY HAVING
// ORDER BY LIMIT OFFSET.

use std::fmt;

use memchr::memchr2;
use serde::{Deserialize, Serialize};

/// A recognized clause keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Offset,
}

impl Keyword {
    /// Every keyword, in grammar order.
    pub const ALL: [Self; 8] = [
        Self::Select,
        Self::From,
        Self::Where,
        Self::GroupBy,
        Self::Having,
        Self::OrderBy,
        Self::Limit,
        Self::Offset,
    ];

    /// Lowercase source text matched against the query.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::From => "from",
            Self::Where => "where",
            Self::GroupBy => "group by",
            Self::Having => "having",
            Self::OrderBy => "order by",
            Self::Limit => "limit",
            Self::Offset => "offset",
        }
    }

    /// Uppercase form used in error messages and rewritten selections.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::Having => "HAVING",
            Self::OrderBy => "ORDER BY",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
        }
    }

    /// The whitespace-separated words making up the keyword.
    pub(crate) const fn words(self) -> &'static [&'static str] {
        match self {
            Self::Select => &["select"],
            Self::From => &["from"],
            Self::Where => &["where"],
            Self::GroupBy => &["group", "by"],
            Self::Having => &["having"],
            Self::OrderBy => &["order", "by"],
            Self::Limit => &["limit"],
            Self::Offset => &["offset"],
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier byte: ASCII alphanumeric, underscore, or any byte of a
/// multi-byte UTF-8 sequence.
pub(crate) const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
///
/// Uses memchr on the first needle byte to skip ahead to candidates.
pub(crate) fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let (&first, rest) = needle.split_first()?;
    let lower = first.to_ascii_lowercase();
    let upper = first.to_ascii_uppercase();

    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        // Candidate starts never run past len - needle.len().
        let window = &haystack[pos..haystack.len() - rest.len()];
        let at = pos + memchr2(lower, upper, window)?;
        if haystack[at + 1..at + needle.len()].eq_ignore_ascii_case(rest) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}
