use serde::{Deserialize, Serialize};

/// Default cap on query text length in bytes, matching SQLite's default
/// `SQLITE_MAX_SQL_LENGTH`.
pub const DEFAULT_MAX_QUERY_LEN: usize = 1_000_000;

/// How the locator finds clause keywords in the query text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordScan {
    /// First case-insensitive substring match of each keyword, anywhere in
    /// the text. A keyword embedded in a column name or literal that appears
    /// before the real clause wins.
    #[default]
    FirstMatch,
    /// Whole-word scan that skips quoted literals and identifiers and
    /// rejects duplicate or out-of-order keywords.
    GrammarOrder,
}

/// Translator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Keyword location strategy.
    pub keyword_scan: KeywordScan,
    /// Queries longer than this (bytes) are rejected before scanning.
    pub max_query_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            keyword_scan: KeywordScan::FirstMatch,
            max_query_len: DEFAULT_MAX_QUERY_LEN,
        }
    }
}

impl ParserConfig {
    /// Configuration using the grammar-order keyword scan.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            keyword_scan: KeywordScan::GrammarOrder,
            ..Self::default()
        }
    }
}
