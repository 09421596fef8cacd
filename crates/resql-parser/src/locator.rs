// Keyword Locator
//
// Finds each clause keyword in the raw query text, builds the occurrence
// table, and rejects the query when a structural rule is broken. Nothing is
// extracted here.

use memchr::memchr;
use resql_error::{ResqlError, Result};

use crate::config::{KeywordScan, ParserConfig};
use crate::keyword::{find_ignore_ascii_case, is_word_byte, Keyword};

/// `(dependent, required)` pairs, checked in this order after SELECT and
/// FROM presence.
const DEPENDENCIES: [(Keyword, Keyword); 4] = [
    (Keyword::GroupBy, Keyword::Where),
    (Keyword::Limit, Keyword::OrderBy),
    (Keyword::Offset, Keyword::Limit),
    (Keyword::Having, Keyword::GroupBy),
];

/// One located keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub keyword: Keyword,
    /// Byte offset of the first keyword character.
    pub start: usize,
    /// Byte offset one past the last keyword character.
    pub end: usize,
}

/// Keywords present in a query, sorted by ascending offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceTable {
    entries: Vec<Occurrence>,
}

impl OccurrenceTable {
    /// Build a table from unordered occurrences.
    #[must_use]
    pub fn new(mut entries: Vec<Occurrence>) -> Self {
        entries.sort_by_key(|occ| occ.start);
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, keyword: Keyword) -> Option<&Occurrence> {
        self.entries.iter().find(|occ| occ.keyword == keyword)
    }

    #[must_use]
    pub fn contains(&self, keyword: Keyword) -> bool {
        self.get(keyword).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Occurrence> {
        self.entries.iter()
    }

    /// Keywords in offset order.
    #[must_use]
    pub fn keywords(&self) -> Vec<Keyword> {
        self.entries.iter().map(|occ| occ.keyword).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a OccurrenceTable {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Locate every keyword in `query` and validate the structural rules.
///
/// Only the first violated rule is reported, in this order: query length,
/// scan errors (grammar-order only), SELECT, FROM, then the clause
/// dependencies GROUP BY→WHERE, LIMIT→ORDER BY, OFFSET→LIMIT, HAVING→GROUP BY.
///
/// # Errors
///
/// Returns a validation error describing the first broken rule.
pub fn locate_keywords(query: &str, config: &ParserConfig) -> Result<OccurrenceTable> {
    if query.len() > config.max_query_len {
        return Err(ResqlError::QueryTooLong {
            length: query.len(),
            max: config.max_query_len,
        });
    }

    let table = match config.keyword_scan {
        KeywordScan::FirstMatch => OccurrenceTable::new(scan_first_match(query)),
        KeywordScan::GrammarOrder => OccurrenceTable::new(scan_grammar_order(query)?),
    };
    validate(&table)?;

    tracing::debug!(
        target: "resql.parse",
        keywords = ?table.keywords(),
        "keyword occurrence table built"
    );
    Ok(table)
}

/// Check clause presence and dependency rules on a located table.
///
/// # Errors
///
/// Returns the first violated rule as a validation error.
pub fn validate(table: &OccurrenceTable) -> Result<()> {
    for keyword in [Keyword::Select, Keyword::From] {
        if !table.contains(keyword) {
            return Err(ResqlError::MissingClause {
                clause: keyword.label(),
            });
        }
    }
    for (dependent, required) in DEPENDENCIES {
        if table.contains(dependent) && !table.contains(required) {
            return Err(ResqlError::MissingDependency {
                required: required.label(),
                dependent: dependent.label(),
            });
        }
    }
    Ok(())
}

fn scan_first_match(query: &str) -> Vec<Occurrence> {
    let src = query.as_bytes();
    Keyword::ALL
        .iter()
        .filter_map(|&keyword| {
            let needle = keyword.text().as_bytes();
            find_ignore_ascii_case(src, needle).map(|start| Occurrence {
                keyword,
                start,
                end: start + needle.len(),
            })
        })
        .collect()
}

fn scan_grammar_order(query: &str) -> Result<Vec<Occurrence>> {
    let src = query.as_bytes();
    let mut found: Vec<Occurrence> = Vec::new();
    let mut pos = 0;

    while pos < src.len() {
        match src[pos] {
            quote @ (b'\'' | b'"' | b'`') => pos = skip_past(src, pos + 1, quote),
            b'[' => pos = skip_past(src, pos + 1, b']'),
            b if is_word_byte(b) => {
                let word_end = end_of_word(src, pos);
                match match_keyword(src, pos, word_end) {
                    Some(occ) => {
                        push_in_grammar_order(&mut found, occ)?;
                        pos = occ.end;
                    }
                    None => pos = word_end,
                }
            }
            _ => pos += 1,
        }
    }
    Ok(found)
}

fn push_in_grammar_order(found: &mut Vec<Occurrence>, occ: Occurrence) -> Result<()> {
    if found.iter().any(|prev| prev.keyword == occ.keyword) {
        return Err(ResqlError::DuplicateKeyword {
            keyword: occ.keyword.label(),
            offset: occ.start,
        });
    }
    if let Some(last) = found.last() {
        if last.keyword > occ.keyword {
            return Err(ResqlError::KeywordOutOfOrder {
                keyword: occ.keyword.label(),
                offset: occ.start,
                previous: last.keyword.label(),
            });
        }
    }
    found.push(occ);
    Ok(())
}

/// Offset just past the closing `delim`, or end of input when unterminated.
/// A doubled quote closes and immediately reopens, which lands in the same
/// place as an escape.
fn skip_past(src: &[u8], from: usize, delim: u8) -> usize {
    match src.get(from..).and_then(|rest| memchr(delim, rest)) {
        Some(i) => from + i + 1,
        None => src.len(),
    }
}

fn end_of_word(src: &[u8], start: usize) -> usize {
    src[start..]
        .iter()
        .position(|&b| !is_word_byte(b))
        .map_or(src.len(), |n| start + n)
}

/// Match a keyword beginning with the word `src[start..word_end]`. Two-word
/// keywords accept any run of whitespace between their words.
fn match_keyword(src: &[u8], start: usize, word_end: usize) -> Option<Occurrence> {
    let word = &src[start..word_end];
    Keyword::ALL.iter().find_map(|&keyword| {
        let (head, tail) = keyword.words().split_first()?;
        if !word.eq_ignore_ascii_case(head.as_bytes()) {
            return None;
        }
        let mut end = word_end;
        for next in tail {
            let gap = src[end..]
                .iter()
                .take_while(|b| b.is_ascii_whitespace())
                .count();
            if gap == 0 {
                return None;
            }
            let next_start = end + gap;
            let next_end = end_of_word(src, next_start);
            if !src[next_start..next_end].eq_ignore_ascii_case(next.as_bytes()) {
                return None;
            }
            end = next_end;
        }
        Some(Occurrence {
            keyword,
            start,
            end,
        })
    })
}
