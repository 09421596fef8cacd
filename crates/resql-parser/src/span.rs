// Clause spans
//
// The occurrence table is turned into one `(keyword, body)` span per clause
// exactly once. Every later slice of the query goes through `ClauseSpans`,
// which maps a bad range to an internal error instead of panicking.

use std::ops::Range;

use resql_error::{ResqlError, Result};

use crate::keyword::Keyword;
use crate::locator::OccurrenceTable;

/// Byte range into the query text, `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// A clause: its keyword, where the keyword sits, and the body that follows
/// up to the next keyword (or end of text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseSpan {
    pub keyword: Keyword,
    pub keyword_span: Span,
    pub body: Span,
}

/// Every clause of one query, in offset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseSpans {
    source_len: usize,
    spans: Vec<ClauseSpan>,
}

impl ClauseSpans {
    /// Compute clause spans from a located table over text of `source_len`
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ResqlError::Internal`] if a keyword runs past the end of the
    /// text or overlaps the next keyword.
    pub fn from_occurrences(table: &OccurrenceTable, source_len: usize) -> Result<Self> {
        let occurrences: Vec<_> = table.iter().copied().collect();
        let mut spans = Vec::with_capacity(occurrences.len());

        for (i, occ) in occurrences.iter().enumerate() {
            let body_end = occurrences.get(i + 1).map_or(source_len, |next| next.start);
            if occ.end > body_end || body_end > source_len {
                return Err(ResqlError::internal(format!(
                    "{} keyword at {}..{} overruns clause boundary {body_end} (text length {source_len})",
                    occ.keyword, occ.start, occ.end
                )));
            }
            spans.push(ClauseSpan {
                keyword: occ.keyword,
                keyword_span: Span::new(occ.start, occ.end),
                body: Span::new(occ.end, body_end),
            });
        }

        Ok(Self { source_len, spans })
    }

    #[must_use]
    pub fn get(&self, keyword: Keyword) -> Option<&ClauseSpan> {
        self.spans.iter().find(|span| span.keyword == keyword)
    }

    /// Like [`get`](Self::get) for a clause validation guarantees.
    ///
    /// # Errors
    ///
    /// Returns [`ResqlError::Internal`] when the clause is absent.
    pub fn require(&self, keyword: Keyword) -> Result<&ClauseSpan> {
        self.get(keyword).ok_or_else(|| {
            ResqlError::internal(format!("{keyword} clause assumed present but not located"))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClauseSpan> {
        self.spans.iter()
    }

    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source_len
    }

    /// Slice `query` by `span`.
    ///
    /// # Errors
    ///
    /// Returns [`ResqlError::Internal`] for a reversed range, a range past
    /// the end, one that splits a UTF-8 character, or a query whose length
    /// differs from the one the spans were computed for.
    pub fn slice<'q>(&self, query: &'q str, span: Span) -> Result<&'q str> {
        if query.len() != self.source_len {
            return Err(ResqlError::internal(format!(
                "clause spans computed for {} bytes applied to {} bytes",
                self.source_len,
                query.len()
            )));
        }
        query
            .get(span.range())
            .ok_or_else(|| ResqlError::internal(format!("invalid slice {}..{}", span.start, span.end)))
    }

    /// Body of `keyword`'s clause, or `None` when the clause is absent.
    ///
    /// # Errors
    ///
    /// Propagates [`slice`](Self::slice) errors.
    pub fn body<'q>(&self, query: &'q str, keyword: Keyword) -> Result<Option<&'q str>> {
        self.get(keyword)
            .map(|clause| self.slice(query, clause.body))
            .transpose()
    }

    /// Everything after `keyword` up to the end of the text, ignoring later
    /// clause boundaries.
    ///
    /// # Errors
    ///
    /// Propagates [`slice`](Self::slice) errors.
    pub fn tail<'q>(&self, query: &'q str, keyword: Keyword) -> Result<Option<&'q str>> {
        self.get(keyword)
            .map(|clause| self.slice(query, Span::new(clause.body.start, self.source_len)))
            .transpose()
    }
}

impl<'a> IntoIterator for &'a ClauseSpans {
    type Item = &'a ClauseSpan;
    type IntoIter = std::slice::Iter<'a, ClauseSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}
