// SQL-to-resource-query translator
//
// Turns a restricted SELECT statement into the five arguments of a generic
// "query a tabular resource" call: locator, projection, selection, selection
// arguments and sort. Two stages, both pure:
//
//   text -> locator::locate_keywords -> span::ClauseSpans -> extract::extract
//
// Tracing: span `translate_query` (target `resql.parse`) with fields
// query_len, scan, keywords.

pub mod config;
pub mod extract;
pub mod keyword;
pub mod locator;
pub mod query;
pub mod span;

pub use config::{KeywordScan, ParserConfig, DEFAULT_MAX_QUERY_LEN};
pub use extract::{make_locator, make_projection, make_selection, make_sort, normalize_whitespace};
pub use keyword::Keyword;
pub use locator::{locate_keywords, Occurrence, OccurrenceTable};
pub use query::ParsedQuery;
pub use resql_error::{ErrorKind, ResqlError, Result};
pub use span::{ClauseSpan, ClauseSpans, Span};

/// Translates query text with a fixed configuration.
///
/// Holds no per-call state, so one translator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: ParserConfig,
}

impl Translator {
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Translate `query`, passing `selection_args` through unchanged.
    ///
    /// Either all five fields are produced or nothing is.
    ///
    /// # Errors
    ///
    /// Validation errors for structurally invalid queries; an internal error
    /// if extraction hits an offset the locator should have ruled out.
    pub fn translate(
        &self,
        query: &str,
        selection_args: Option<Vec<String>>,
    ) -> Result<ParsedQuery> {
        let span = tracing::debug_span!(
            target: "resql.parse",
            "translate_query",
            query_len = query.len(),
            scan = ?self.config.keyword_scan,
            keywords = tracing::field::Empty,
        );
        let _guard = span.enter();

        let table = match locate_keywords(query, &self.config) {
            Ok(table) => table,
            Err(err) => {
                tracing::warn!(target: "resql.parse", error = %err, "query rejected");
                return Err(err);
            }
        };
        span.record("keywords", table.len());

        let spans = ClauseSpans::from_occurrences(&table, query.len())?;
        let parsed = extract::extract(query, &spans, selection_args)?;

        tracing::debug!(
            target: "resql.parse",
            locator = %parsed.locator,
            columns = parsed.projection.as_ref().map_or(0, Vec::len),
            has_selection = parsed.selection.is_some(),
            has_sort = parsed.sort.is_some(),
            "query translated"
        );
        Ok(parsed)
    }
}

/// Translate `query` with the default configuration.
///
/// # Errors
///
/// See [`Translator::translate`].
pub fn translate(query: &str, selection_args: Option<Vec<String>>) -> Result<ParsedQuery> {
    Translator::default().translate(query, selection_args)
}
