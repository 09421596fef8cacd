//! Public API facade for resql.
//!
//! Write a query such as
//!
//! ```text
//! SELECT distinct artist_id, artist, count(*) as songs
//! FROM content://media/external/audio/media
//! WHERE is_podcast = 0
//! GROUP BY artist_id
//! HAVING songs >= 5
//! ORDER BY artist_key DESC
//! LIMIT 10
//! ```
//!
//! instead of assembling locator, projection, selection and sort by hand.
//! JOIN and subqueries are not supported. Any type implementing
//! [`TabularResource`] gains [`QuerySqlExt::query_sql`]; the cursor it
//! returns is the resource's to open and the caller's to close.

pub use resql_error::{ErrorKind, ResqlError, Result};
pub use resql_parser::{
    translate, Keyword, KeywordScan, ParsedQuery, ParserConfig, Translator, DEFAULT_MAX_QUERY_LEN,
};

/// A store that answers "locator + projection + filter + filter args + sort"
/// queries with a row cursor.
pub trait TabularResource {
    /// Row cursor handed back to the caller.
    type Cursor;
    /// Error type of the resource; must absorb translation errors.
    type Error: From<ResqlError>;

    /// Run a translated query.
    ///
    /// # Errors
    ///
    /// Whatever the underlying resource reports.
    fn query(&self, request: &ParsedQuery) -> std::result::Result<Self::Cursor, Self::Error>;
}

/// SQL entry points for every [`TabularResource`].
pub trait QuerySqlExt: TabularResource {
    /// Translate `query` with the default configuration and run it.
    ///
    /// # Errors
    ///
    /// Translation errors converted into `Self::Error`, or the resource's own
    /// query error.
    fn query_sql(
        &self,
        query: &str,
        selection_args: Option<Vec<String>>,
    ) -> std::result::Result<Self::Cursor, Self::Error> {
        self.query_sql_with(&ParserConfig::default(), query, selection_args)
    }

    /// Translate `query` with `config` and run it.
    ///
    /// # Errors
    ///
    /// See [`query_sql`](Self::query_sql).
    fn query_sql_with(
        &self,
        config: &ParserConfig,
        query: &str,
        selection_args: Option<Vec<String>>,
    ) -> std::result::Result<Self::Cursor, Self::Error> {
        let request = translate_logged(&Translator::new(config.clone()), query, selection_args)?;
        self.query(&request)
    }
}

impl<R: TabularResource + ?Sized> QuerySqlExt for R {}

/// Translate, logging the query and its arguments when translation fails.
fn translate_logged(
    translator: &Translator,
    query: &str,
    selection_args: Option<Vec<String>>,
) -> Result<ParsedQuery> {
    // The args themselves move into the request.
    let args_for_log = selection_args.clone();
    translator.translate(query, selection_args).map_err(|err| {
        tracing::error!(
            target: "resql.query",
            error = %err,
            kind = ?err.kind(),
            query = %query,
            args = ?args_for_log,
            "executed query failed to translate"
        );
        err
    })
}
