// Clause Extractor
//
// Slices a validated query into locator, projection, selection and sort.
// GROUP BY and HAVING have no slot of their own in the target call, so they
// are folded into the selection string using the parenthesis convention the
// downstream filter engine balances itself:
//
//   WHERE w GROUP BY a, b            ->  w) GROUP BY a, (b
//   WHERE w GROUP BY a, b HAVING h   ->  w) GROUP BY a, b HAVING (h

use resql_error::Result;

use crate::keyword::{find_ignore_ascii_case, is_word_byte, Keyword};
use crate::query::ParsedQuery;
use crate::span::{ClauseSpans, Span};

/// Single wildcard projection meaning "all columns".
const ALL_COLUMNS: &str = "*";

/// Build the five output fields. Assumes the locator already validated the
/// table the spans were computed from.
///
/// # Errors
///
/// Returns [`resql_error::ResqlError::Internal`] when SELECT or FROM is
/// missing from the spans or a slice falls outside the query.
pub fn extract(
    query: &str,
    spans: &ClauseSpans,
    selection_args: Option<Vec<String>>,
) -> Result<ParsedQuery> {
    let select = spans.require(Keyword::Select)?;
    let from = spans.require(Keyword::From)?;

    // The projection runs up to FROM itself, even when another keyword
    // matched inside the column list.
    let projection_text = spans.slice(query, Span::new(select.body.start, from.keyword_span.start))?;
    let locator_text = spans.slice(query, from.body)?;

    let selection = make_selection(
        spans.body(query, Keyword::Where)?,
        spans.body(query, Keyword::GroupBy)?,
        spans.body(query, Keyword::Having)?,
    );

    Ok(ParsedQuery {
        locator: make_locator(locator_text),
        projection: make_projection(projection_text),
        selection,
        selection_args,
        sort: make_sort(spans.tail(query, Keyword::OrderBy)?),
    })
}

/// Replace every newline, carriage return and tab with one space, then trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.replace(['\n', '\r', '\t'], " ").trim().to_owned()
}

/// Resource locator from the FROM clause body.
#[must_use]
pub fn make_locator(body: &str) -> String {
    normalize_whitespace(body)
}

/// Column list from the SELECT clause body; `None` for `*`.
#[must_use]
pub fn make_projection(body: &str) -> Option<Vec<String>> {
    let body = normalize_whitespace(body);
    if body == ALL_COLUMNS {
        return None;
    }
    Some(body.split(',').map(|column| column.trim().to_owned()).collect())
}

/// Filter expression from the WHERE, GROUP BY and HAVING clause bodies.
///
/// Without WHERE there is no selection at all; GROUP BY and HAVING are only
/// emitted alongside it.
#[must_use]
pub fn make_selection(
    where_body: Option<&str>,
    group_by_body: Option<&str>,
    having_body: Option<&str>,
) -> Option<String> {
    let condition = normalize_whitespace(where_body?);
    let Some(group_by_body) = group_by_body else {
        return Some(condition);
    };

    let group_by = normalize_whitespace(group_by_body);
    let mut columns: Vec<String> = group_by
        .split(',')
        .map(|column| column.trim().to_owned())
        .collect();

    let selection = match having_body {
        Some(having_body) => {
            let having = normalize_whitespace(having_body);
            let conditions: Vec<&str> = split_and(&having).into_iter().map(str::trim).collect();
            format!(
                "{condition}) GROUP BY {} HAVING ({}",
                columns.join(", "),
                conditions.join(" AND ")
            )
        }
        None => {
            if let Some(last) = columns.last_mut() {
                last.insert(0, '(');
            }
            format!("{condition}) GROUP BY {}", columns.join(", "))
        }
    };
    Some(selection)
}

/// Sort expression from everything after ORDER BY. LIMIT and OFFSET text is
/// kept as written.
#[must_use]
pub fn make_sort(tail: Option<&str>) -> Option<String> {
    tail.map(normalize_whitespace)
}

/// Split on standalone `AND` (any case); `AND` inside an identifier such as
/// `brand_id` is not a separator.
fn split_and(text: &str) -> Vec<&str> {
    const SEP: &[u8] = b"and";
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut part_start = 0;
    let mut pos = 0;

    while let Some(hit) = find_ignore_ascii_case(&bytes[pos..], SEP) {
        let at = pos + hit;
        let end = at + SEP.len();
        let bounded_left = at == 0 || !is_word_byte(bytes[at - 1]);
        let bounded_right = end == bytes.len() || !is_word_byte(bytes[end]);
        if bounded_left && bounded_right {
            parts.push(&text[part_start..at]);
            part_start = end;
            pos = end;
        } else {
            pos = at + 1;
        }
    }
    parts.push(&text[part_start..]);
    parts
}
