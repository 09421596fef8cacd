use serde::{Deserialize, Serialize};

/// The five arguments of a tabular-resource query.
///
/// Built once per translation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    /// Opaque resource locator taken from the FROM clause.
    pub locator: String,
    /// Column expressions in authored order; `None` means all columns.
    pub projection: Option<Vec<String>>,
    /// Filter expression, with GROUP BY / HAVING folded in.
    pub selection: Option<String>,
    /// Caller-supplied filter arguments, passed through untouched.
    pub selection_args: Option<Vec<String>>,
    /// Sort expression; keeps any trailing LIMIT / OFFSET text.
    pub sort: Option<String>,
}

impl ParsedQuery {
    /// Whether the projection selects every column.
    #[must_use]
    pub const fn is_all_columns(&self) -> bool {
        self.projection.is_none()
    }

    #[must_use]
    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    #[must_use]
    pub fn selection_args(&self) -> Option<&[String]> {
        self.selection_args.as_deref()
    }

    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }
}
