use thiserror::Error;

/// Primary error type for resql query translation.
///
/// Validation variants describe a query the caller wrote incorrectly and can
/// fix by editing the text. `Internal` marks a broken offset contract between
/// the keyword locator and the clause extractor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResqlError {
    // === Validation Errors ===
    /// A mandatory clause keyword was not found.
    #[error("missing {clause} clause")]
    MissingClause { clause: &'static str },

    /// A clause is present without the clause it depends on.
    #[error("{required} clause is mandatory when using {dependent}")]
    MissingDependency {
        required: &'static str,
        dependent: &'static str,
    },

    /// A clause keyword occurs more than once (grammar-order scan only).
    #[error("duplicate {keyword} keyword at offset {offset}")]
    DuplicateKeyword {
        keyword: &'static str,
        offset: usize,
    },

    /// A clause keyword occurs before one that must precede it
    /// (grammar-order scan only).
    #[error("{keyword} keyword at offset {offset} must come before {previous}")]
    KeywordOutOfOrder {
        keyword: &'static str,
        offset: usize,
        previous: &'static str,
    },

    /// Query text exceeds the configured length limit.
    #[error("query too long: {length} bytes (max {max})")]
    QueryTooLong { length: usize, max: usize },

    // === Internal Errors ===
    /// Offset arithmetic went out of bounds or referenced an absent clause.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`ResqlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The query text violates a structural rule.
    Validation,
    /// The translator violated its own invariants.
    Internal,
}

impl ResqlError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingClause { .. }
            | Self::MissingDependency { .. }
            | Self::DuplicateKeyword { .. }
            | Self::KeywordOutOfOrder { .. }
            | Self::QueryTooLong { .. } => ErrorKind::Validation,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller can fix this by changing the query text.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingClause { .. } => {
                Some("Every query needs the form SELECT <columns> FROM <resource>")
            }
            Self::MissingDependency { .. } => {
                Some("Add the required clause or drop the dependent one")
            }
            Self::DuplicateKeyword { .. } | Self::KeywordOutOfOrder { .. } => Some(
                "Write clauses once each, in the order SELECT FROM WHERE GROUP BY HAVING ORDER BY LIMIT OFFSET",
            ),
            Self::QueryTooLong { .. } => Some("Shorten the query or raise max_query_len"),
            Self::Internal(_) => None,
        }
    }

    /// Get the process exit code for this error (for CLI use).
    pub const fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation => 1,
            ErrorKind::Internal => 2,
        }
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using `ResqlError`.
pub type Result<T> = std::result::Result<T, ResqlError>;
