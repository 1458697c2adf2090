//! Typed error kinds for short URL operations.

/// Error kinds produced and consumed by the short URL core.
///
/// Store implementations return the subset that applies to each operation
/// (`DuplicateKey` from create, `NotFound` from lookups and owner-scoped
/// mutations, `Unexpected` for anything else). The service adds
/// `Validation` and `KeySpaceExhausted`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("URL not found")]
    NotFound,

    #[error("short key already exists")]
    DuplicateKey,

    #[error("key space exhausted after {probes} probes")]
    KeySpaceExhausted { probes: u32 },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl UrlError {
    pub fn unexpected(e: impl std::fmt::Display) -> Self {
        Self::Unexpected(e.to_string())
    }
}

impl From<sqlx::Error> for UrlError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(e, sqlx::Error::RowNotFound) {
            return UrlError::NotFound;
        }

        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return UrlError::DuplicateKey;
        }

        UrlError::unexpected(e)
    }
}
