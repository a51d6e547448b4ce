use thiserror::Error;

/// Errors surfaced by the catalog: entity validation, configuration at
/// construction time, or a failed statement from the store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field was empty; the store is never touched.
    #[error("invalid {entity}: {field} must not be empty")]
    Validation {
        entity: &'static str,
        field: &'static str,
    },

    /// Connection settings missing or unreadable. Fatal, not retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A statement failed. Wraps the driver error (code and message)
    /// unmodified; retry policy belongs to the caller.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
