use thiserror::Error;

/// Failures surfaced by estimators, sources and drivers.
///
/// Zero denominators are not errors: means and scaling factors resolve them
/// to `0` locally. Everything here aborts the current operation.
#[derive(Debug, Error)]
pub enum OlaError {
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("type mismatch in field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("incompatible merge: {0}")]
    IncompatibleMerge(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
