use crate::OlaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Ola(#[from] OlaError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
