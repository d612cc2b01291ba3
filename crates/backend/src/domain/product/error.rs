use thiserror::Error;

use crate::shared::images::ImageError;

/// Error taxonomy of the product layer. Validation problems and unknown
/// identifiers carry their human-readable message to the caller; store
/// failures are logged and surfaced generically.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("store failure: {0}")]
    Store(#[source] anyhow::Error),
}

impl From<ImageError> for ProductError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Io(e) => ProductError::Store(e.into()),
            rejected => ProductError::Validation(rejected.to_string()),
        }
    }
}
