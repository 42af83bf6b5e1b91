//! Error types for the shared run model.

use thiserror::Error;

/// The OS entropy source could not produce random bytes.
///
/// A run cannot proceed without a unique document, so this is always fatal.
#[derive(Debug, Error)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(pub String);

impl From<getrandom::Error> for EntropyError {
    fn from(err: getrandom::Error) -> Self {
        Self(err.to_string())
    }
}

/// A document identifier string was not a canonical UUID.
#[derive(Debug, Error)]
#[error("invalid document id {input:?}: {source}")]
pub struct ParseDocumentIdError {
    /// The rejected input.
    pub input: String,
    /// Underlying UUID parse error.
    #[source]
    pub source: uuid::Error,
}
