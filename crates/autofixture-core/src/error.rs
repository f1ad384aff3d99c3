use thiserror::Error;

/// Core error type shared across Autofixture crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The template contains a shape the engine cannot populate.
    #[error("unsupported structure at '{field}': nested array not supported")]
    UnsupportedStructure { field: String },
    /// A decimal value cannot be represented in JSON.
    #[error("non-finite number cannot be converted to json")]
    NonFiniteNumber,
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by Autofixture crates.
pub type Result<T> = std::result::Result<T, Error>;
