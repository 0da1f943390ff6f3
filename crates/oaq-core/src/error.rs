use thiserror::Error;

/// Errors loading an OpenAPI document. Only binaries treat these as fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0:?}")]
    UnsupportedVersion(String),
}

/// Lookup failures returned as values so callers can branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("operation not found")]
    OperationNotFound,

    #[error("no request body schema found")]
    NoRequestBody,
}
