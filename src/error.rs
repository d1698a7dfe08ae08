use thiserror::Error;

/// Top-level error type for the citymesh core.
#[derive(Debug, Error)]
pub enum CitymeshError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors related to document and object lookup.
///
/// These are the shapes the UI layer turns into instructional messages
/// ("select an object", "set the feature type in object mode").
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("object not found in document")]
    ObjectNotFound,

    #[error("object has no feature type set")]
    MissingFeatureType,
}

/// Errors related to per-face binding stores.
///
/// A failing store is never fatal: callers fall back to the legacy
/// backend, and failure of every backend is tolerated.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("face {face} is outside the attribute layer")]
    FaceOutOfRange { face: u32 },

    #[error("binding store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for results using [`CitymeshError`].
pub type Result<T> = std::result::Result<T, CitymeshError>;
