use rollcall_blend::BlendError;
use rollcall_store::StoreError;
use rollcall_types::TypeError;

/// Outcome of a failed façade operation.
///
/// Every variant maps to exactly one client-facing condition; the HTTP layer
/// translates them without inspecting messages.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed input: wrong type, range or pattern.
    #[error("validation error: {0}")]
    Validation(#[from] TypeError),

    /// The acting username is not a registered contributor.
    #[error("{username:?} is not a registered contributor")]
    Unauthorized { username: String },

    #[error("contributor not found: {0}")]
    ContributorNotFound(String),

    #[error("image not found: {0}")]
    ImageNotFound(String),

    /// An upload is not a decodable PNG.
    #[error("bad image upload: {0}")]
    BadImage(#[source] BlendError),

    /// A stored image could not be blended on retrieval.
    #[error("stored image could not be processed: {0}")]
    Blend(#[source] BlendError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for façade operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
