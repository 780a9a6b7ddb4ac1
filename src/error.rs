use crate::catalog::FeedError;
use crate::film::ValidationError;
use crate::lock::LockError;
use crate::store::StoreError;

/// Errors from ranked collection operations.
#[derive(Debug, thiserror::Error)]
pub enum FilmError {
    /// Bad or missing input. Never retried.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The referenced film does not exist.
    #[error("film {0} not found")]
    NotFound(i64),
    /// The persistence collaborator failed. The caller may retry.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
    /// The external catalog feed failed.
    #[error("catalog feed failed: {0}")]
    Upstream(#[from] FeedError),
    /// Every generated identifier collided with an existing one.
    #[error("identifier collision after {attempts} attempts")]
    IdentifierCollision { attempts: usize },
    #[error("collection lock failed: {0}")]
    Lock(#[from] LockError),
}

impl FilmError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            FilmError::Validation(_) => 400,
            FilmError::NotFound(_) => 404,
            FilmError::StorageUnavailable(_) => 500,
            FilmError::Upstream(_) => 502,
            FilmError::IdentifierCollision { .. } => 500,
            FilmError::Lock(_) => 500,
        }
    }
}
