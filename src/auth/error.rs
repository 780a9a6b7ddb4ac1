use super::Capability;
use crate::lock::LockError;
use crate::store::StoreError;

/// Errors from authentication, registration, and authorization.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("bearer token not provided")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),
    #[error("manager no longer exists")]
    UnknownPrincipal,
    #[error("access denied: {0} capability required")]
    Forbidden(Capability),
    #[error("email and password are required")]
    MissingCredentials,
    #[error("a manager with email {0} already exists")]
    DuplicateEmail(String),
    #[error("no manager with email {0}")]
    UnknownEmail(String),
    #[error("wrong password")]
    WrongPassword,
    #[error("token secret must not be empty")]
    InvalidSecret,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("identifier collision after {attempts} attempts")]
    IdentifierCollision { attempts: usize },
    #[error("manager storage unavailable: {0}")]
    Storage(#[from] StoreError),
    #[error("manager lock failed: {0}")]
    Lock(#[from] LockError),
}

impl AuthError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 401,
            AuthError::InvalidToken(_) => 403,
            AuthError::UnknownPrincipal => 403,
            AuthError::Forbidden(_) => 403,
            AuthError::MissingCredentials => 400,
            AuthError::DuplicateEmail(_) => 400,
            AuthError::UnknownEmail(_) => 404,
            AuthError::WrongPassword => 400,
            AuthError::InvalidSecret => 500,
            AuthError::Hash(_) => 500,
            AuthError::IdentifierCollision { .. } => 500,
            AuthError::Storage(_) => 500,
            AuthError::Lock(_) => 500,
        }
    }
}
