use tracing::warn;

use super::{Accounts, AuthError, Capability, Manager, Principal};
use crate::store::CollectionStore;

/// Resolves request credentials into a [`Principal`].
pub trait AccessGuard: Send + Sync {
    /// Resolve the raw `Authorization` header value, if any.
    fn resolve(&self, authorization: Option<&str>) -> Result<Principal, AuthError>;

    /// Resolve and require `capability` in one step.
    fn authorize(&self, authorization: Option<&str>, capability: Capability) -> Result<Principal, AuthError> {
        let principal = self.resolve(authorization)?;
        if let Err(e) = principal.require(capability) {
            warn!(id = principal.id, %capability, "capability check failed");
            return Err(e);
        }
        Ok(principal)
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl<S: CollectionStore<Manager>> AccessGuard for Accounts<S> {
    fn resolve(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let claims = self.tokens().verify(token).inspect_err(|e| {
            warn!(error = %e, "token rejected");
        })?;

        let manager = self.find(claims.id)?.ok_or_else(|| {
            warn!(id = claims.id, "token names a manager that no longer exists");
            AuthError::UnknownPrincipal
        })?;

        Ok(Principal::for_manager(&manager))
    }
}
