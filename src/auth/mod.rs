//! Managers, credentials, bearer tokens, and capability checks.
//!
//! [`Accounts`] owns the manager collection: registration, login, and
//! promotion. As an [`AccessGuard`] it turns an `Authorization` header into a
//! [`Principal`] whose capabilities gate reads and writes. The principal is
//! returned to the caller and handed explicitly to whatever needs it.
//!
//! ## Example
//!
//! ```ignore
//! use ranked_films::auth::{AccessGuard, Accounts, Capability, TokenIssuer};
//!
//! let accounts = Accounts::new(InMemoryCollection::new(), TokenIssuer::new(secret, ttl)?);
//! accounts.register("ops@example.com", "s3cret")?;
//! accounts.promote("ops@example.com")?;
//! let token = accounts.login("ops@example.com", "s3cret")?;
//!
//! let principal = accounts.authorize(Some(&format!("Bearer {token}")), Capability::Write)?;
//! ```

mod accounts;
mod error;
mod guard;
mod password;
mod token;

use std::collections::BTreeSet;
use std::fmt;

pub use accounts::{Accounts, Manager};
pub use error::AuthError;
pub use guard::{bearer_token, AccessGuard};
pub use password::Passwords;
pub use token::{Claims, TokenIssuer, DEFAULT_TOKEN_TTL};

/// An authorization grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Read,
    Write,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Read => write!(f, "read"),
            Capability::Write => write!(f, "write"),
        }
    }
}

/// An authenticated manager and what it may do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub email: String,
    capabilities: BTreeSet<Capability>,
}

impl Principal {
    pub fn new(id: i64, email: impl Into<String>, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Principal {
            id,
            email: email.into(),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Super managers may read and write; everyone else may do neither.
    pub fn for_manager(manager: &Manager) -> Self {
        let capabilities = if manager.is_super {
            vec![Capability::Read, Capability::Write]
        } else {
            Vec::new()
        };
        Principal::new(manager.id, manager.email.clone(), capabilities)
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), AuthError> {
        if self.has(capability) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(capability))
        }
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }
}
