use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{AuthError, Passwords, TokenIssuer};
use crate::lock::{CollectionLock, ExclusiveGuard, InMemoryCollectionLock, SharedGuard};
use crate::ranked::{fresh_id, ClockIdSource, IdSource};
use crate::store::CollectionStore;

/// A catalog manager as persisted in the managers collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC hash.
    pub password: String,
    #[serde(rename = "super", default)]
    pub is_super: bool,
}

pub struct Accounts<S> {
    store: S,
    lock: Arc<dyn CollectionLock>,
    ids: Arc<dyn IdSource>,
    passwords: Passwords,
    tokens: TokenIssuer,
}

impl<S: CollectionStore<Manager>> Accounts<S> {
    pub fn new(store: S, tokens: TokenIssuer) -> Self {
        Accounts {
            store,
            lock: Arc::new(InMemoryCollectionLock::new()),
            ids: Arc::new(ClockIdSource),
            passwords: Passwords::default(),
            tokens,
        }
    }

    pub fn with_passwords(mut self, passwords: Passwords) -> Self {
        self.passwords = passwords;
        self
    }

    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new, non-super manager.
    pub fn register(&self, email: &str, password: &str) -> Result<Manager, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let hash = self.passwords.hash(password)?;

        let _guard = ExclusiveGuard::acquire(self.lock.as_ref())?;
        let mut managers = self.store.load()?;
        if managers.iter().any(|m| m.email == email) {
            return Err(AuthError::DuplicateEmail(email.to_string()));
        }

        let id = fresh_id(self.ids.as_ref(), |candidate| {
            managers.iter().any(|m| m.id == candidate)
        })
        .map_err(|attempts| AuthError::IdentifierCollision { attempts })?;

        let manager = Manager {
            id,
            email: email.to_string(),
            password: hash,
            is_super: false,
        };
        managers.push(manager.clone());
        self.store.save(&managers)?;

        info!(id, email, "manager registered");
        Ok(manager)
    }

    /// Check credentials and issue a bearer token.
    pub fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let manager = self
            .find_by_email(email)?
            .ok_or_else(|| AuthError::UnknownEmail(email.to_string()))?;

        if !self.passwords.verify(password, &manager.password)? {
            warn!(id = manager.id, "login rejected: wrong password");
            return Err(AuthError::WrongPassword);
        }

        let token = self.tokens.issue(manager.id, &manager.email)?;
        info!(id = manager.id, "manager logged in");
        Ok(token)
    }

    /// Grant a manager super status (read and write capabilities).
    pub fn promote(&self, email: &str) -> Result<Manager, AuthError> {
        let email = email.trim();
        let _guard = ExclusiveGuard::acquire(self.lock.as_ref())?;
        let mut managers = self.store.load()?;

        let manager = managers
            .iter_mut()
            .find(|m| m.email == email)
            .ok_or_else(|| AuthError::UnknownEmail(email.to_string()))?;
        manager.is_super = true;
        let promoted = manager.clone();

        self.store.save(&managers)?;
        info!(id = promoted.id, email, "manager promoted");
        Ok(promoted)
    }

    pub fn find(&self, id: i64) -> Result<Option<Manager>, AuthError> {
        let _guard = SharedGuard::acquire(self.lock.as_ref())?;
        Ok(self.store.load()?.into_iter().find(|m| m.id == id))
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Manager>, AuthError> {
        let _guard = SharedGuard::acquire(self.lock.as_ref())?;
        Ok(self.store.load()?.into_iter().find(|m| m.email == email))
    }
}
