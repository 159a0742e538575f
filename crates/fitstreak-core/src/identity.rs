//! Signed-in identity.
//!
//! Recording requires a user id; its absence is a precondition failure
//! ([`StoreError::NotAuthenticated`]), not a retryable store error.

use crate::error::{CoreError, Result, StoreError};
use crate::storage::Database;

const USER_ID_KEY: &str = "user_id";

/// Supplies the currently signed-in user id.
pub trait IdentityProvider {
    /// # Errors
    /// Returns `StoreError::NotAuthenticated` when nobody is signed in.
    fn current_user(&self) -> Result<String>;
}

/// Identity persisted in the local kv database.
pub struct KvIdentity<'a> {
    db: &'a Database,
}

impl<'a> KvIdentity<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn sign_in(&self, user_id: &str) -> Result<()> {
        self.db.kv_set(USER_ID_KEY, user_id)?;
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.db.kv_delete(USER_ID_KEY)?;
        Ok(())
    }
}

impl IdentityProvider for KvIdentity<'_> {
    fn current_user(&self) -> Result<String> {
        self.db
            .kv_get(USER_ID_KEY)?
            .ok_or(CoreError::Store(StoreError::NotAuthenticated))
    }
}

/// Fixed identity for tests and embedding.
pub struct StaticIdentity(pub String);

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
