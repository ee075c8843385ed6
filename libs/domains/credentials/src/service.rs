use std::sync::Arc;
use tokio::task;
use tracing::{debug, info, instrument, warn};

use crate::error::{CredentialError, CredentialResult};
use crate::hasher::PasswordHasher;
use crate::models::{SaltedHash, UserRecord};
use crate::repository::UserStore;

/// Signup and signin over a [`UserStore`].
///
/// Holds no mutable state; clones share the store and the hasher.
pub struct CredentialService<S: UserStore> {
    store: Arc<S>,
    hasher: Arc<PasswordHasher>,
}

impl<S: UserStore> Clone for CredentialService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<S: UserStore> CredentialService<S> {
    pub fn new(store: S, hasher: PasswordHasher) -> Self {
        Self {
            store: Arc::new(store),
            hasher: Arc::new(hasher),
        }
    }

    /// Register `email` with a freshly salted hash of `password`.
    ///
    /// Fails with `EmailInUse` when the email is already on record, either
    /// on the pre-insert lookup or when the store's own constraint rejects
    /// the insert. Nothing is persisted on failure.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> CredentialResult<UserRecord> {
        if !self.store.find(email).await?.is_empty() {
            debug!("Signup rejected, email already registered");
            return Err(CredentialError::EmailInUse(email.to_string()));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let salted = run_blocking(move || hasher.hash(&password)).await?;

        // A concurrent signup may have inserted the same email since the lookup
        let user = self.store.create(email, &salted.to_string()).await?;

        info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Verify `password` for `email` and return the stored record.
    ///
    /// More than one record for the email is treated as `AmbiguousIdentity`
    /// and no password is checked.
    #[instrument(skip(self, password))]
    pub async fn signin(&self, email: &str, password: &str) -> CredentialResult<UserRecord> {
        let mut found = self.store.find(email).await?;

        let user = match found.len() {
            0 => {
                debug!("Signin rejected, unknown email");
                return Err(CredentialError::UserNotFound(email.to_string()));
            }
            1 => found.remove(0),
            count => {
                warn!(count, "Multiple users share one email, refusing signin");
                return Err(CredentialError::AmbiguousIdentity(email.to_string()));
            }
        };

        let stored = SaltedHash::parse(&user.password_hash).inspect_err(|_| {
            warn!(user_id = %user.id, "Stored password hash is malformed");
        })?;

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let valid = run_blocking(move || hasher.verify(&password, &stored)).await?;

        if !valid {
            debug!(user_id = %user.id, "Signin rejected, wrong password");
            return Err(CredentialError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User signed in");
        Ok(user)
    }
}

/// Run a hashing closure on the blocking pool so it does not stall the runtime
async fn run_blocking<T, F>(f: F) -> CredentialResult<T>
where
    F: FnOnce() -> CredentialResult<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| CredentialError::Hashing(format!("hashing task failed: {e}")))?
}
