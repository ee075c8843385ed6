use thiserror::Error;

/// Failures surfaced by [`CredentialService`](crate::CredentialService).
///
/// Messages may carry the email but never the password.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Email '{0}' is already in use")]
    EmailInUse(String),

    #[error("No user registered with email '{0}'")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Stored credential record is malformed")]
    MalformedCredentialRecord,

    #[error("More than one user registered with email '{0}'")]
    AmbiguousIdentity(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("User store error: {0}")]
    Store(String),
}

pub type CredentialResult<T> = Result<T, CredentialError>;

/// Failures reported by a [`UserStore`](crate::UserStore) implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store's uniqueness constraint on email rejected the insert
    #[error("User with email '{0}' already exists")]
    Conflict(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(email) => CredentialError::EmailInUse(email),
            StoreError::Backend(msg) => CredentialError::Store(msg),
        }
    }
}
