//! Credentials Domain
//!
//! Registers users with salted, hashed passwords and verifies credentials on
//! sign-in.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐
//! │ CredentialService │  ← signup / signin, uniqueness, verification
//! └─────────┬─────────┘
//!           │
//! ┌─────────▼─────────┐      ┌────────────────┐
//! │     UserStore     │      │ PasswordHasher │  ← Argon2id, hex `salt.hash`
//! └─────────┬─────────┘      └────────────────┘
//!           │
//!   InMemoryUserStore / PostgresUserStore
//! ```
//!
//! Uniqueness of the email is enforced twice: the service rejects a signup
//! when `find` already returns a record, and the store refuses a conflicting
//! `create` atomically. The second check is what holds under concurrent
//! signups for the same address.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_credentials::{CredentialService, HasherConfig, InMemoryUserStore, PasswordHasher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hasher = PasswordHasher::new(HasherConfig::default())?;
//! let service = CredentialService::new(InMemoryUserStore::new(), hasher);
//!
//! let user = service.signup("ada@example.com", "correct horse").await?;
//! let same = service.signin("ada@example.com", "correct horse").await?;
//! assert_eq!(user.id, same.id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod hasher;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use config::HasherConfig;
pub use error::{CredentialError, CredentialResult, StoreError, StoreResult};
pub use hasher::PasswordHasher;
pub use models::{SaltedHash, UserRecord};
pub use postgres::PostgresUserStore;
pub use repository::{InMemoryUserStore, UserStore};
pub use service::CredentialService;
