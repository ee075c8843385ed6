//! Shared test utilities for the credential workspace
//!
//! - `TestDatabase`: PostgreSQL container with the schema migrated (feature: "postgres")
//! - `TestDataBuilder`: deterministic emails and passwords per test
//! - `assertions`: assertion helpers with readable failure messages
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let email = builder.email("primary");
//!     let password = builder.password();
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic test data keyed by a seed.
///
/// Tests sharing a database get disjoint emails as long as their names differ.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let a = TestDataBuilder::from_test_name("signup_roundtrip");
    /// let b = TestDataBuilder::from_test_name("signup_roundtrip");
    /// assert_eq!(a.email("x"), b.email("x"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Email unique to this seed and `label`, e.g. `test-1234-primary@example.com`
    pub fn email(&self, label: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, label)
    }

    /// Password derived from the seed
    pub fn password(&self) -> String {
        format!("pw-{:016x}", self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;

    /// Assert that `encoded` is a `salt.hash` pair that does not leak `plaintext`
    pub fn assert_salted_hash(encoded: &str, plaintext: &str) {
        assert_ne!(encoded, plaintext, "stored hash equals the plaintext password");

        let parts: Vec<&str> = encoded.split('.').collect();
        assert_eq!(parts.len(), 2, "expected exactly one separator in {encoded:?}");
        for part in parts {
            assert!(!part.is_empty(), "empty part in {encoded:?}");
            assert_ne!(part, plaintext, "part of the hash equals the plaintext password");
        }
    }

    /// Assert that a result is an error matching `pred`
    pub fn assert_err_matches<T: Debug, E: Debug>(
        result: Result<T, E>,
        pred: impl FnOnce(&E) -> bool,
        context: &str,
    ) {
        match result {
            Err(ref err) if pred(err) => {}
            other => panic!("{}: unexpected result {:?}", context, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::assertions::*;
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);

        assert_eq!(a.email("main"), b.email("main"));
        assert_eq!(a.password(), b.password());
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");

        assert_ne!(a.email("main"), b.email("main"));
    }

    #[test]
    fn test_email_labels_differ() {
        let builder = TestDataBuilder::new(7);
        assert_eq!(builder.email("main"), "test-7-main@example.com");
        assert_ne!(builder.email("main"), builder.email("other"));
    }

    #[test]
    fn test_assert_salted_hash_accepts_pair() {
        assert_salted_hash("00ff.ff00", "password");
    }

    #[test]
    #[should_panic(expected = "exactly one separator")]
    fn test_assert_salted_hash_rejects_plain_value() {
        assert_salted_hash("password-without-separator", "password");
    }

    #[test]
    fn test_assert_err_matches() {
        let result: Result<(), &str> = Err("conflict");
        assert_err_matches(result, |e| *e == "conflict", "conflict expected");
    }
}
