use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CredentialError, CredentialResult};

/// Separator between the salt and the digest in an encoded password hash
pub const SEPARATOR: char = '.';

/// A persisted credential record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Assigned by the store on creation, never changed afterwards
    pub id: Uuid,
    /// Identity key, compared by exact string match
    pub email: String,
    /// Encoded `salt.hash`, both halves lowercase hex
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Parsed form of [`UserRecord::password_hash`].
///
/// Both parts are kept as hex text; decoding to bytes happens in the hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedHash {
    pub salt: String,
    pub hash: String,
}

impl SaltedHash {
    /// Split an encoded `salt.hash` string.
    ///
    /// Exactly one separator, both halves non-empty lowercase hex. Anything
    /// else means the stored record is corrupt.
    pub fn parse(encoded: &str) -> CredentialResult<Self> {
        let (salt, hash) = encoded
            .split_once(SEPARATOR)
            .ok_or(CredentialError::MalformedCredentialRecord)?;

        if !is_lower_hex(salt) || !is_lower_hex(hash) {
            return Err(CredentialError::MalformedCredentialRecord);
        }

        Ok(Self {
            salt: salt.to_string(),
            hash: hash.to_string(),
        })
    }
}

impl fmt::Display for SaltedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.salt, SEPARATOR, self.hash)
    }
}

// Empty strings are rejected here, and a second separator fails the charset check.
fn is_lower_hex(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
