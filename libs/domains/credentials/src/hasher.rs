use argon2::{
    password_hash::{
        rand_core::{OsRng, RngCore},
        Output,
    },
    Algorithm, Argon2, Version,
};
use core_config::ConfigError;

use crate::config::HasherConfig;
use crate::error::{CredentialError, CredentialResult};
use crate::models::SaltedHash;

/// Argon2id password hasher producing hex `salt.hash` encodings.
///
/// Hashing is CPU bound; async callers should run it on a blocking thread.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    salt_len: usize,
    output_len: usize,
}

impl PasswordHasher {
    pub fn new(config: HasherConfig) -> Result<Self, ConfigError> {
        let params = config.params()?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            salt_len: config.salt_len,
            output_len: config.output_len,
        })
    }

    /// Hash `password` under a fresh random salt
    pub fn hash(&self, password: &str) -> CredentialResult<SaltedHash> {
        let mut salt = vec![0u8; self.salt_len];
        OsRng.fill_bytes(&mut salt);

        let digest = self.derive(password, &salt, self.output_len)?;

        Ok(SaltedHash {
            salt: const_hex::encode(&salt),
            hash: const_hex::encode(&digest),
        })
    }

    /// Check `password` against a stored encoding.
    ///
    /// `Ok(false)` is a wrong password. Undecodable or out-of-range parts
    /// are `MalformedCredentialRecord`.
    pub fn verify(&self, password: &str, stored: &SaltedHash) -> CredentialResult<bool> {
        let salt = decode_part(&stored.salt)?;
        let expected = decode_part(&stored.hash)?;

        if salt.len() < HasherConfig::MIN_SALT_LEN {
            return Err(CredentialError::MalformedCredentialRecord);
        }

        let expected =
            Output::new(&expected).map_err(|_| CredentialError::MalformedCredentialRecord)?;
        let actual = self.derive(password, &salt, expected.len())?;
        let actual = Output::new(&actual).map_err(|e| CredentialError::Hashing(e.to_string()))?;

        // Output's PartialEq is constant time
        Ok(actual == expected)
    }

    fn derive(&self, password: &str, salt: &[u8], len: usize) -> CredentialResult<Vec<u8>> {
        let mut out = vec![0u8; len];
        self.argon2
            .hash_password_into(password.as_bytes(), salt, &mut out)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;
        Ok(out)
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", self.argon2.params())
            .field("salt_len", &self.salt_len)
            .field("output_len", &self.output_len)
            .finish()
    }
}

fn decode_part(part: &str) -> CredentialResult<Vec<u8>> {
    const_hex::decode(part).map_err(|_| CredentialError::MalformedCredentialRecord)
}
