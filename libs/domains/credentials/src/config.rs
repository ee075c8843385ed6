use argon2::Params;
use core_config::{env_parse_or, ConfigError, FromEnv};

/// Argon2id work factor and encoding sizes.
///
/// The parameters are not part of the stored `salt.hash` encoding, so
/// changing memory, iterations or parallelism invalidates existing records.
/// Salt and output lengths are recovered from the stored hex and may change
/// freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasherConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
    /// Random salt size in bytes
    pub salt_len: usize,
    /// Derived key size in bytes
    pub output_len: usize,
}

impl HasherConfig {
    pub const MIN_SALT_LEN: usize = argon2::MIN_SALT_LEN;
    pub const MAX_SALT_LEN: usize = 64;
    /// Bounds of `password_hash::Output`, which performs the constant-time comparison
    pub const MIN_OUTPUT_LEN: usize = 10;
    pub const MAX_OUTPUT_LEN: usize = 64;

    /// Build the Argon2 parameter set, rejecting values the algorithm or the
    /// encoding cannot support.
    pub fn params(&self) -> Result<Params, ConfigError> {
        if !(Self::MIN_SALT_LEN..=Self::MAX_SALT_LEN).contains(&self.salt_len) {
            return Err(ConfigError::Invalid(format!(
                "salt length must be between {} and {} bytes, got {}",
                Self::MIN_SALT_LEN,
                Self::MAX_SALT_LEN,
                self.salt_len
            )));
        }

        if !(Self::MIN_OUTPUT_LEN..=Self::MAX_OUTPUT_LEN).contains(&self.output_len) {
            return Err(ConfigError::Invalid(format!(
                "output length must be between {} and {} bytes, got {}",
                Self::MIN_OUTPUT_LEN,
                Self::MAX_OUTPUT_LEN,
                self.output_len
            )));
        }

        // Output length is enforced per call so stored hashes of another length still verify.
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| ConfigError::Invalid(format!("argon2 parameters: {e}")))
    }
}

impl Default for HasherConfig {
    /// OWASP baseline for Argon2id: 19 MiB, 2 passes, 1 lane
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
            salt_len: 16,
            output_len: 32,
        }
    }
}

impl FromEnv for HasherConfig {
    /// Unset variables keep the defaults
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            memory_kib: env_parse_or("CREDENTIALS_ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env_parse_or("CREDENTIALS_ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: env_parse_or("CREDENTIALS_ARGON2_PARALLELISM", defaults.parallelism)?,
            salt_len: env_parse_or("CREDENTIALS_SALT_LEN", defaults.salt_len)?,
            output_len: env_parse_or("CREDENTIALS_HASH_LEN", defaults.output_len)?,
        };
        config.params()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "CREDENTIALS_ARGON2_MEMORY_KIB",
        "CREDENTIALS_ARGON2_ITERATIONS",
        "CREDENTIALS_ARGON2_PARALLELISM",
        "CREDENTIALS_SALT_LEN",
        "CREDENTIALS_HASH_LEN",
    ];

    #[test]
    fn test_default_params_are_valid() {
        let params = HasherConfig::default().params().unwrap();
        assert_eq!(params.m_cost(), 19456);
        assert_eq!(params.t_cost(), 2);
        assert_eq!(params.p_cost(), 1);
    }

    #[test]
    fn test_from_env_uses_defaults_when_unset() {
        temp_env::with_vars_unset(VARS, || {
            assert_eq!(HasherConfig::from_env().unwrap(), HasherConfig::default());
        });
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [
                ("CREDENTIALS_ARGON2_MEMORY_KIB", Some("65536")),
                ("CREDENTIALS_ARGON2_ITERATIONS", Some("3")),
                ("CREDENTIALS_ARGON2_PARALLELISM", Some("4")),
                ("CREDENTIALS_SALT_LEN", None),
                ("CREDENTIALS_HASH_LEN", None),
            ],
            || {
                let config = HasherConfig::from_env().unwrap();
                assert_eq!(config.memory_kib, 65536);
                assert_eq!(config.iterations, 3);
                assert_eq!(config.parallelism, 4);
                assert_eq!(config.salt_len, 16);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_unparsable_value() {
        temp_env::with_var("CREDENTIALS_ARGON2_ITERATIONS", Some("many"), || {
            let err = HasherConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("CREDENTIALS_ARGON2_ITERATIONS"));
        });
    }

    #[test]
    fn test_rejects_short_salt() {
        let config = HasherConfig {
            salt_len: 4,
            ..Default::default()
        };
        assert!(matches!(config.params(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_output_outside_comparison_bounds() {
        for output_len in [4, 65] {
            let config = HasherConfig {
                output_len,
                ..Default::default()
            };
            assert!(matches!(config.params(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = HasherConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.params(), Err(ConfigError::Invalid(_))));
    }
}
