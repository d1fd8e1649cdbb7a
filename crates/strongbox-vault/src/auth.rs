// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-key checksums.
//!
//! A checksum is an Argon2id PHC string such as
//! `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<digest>`. It names the algorithm,
//! the cost parameters and the salt, so a store can always be verified with
//! the parameters it was created with.

use argon2::password_hash::{PasswordHash, PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use ring::rand::{SecureRandom, SystemRandom};
use secrecy::{ExposeSecret, SecretString};
use strongbox_config::validation::{MAX_KDF_ITERATIONS, MAX_KDF_MEMORY_COST};
use strongbox_config::AuthConfig;
use strongbox_core::{Result, StrongboxError};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Number of random bytes in a generated salt.
pub const SALT_LEN: usize = 16;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashScheme {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashScheme {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

impl HashScheme {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            memory_cost: config.kdf_memory_cost,
            iterations: config.kdf_iterations,
            parallelism: config.kdf_parallelism,
        }
    }

    /// Recover the parameters embedded in an Argon2id checksum.
    ///
    /// Returns `None` for anything that is not an Argon2id PHC string.
    pub fn from_checksum(checksum: &str) -> Option<Self> {
        let hash = PasswordHash::new(checksum).ok()?;
        if hash.algorithm != Algorithm::Argon2id.ident() {
            return None;
        }
        let params = Params::try_from(&hash).ok()?;
        Some(Self {
            memory_cost: params.m_cost(),
            iterations: params.t_cost(),
            parallelism: params.p_cost(),
        })
    }

    /// Whether the costs stay within what this tool is willing to spend on
    /// one derivation.
    pub fn within_limits(&self) -> bool {
        self.memory_cost <= MAX_KDF_MEMORY_COST && self.iterations <= MAX_KDF_ITERATIONS
    }

    fn params(&self) -> Result<Params> {
        Params::new(self.memory_cost, self.iterations, self.parallelism, None)
            .map_err(|e| StrongboxError::Config(format!("invalid Argon2id parameters: {e}")))
    }
}

/// Derives and verifies master-key checksums under one [`HashScheme`].
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    scheme: HashScheme,
}

impl Authenticator {
    pub fn new(scheme: HashScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// An authenticator using the parameters embedded in `checksum`, or this
    /// one unchanged if the checksum carries none.
    ///
    /// Embedded costs above [`HashScheme::within_limits`] are refused with
    /// [`StrongboxError::MalformedStoreFile`] before anything is allocated.
    pub fn for_checksum(&self, checksum: &str) -> Result<Self> {
        match HashScheme::from_checksum(checksum) {
            Some(scheme) if !scheme.within_limits() => {
                warn!(
                    memory_cost = scheme.memory_cost,
                    iterations = scheme.iterations,
                    "checksum cost parameters exceed limits"
                );
                Err(StrongboxError::MalformedStoreFile("checksum".to_string()))
            }
            Some(scheme) => Ok(Self::new(scheme)),
            None => Ok(self.clone()),
        }
    }

    /// Derive the checksum of `master_key` under `salt`.
    ///
    /// `salt` must be a B64 salt as produced by [`Authenticator::generate_salt`];
    /// anything else fails with [`StrongboxError::InvalidSalt`].
    pub fn derive(&self, master_key: &SecretString, salt: &str) -> Result<String> {
        let salt = SaltString::from_b64(salt)
            .map_err(|e| StrongboxError::InvalidSalt(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.scheme.params()?);

        let hash = argon2
            .hash_password(master_key.expose_secret().as_bytes(), &salt)
            .map_err(|e| StrongboxError::Internal(format!("checksum derivation failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Constant-time comparison of a freshly derived checksum with the stored one.
    pub fn verify(candidate: &str, stored: &str) -> bool {
        candidate.as_bytes().ct_eq(stored.as_bytes()).into()
    }

    /// Generate a fresh random salt.
    pub fn generate_salt() -> Result<String> {
        let rng = SystemRandom::new();
        let mut bytes = [0u8; SALT_LEN];
        rng.fill(&mut bytes)
            .map_err(|_| StrongboxError::Internal("failed to generate random salt".to_string()))?;

        let salt = SaltString::encode_b64(&bytes)
            .map_err(|e| StrongboxError::Internal(format!("failed to encode salt: {e}")))?;
        Ok(salt.as_str().to_string())
    }
}
