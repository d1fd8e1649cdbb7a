// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::StrongboxConfig;

/// Lowest memory cost accepted from configuration, in KiB.
pub const MIN_KDF_MEMORY_COST: u32 = 8192;

/// Highest memory cost accepted anywhere, in KiB (4 GiB).
///
/// Stores carry their own cost parameters, so the same ceiling bounds what a
/// store file can ask for before its master key is checked.
pub const MAX_KDF_MEMORY_COST: u32 = 4 * 1024 * 1024;

/// Highest Argon2id pass count accepted anywhere.
pub const MAX_KDF_ITERATIONS: u32 = 64;

/// Log levels accepted by `log.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every violation instead of failing fast.
pub fn validate_config(config: &StrongboxConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.store.default_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.default_path must not be empty".to_string(),
        });
    }

    let auth = &config.auth;
    if auth.kdf_memory_cost < MIN_KDF_MEMORY_COST {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_memory_cost must be at least {MIN_KDF_MEMORY_COST} (8 MiB), got {}",
                auth.kdf_memory_cost
            ),
        });
    }

    if auth.kdf_memory_cost > MAX_KDF_MEMORY_COST {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_memory_cost must be at most {MAX_KDF_MEMORY_COST} (4 GiB), got {}",
                auth.kdf_memory_cost
            ),
        });
    }

    if auth.kdf_iterations < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_iterations must be at least 1, got {}",
                auth.kdf_iterations
            ),
        });
    }

    if auth.kdf_iterations > MAX_KDF_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_iterations must be at most {MAX_KDF_ITERATIONS}, got {}",
                auth.kdf_iterations
            ),
        });
    }

    if auth.kdf_parallelism < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_parallelism must be at least 1, got {}",
                auth.kdf_parallelism
            ),
        });
    } else if u64::from(auth.kdf_memory_cost) < 8 * u64::from(auth.kdf_parallelism) {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_memory_cost must be at least 8 KiB per lane ({} lanes), got {}",
                auth.kdf_parallelism, auth.kdf_memory_cost
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&StrongboxConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let mut config = StrongboxConfig::default();
        config.store.default_path = "  ".to_string();
        config.auth.kdf_memory_cost = 1024;
        config.auth.kdf_iterations = 0;
        config.log.level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn memory_must_cover_every_lane() {
        let mut config = StrongboxConfig::default();
        config.auth.kdf_memory_cost = MIN_KDF_MEMORY_COST;
        config.auth.kdf_parallelism = 2048;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("per lane"));
    }

    #[test]
    fn zero_parallelism_is_rejected() {
        let mut config = StrongboxConfig::default();
        config.auth.kdf_parallelism = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("kdf_parallelism"));
    }

    #[test]
    fn costs_above_ceiling_are_rejected() {
        let mut config = StrongboxConfig::default();
        config.auth.kdf_memory_cost = MAX_KDF_MEMORY_COST + 1;
        config.auth.kdf_iterations = MAX_KDF_ITERATIONS + 1;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("at most"));
    }
}
