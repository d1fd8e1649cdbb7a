// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Strongbox configuration system.

use strongbox_config::diagnostic::ConfigError;
use strongbox_config::{load_and_validate_str, load_config_from_path, load_config_from_str};

#[test]
fn valid_toml_deserializes() {
    let toml = r#"
[store]
default_path = "/home/me/secrets.json"

[auth]
kdf_memory_cost = 65536
kdf_iterations = 3
kdf_parallelism = 4

[log]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.store.default_path, "/home/me/secrets.json");
    assert_eq!(config.auth.kdf_memory_cost, 65536);
    assert_eq!(config.auth.kdf_iterations, 3);
    assert_eq!(config.auth.kdf_parallelism, 4);
    assert_eq!(config.log.level, "debug");
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("defaults are valid");
    assert_eq!(config.store.default_path, "strongbox.json");
    assert_eq!(config.log.level, "info");
}

#[test]
fn unknown_key_gets_a_suggestion() {
    let toml = "[auth]\nkdf_iteratons = 3\n";

    let errors = load_and_validate_str(toml).expect_err("unknown key must be rejected");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "kdf_iteratons");
            assert_eq!(suggestion.as_deref(), Some("kdf_iterations"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[vault]\nkey = 1\n").expect_err("should fail");
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn wrong_type_is_reported_with_key_path() {
    let errors =
        load_and_validate_str("[auth]\nkdf_iterations = \"many\"\n").expect_err("should fail");
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert_eq!(key, "auth.kdf_iterations"),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

#[test]
fn semantic_errors_surface_after_parsing() {
    let errors = load_and_validate_str("[log]\nlevel = \"chatty\"\n").expect_err("should fail");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn load_from_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[store]\ndefault_path = \"elsewhere.json\"\n").unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.store.default_path, "elsewhere.json");
}
