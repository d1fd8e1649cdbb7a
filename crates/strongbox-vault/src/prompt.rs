// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-key acquisition via the STRONGBOX_MASTER_KEY environment variable
//! or a hidden TTY prompt.

use std::io::IsTerminal as _;

use secrecy::{ExposeSecret, SecretString};
use strongbox_core::{Result, StrongboxError};
use subtle::ConstantTimeEq;

/// Environment variable that supplies the master key non-interactively.
pub const MASTER_KEY_ENV_VAR: &str = "STRONGBOX_MASTER_KEY";

/// Get the master key of an existing store.
///
/// Priority:
/// 1. `STRONGBOX_MASTER_KEY` (scripts, CI)
/// 2. Interactive TTY prompt via `rpassword`
pub fn get_master_key() -> Result<SecretString> {
    if let Some(key) = master_key_from_env() {
        return Ok(key);
    }

    if std::io::stdin().is_terminal() {
        eprintln!("Please enter your master key.");
        return read_non_empty("Master key: ");
    }

    Err(no_master_key())
}

/// Get the master key for a new store, asking twice until both entries match.
///
/// The environment variable is taken as-is without confirmation.
pub fn get_master_key_with_confirm() -> Result<SecretString> {
    if let Some(key) = master_key_from_env() {
        return Ok(key);
    }

    if !std::io::stdin().is_terminal() {
        return Err(no_master_key());
    }

    loop {
        eprintln!("Please enter the master key for your new store twice.");
        let first = read_non_empty("Master key: ")?;
        let second = read_non_empty("Confirm: ")?;
        if keys_match(&first, &second) {
            return Ok(first);
        }
        eprintln!("The entered master keys do not match. Please try again.");
    }
}

fn master_key_from_env() -> Option<SecretString> {
    std::env::var(MASTER_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}

fn read_non_empty(prompt: &str) -> Result<SecretString> {
    let key = rpassword::prompt_password(prompt)
        .map_err(|e| StrongboxError::Prompt(format!("failed to read master key: {e}")))?;
    if key.is_empty() {
        return Err(StrongboxError::Prompt("empty master key not allowed".to_string()));
    }
    Ok(SecretString::from(key))
}

fn keys_match(a: &SecretString, b: &SecretString) -> bool {
    a.expose_secret()
        .as_bytes()
        .ct_eq(b.expose_secret().as_bytes())
        .into()
}

fn no_master_key() -> StrongboxError {
    StrongboxError::Prompt(format!(
        "no master key provided. Set {MASTER_KEY_ENV_VAR} or run interactively."
    ))
}
