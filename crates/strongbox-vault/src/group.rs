// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named, immutable bags of locked key/secret pairs.

use std::collections::BTreeMap;

use secrecy::SecretString;
use strongbox_core::{Result, StrongboxError};

use crate::cipher;

/// A named set of keys, each mapped to the ciphertext of its secret.
///
/// Groups never change after construction. [`Group::lock`] returns a new
/// group and leaves the receiver untouched, so older versions stay valid for
/// comparison. Keys are kept sorted.
#[derive(Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    keystore: BTreeMap<String, String>,
}

impl std::fmt::Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("keys", &self.keystore.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl Group {
    /// Build a group holding one pair, locking `value` under `cipher_key`.
    ///
    /// Fails with [`StrongboxError::EmptyGroupName`] if `name` is empty.
    pub fn new(name: &str, key: &str, value: &str, cipher_key: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(StrongboxError::EmptyGroupName);
        }
        let ciphertext = cipher::transform(value, cipher_key)?;
        Ok(Self {
            name: name.to_string(),
            keystore: BTreeMap::from([(key.to_string(), ciphertext)]),
        })
    }

    /// Wrap already-locked pairs read from a store file. No cipher work is done.
    pub fn from_ciphertexts(name: impl Into<String>, keystore: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            keystore,
        }
    }

    /// A copy of this group with `key` set to `value` locked under `cipher_key`.
    ///
    /// Inserts the key if absent and overwrites it if present.
    pub fn lock(&self, key: &str, value: &str, cipher_key: &str) -> Result<Self> {
        let ciphertext = cipher::transform(value, cipher_key)?;
        let mut keystore = self.keystore.clone();
        keystore.insert(key.to_string(), ciphertext);
        Ok(Self {
            name: self.name.clone(),
            keystore,
        })
    }

    /// Unlock the secret stored under `key`.
    pub fn unlock(&self, key: &str, cipher_key: &str) -> Result<SecretString> {
        let ciphertext = self.ciphertext(key).ok_or_else(|| StrongboxError::KeyNotFound {
            group: self.name.clone(),
            key: key.to_string(),
        })?;
        cipher::transform(ciphertext, cipher_key).map(SecretString::from)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key names in sorted order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.keystore.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keystore.contains_key(key)
    }

    /// The locked value stored under `key`.
    pub fn ciphertext(&self, key: &str) -> Option<&str> {
        self.keystore.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keystore.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keystore.is_empty()
    }

    /// The key to ciphertext mapping, as persisted.
    pub fn keystore(&self) -> &BTreeMap<String, String> {
        &self.keystore
    }
}
