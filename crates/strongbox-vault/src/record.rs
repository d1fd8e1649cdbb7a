// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted store record: `{"checksum": .., "salt": .., "data": {..}}`.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strongbox_core::{Result, StrongboxError};

use crate::auth::Authenticator;
use crate::store::{RawGroups, Store};

/// On-disk form of a [`Store`].
///
/// Extra top-level fields are ignored when reading.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFile {
    pub checksum: String,
    pub salt: String,
    pub data: RawGroups,
}

impl std::fmt::Debug for StoreFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreFile")
            .field("checksum", &"[REDACTED]")
            .field("salt", &self.salt)
            .field("groups", &self.data.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StoreFile {
    /// Parse a store record. `source` names the input in the error.
    ///
    /// Any missing field, wrong type or invalid JSON is reported as the same
    /// [`StrongboxError::MalformedStoreFile`].
    pub fn from_json(source: &str, json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|_| StrongboxError::MalformedStoreFile(source.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StrongboxError::Internal(format!("failed to serialize store: {e}")))
    }

    pub fn from_store(store: &Store) -> Self {
        Self {
            checksum: store.checksum().to_string(),
            salt: store.salt().to_string(),
            data: store.to_raw(),
        }
    }

    /// Authenticate `master_key` and materialize the store.
    ///
    /// A checksum whose embedded costs are refused is reported as a malformed
    /// `source`.
    pub fn into_store(
        self,
        source: &str,
        master_key: &SecretString,
        authenticator: &Authenticator,
    ) -> Result<Store> {
        Store::load(self.data, &self.checksum, &self.salt, master_key, authenticator).map_err(
            |e| match e {
                StrongboxError::MalformedStoreFile(_) => {
                    StrongboxError::MalformedStoreFile(source.to_string())
                }
                other => other,
            },
        )
    }
}
