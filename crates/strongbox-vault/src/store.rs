// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential store: an immutable, versioned collection of groups.
//!
//! Every mutating operation returns a new [`Store`]. Groups that an operation
//! does not touch are shared between the old and new value through `Arc`, and
//! the checksum/salt pair is shared as well. The value a caller loaded stays a
//! stable snapshot, so "did anything change?" is answered by comparing it with
//! the current value.
//!
//! The store's checksum doubles as the cipher key for every group.

use std::collections::BTreeMap;
use std::sync::Arc;

use secrecy::SecretString;
use strongbox_core::{Result, StrongboxError};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::auth::Authenticator;
use crate::group::Group;

/// Group name to key name to ciphertext, as persisted.
pub type RawGroups = BTreeMap<String, BTreeMap<String, String>>;

/// An authenticated set of groups.
#[derive(Clone, PartialEq, Eq)]
pub struct Store {
    groups: Arc<BTreeMap<String, Arc<Group>>>,
    checksum: Arc<str>,
    salt: Arc<str>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("groups", &self.groups.keys().collect::<Vec<_>>())
            .field("checksum", &"[REDACTED]")
            .finish()
    }
}

impl Store {
    /// Wrap raw persisted data. Values are taken as already locked.
    ///
    /// Does not authenticate anything; use [`Store::load`] for data read
    /// from disk.
    pub fn from_raw(raw: RawGroups, checksum: &str, salt: &str) -> Self {
        let groups = raw
            .into_iter()
            .map(|(name, keystore)| {
                let group = Group::from_ciphertexts(name.clone(), keystore);
                (name, Arc::new(group))
            })
            .collect();

        Self {
            groups: Arc::new(groups),
            checksum: Arc::from(checksum),
            salt: Arc::from(salt),
        }
    }

    /// Authenticate `master_key` against `checksum` and, only on success,
    /// materialize the store.
    ///
    /// The checksum is re-derived with the parameters embedded in the stored
    /// checksum when it carries any, falling back to `authenticator`'s. A salt
    /// the derivation cannot use can never match, so it is an authentication
    /// failure like any other wrong key.
    pub fn load(
        raw: RawGroups,
        checksum: &str,
        salt: &str,
        master_key: &SecretString,
        authenticator: &Authenticator,
    ) -> Result<Self> {
        let candidate = match authenticator.for_checksum(checksum)?.derive(master_key, salt) {
            Ok(candidate) => Zeroizing::new(candidate),
            Err(StrongboxError::InvalidSalt(reason)) => {
                warn!(%reason, "stored salt is unusable");
                return Err(StrongboxError::AuthenticationFailed);
            }
            Err(e) => return Err(e),
        };

        if !Authenticator::verify(&candidate, checksum) {
            warn!("master key verification failed");
            return Err(StrongboxError::AuthenticationFailed);
        }

        debug!(groups = raw.len(), "store authenticated");
        Ok(Self::from_raw(raw, checksum, salt))
    }

    /// A new, empty store protected by `master_key` under a fresh salt.
    pub fn create(master_key: &SecretString, authenticator: &Authenticator) -> Result<Self> {
        let salt = Authenticator::generate_salt()?;
        let checksum = authenticator.derive(master_key, &salt)?;

        info!("store created");
        Ok(Self::from_raw(RawGroups::new(), &checksum, &salt))
    }

    /// A new store with one more group holding the single pair `key`/`value`.
    ///
    /// `name` must be non-empty and not yet taken.
    pub fn add_group(&self, name: &str, key: &str, value: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(StrongboxError::EmptyGroupName);
        }
        if self.contains(name) {
            return Err(StrongboxError::GroupAlreadyExists(name.to_string()));
        }

        let group = Group::new(name, key, value, &self.checksum)?;
        debug!(group = %name, "group added");
        Ok(self.with_group(group))
    }

    /// A new store where the existing `key` of group `name` holds `value`.
    ///
    /// Only replaces: the key must already be present.
    pub fn replace_key(&self, name: &str, key: &str, value: &str) -> Result<Self> {
        let group = self.group(name)?;
        if !group.contains(key) {
            return Err(StrongboxError::KeyNotFound {
                group: name.to_string(),
                key: key.to_string(),
            });
        }

        let group = group.lock(key, value, &self.checksum)?;
        debug!(group = %name, key = %key, "key replaced");
        Ok(self.with_group(group))
    }

    /// Unlock `key` in group `name` with this store's checksum.
    pub fn unlock(&self, name: &str, key: &str) -> Result<SecretString> {
        self.group(name)?.unlock(key, &self.checksum)
    }

    pub fn group(&self, name: &str) -> Result<&Group> {
        self.groups
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| StrongboxError::GroupNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Groups in name order.
    pub fn groups(&self) -> impl ExactSizeIterator<Item = &Group> {
        self.groups.values().map(Arc::as_ref)
    }

    pub fn group_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The master-key checksum, also the cipher key for all groups.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The persisted form of the groups.
    pub fn to_raw(&self) -> RawGroups {
        self.groups
            .iter()
            .map(|(name, group)| (name.clone(), group.keystore().clone()))
            .collect()
    }

    /// Whether `other` is this exact version, not merely an equal one.
    ///
    /// Clones of a store are the same version; any successful
    /// `add_group`/`replace_key` produces a different one.
    pub fn is_same_version(&self, other: &Store) -> bool {
        Arc::ptr_eq(&self.groups, &other.groups)
            && Arc::ptr_eq(&self.checksum, &other.checksum)
            && Arc::ptr_eq(&self.salt, &other.salt)
    }

    fn with_group(&self, group: Group) -> Self {
        let mut groups = (*self.groups).clone();
        groups.insert(group.name().to_string(), Arc::new(group));

        Self {
            groups: Arc::new(groups),
            checksum: Arc::clone(&self.checksum),
            salt: Arc::clone(&self.salt),
        }
    }
}
