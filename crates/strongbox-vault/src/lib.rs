// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-key authenticated credential store.
//!
//! A [`Store`] holds named [`Group`]s of key/secret pairs. Opening one
//! requires a master key whose Argon2id checksum matches the one recorded in
//! the store file. Secrets are locked with a repeating-key XOR keyed by that
//! checksum. Stores and groups are immutable: every change returns a new
//! value and leaves the old one intact.

pub mod auth;
pub mod cipher;
pub mod file;
pub mod group;
pub mod prompt;
pub mod record;
pub mod store;
pub mod tree;

pub use auth::{Authenticator, HashScheme};
pub use file::{create_store_file, read_store_file, write_store_file};
pub use group::Group;
pub use prompt::{get_master_key, get_master_key_with_confirm, MASTER_KEY_ENV_VAR};
pub use record::StoreFile;
pub use store::{RawGroups, Store};
pub use tree::render_key_tree;
