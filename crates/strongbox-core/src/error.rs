// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Strongbox credential store.

use std::path::PathBuf;

use thiserror::Error;

/// The error type returned by every Strongbox operation.
///
/// Store-level variants (`GroupAlreadyExists`, `GroupNotFound`, `KeyNotFound`)
/// are recoverable by the caller. `MalformedStoreFile` and
/// `AuthenticationFailed` abort the current command.
#[derive(Debug, Error)]
pub enum StrongboxError {
    /// The persisted store is missing a field or could not be parsed.
    ///
    /// Carries only the name of the source; which field was wrong is
    /// intentionally not reported.
    #[error("{0} could not be parsed as a valid store file")]
    MalformedStoreFile(String),

    /// The supplied master key does not match the store checksum.
    #[error("the provided master key is incorrect")]
    AuthenticationFailed,

    /// `add_group` was called with a name that is already taken.
    #[error("group `{0}` already exists in the store")]
    GroupAlreadyExists(String),

    /// Group names must be non-empty.
    #[error("group name must not be empty")]
    EmptyGroupName,

    /// A group lookup referenced a name that is not in the store.
    #[error("group `{0}` does not exist in the store")]
    GroupNotFound(String),

    /// A key lookup referenced a key that is not in the group.
    #[error("key `{key}` does not exist in group `{group}`")]
    KeyNotFound { group: String, key: String },

    /// The cipher was handed an empty key. This is a contract violation by
    /// the caller, never a user error.
    #[error("cipher key must not be empty")]
    InvalidCipherKey,

    /// A stored salt is not in the format checksum derivation expects.
    #[error("invalid salt: {0}")]
    InvalidSalt(String),

    /// XOR produced a value that is not a Unicode scalar value.
    #[error("cipher produced unrepresentable code point U+{0:04X}")]
    UnrepresentableCodePoint(u32),

    /// Refused to overwrite an existing store file.
    #[error("{} already exists", .0.display())]
    StoreFileExists(PathBuf),

    /// Reading the master key or other interactive input failed.
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Configuration could not be used (invalid hash parameters and the like).
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors from reading or writing store files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, StrongboxError>;
