// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Strongbox credential store.
//!
//! Holds the error type shared by the config, vault and CLI crates so every
//! layer reports failures through one enum.

pub mod error;

pub use error::{Result, StrongboxError};
