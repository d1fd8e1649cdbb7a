// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repeating-key XOR over Unicode code points.
//!
//! The transform is its own inverse, so the same call locks and unlocks a
//! value. It is not authenticated encryption: a wrong key yields garbage
//! rather than an error.

use strongbox_core::{Result, StrongboxError};

/// XOR every code point of `value` with the code point of `key` at the same
/// position modulo the key length.
///
/// The output has exactly as many code points as `value`. With an ASCII key
/// every result is a valid `char`; for other keys a result may fall in the
/// surrogate range or above U+10FFFF, which fails with
/// [`StrongboxError::UnrepresentableCodePoint`].
pub fn transform(value: &str, key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(StrongboxError::InvalidCipherKey);
    }

    value
        .chars()
        .zip(key.chars().cycle())
        .map(|(v, k)| {
            let code = u32::from(v) ^ u32::from(k);
            char::from_u32(code).ok_or(StrongboxError::UnrepresentableCodePoint(code))
        })
        .collect()
}
