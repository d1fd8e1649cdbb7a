// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering of a store's group/key layout.

use std::fmt::Write as _;

use crate::group::Group;

/// Render groups and their key names as a tree headed by `name`.
///
/// ```text
/// vault.json
/// |-- email
/// |    |-- personal
/// |    |-- work
/// |-- wifi
///      |-- home
/// ```
///
/// Secrets never appear in the output.
pub fn render_key_tree<'a>(name: &str, groups: impl IntoIterator<Item = &'a Group>) -> String {
    let mut out = String::from(name);
    let mut groups = groups.into_iter().peekable();

    while let Some(group) = groups.next() {
        let indent = if groups.peek().is_some() { "|    " } else { "     " };
        let _ = write!(out, "\n|-- {}", group.name());
        for key in group.keys() {
            let _ = write!(out, "\n{indent}|-- {key}");
        }
    }

    out
}
