// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Strongbox - a local, master-key protected credential store.
#[derive(Parser, Debug)]
#[command(name = "strongbox", version, about, long_about = None)]
pub struct Cli {
    /// Store file to operate on (defaults to `store.default_path` from config).
    #[arg(short, long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new, empty store file.
    New {
        /// Where to create the store (overrides --store).
        path: Option<PathBuf>,
    },
    /// Add new groups, each with one key and secret.
    Add {
        #[arg(required = true)]
        groups: Vec<String>,
    },
    /// Replace the secret of an existing key.
    Replace { group: String, key: String },
    /// Print the secret behind a key, re-prompting until the key exists.
    Extract {
        #[arg(required = true)]
        groups: Vec<String>,
    },
    /// Show the group/key tree of all or selected groups.
    List { groups: Vec<String> },
}

impl Cli {
    /// Store path for commands that open an existing store.
    pub fn store_path(&self, default_path: &str) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_global_store() {
        let cli = Cli::try_parse_from(["strongbox", "add", "mail", "wifi", "--store", "v.json"])
            .unwrap();
        assert_eq!(cli.store_path("default.json"), PathBuf::from("v.json"));
        match cli.command {
            Commands::Add { groups } => assert_eq!(groups, vec!["mail", "wifi"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_configured_path() {
        let cli = Cli::try_parse_from(["strongbox", "list"]).unwrap();
        assert_eq!(cli.store_path("default.json"), PathBuf::from("default.json"));
    }

    #[test]
    fn extract_requires_a_group() {
        assert!(Cli::try_parse_from(["strongbox", "extract"]).is_err());
    }

    #[test]
    fn verify_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
