// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Every command that opens a store keeps the loaded version and only writes
//! the file back when the final store is a different version.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use strongbox_config::StrongboxConfig;
use strongbox_core::{Result, StrongboxError};
use strongbox_vault::{
    create_store_file, read_store_file, render_key_tree, write_store_file, Authenticator,
    HashScheme, Store, StoreFile,
};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::console::Console;

/// Dispatch a parsed command line.
pub async fn execute(cli: Cli, config: &StrongboxConfig, console: &mut dyn Console) -> Result<()> {
    let path = cli.store_path(&config.store.default_path);
    let authenticator = Authenticator::new(HashScheme::from_config(&config.auth));

    match cli.command {
        Commands::New { path: new_path } => {
            run_new(&new_path.unwrap_or(path), &authenticator, console).await
        }
        Commands::Add { groups } => {
            let mut session = Session::open(&path, &authenticator, console).await?;
            session.add_groups(&groups, console)?;
            session.finish(console).await.map(|_| ())
        }
        Commands::Replace { group, key } => {
            let mut session = Session::open(&path, &authenticator, console).await?;
            session.replace(&group, &key, console)?;
            session.finish(console).await.map(|_| ())
        }
        Commands::Extract { groups } => {
            let session = Session::open(&path, &authenticator, console).await?;
            session.extract(&groups, console)?;
            session.finish(console).await.map(|_| ())
        }
        Commands::List { groups } => {
            let session = Session::open(&path, &authenticator, console).await?;
            session.list(&groups, console)?;
            session.finish(console).await.map(|_| ())
        }
    }
}

/// Create a new empty store at `path`.
pub async fn run_new(
    path: &Path,
    authenticator: &Authenticator,
    console: &mut dyn Console,
) -> Result<()> {
    if tokio::fs::try_exists(path).await? {
        return Err(StrongboxError::StoreFileExists(path.to_path_buf()));
    }

    let master_key = console.master_key(true)?;
    let store = Store::create(&master_key, authenticator)?;
    create_store_file(path, &StoreFile::from_store(&store)).await?;

    console.println(&format!("{} successfully created.", path.display()));
    Ok(())
}

/// An opened store plus the version it was loaded as.
pub struct Session {
    path: PathBuf,
    original: Store,
    store: Store,
}

impl Session {
    pub async fn open(
        path: &Path,
        authenticator: &Authenticator,
        console: &mut dyn Console,
    ) -> Result<Self> {
        let file = read_store_file(path).await?;
        let master_key = console.master_key(false)?;
        let store = file.into_store(&path.display().to_string(), &master_key, authenticator)?;

        Ok(Self {
            path: path.to_path_buf(),
            original: store.clone(),
            store,
        })
    }

    /// Ask for one key and secret per group and add each group.
    pub fn add_groups(&mut self, groups: &[String], console: &mut dyn Console) -> Result<()> {
        for group in groups {
            if group.is_empty() {
                return Err(StrongboxError::EmptyGroupName);
            }
            if self.store.contains(group) {
                return Err(StrongboxError::GroupAlreadyExists(group.clone()));
            }
            let key = console.read_line(&format!("Key to create in group {group}: "))?;
            let secret = console.read_secret(&format!("Secret for key {key}: "))?;
            self.store = self.store.add_group(group, &key, secret.expose_secret())?;
        }
        Ok(())
    }

    /// Ask for a new secret and replace an existing key.
    pub fn replace(&mut self, group: &str, key: &str, console: &mut dyn Console) -> Result<()> {
        if !self.store.group(group)?.contains(key) {
            return Err(StrongboxError::KeyNotFound {
                group: group.to_string(),
                key: key.to_string(),
            });
        }
        let secret = console.read_secret(&format!("New secret for key {key}: "))?;
        self.store = self.store.replace_key(group, key, secret.expose_secret())?;
        Ok(())
    }

    /// Print the secret for a prompted key in each group.
    ///
    /// An unknown key lists the group's keys and asks again.
    pub fn extract(&self, groups: &[String], console: &mut dyn Console) -> Result<()> {
        for name in groups {
            let group = self.store.group(name)?;
            loop {
                let key = console.read_line(&format!("Key in group {name}: "))?;
                match group.unlock(&key, self.store.checksum()) {
                    Ok(secret) => {
                        console.println(&reveal(&secret));
                        break;
                    }
                    Err(StrongboxError::KeyNotFound { .. }) => {
                        console.println(&format!("The key {key} does not exist in group {name}."));
                        let keys: Vec<&str> = group.keys().collect();
                        console.println(&format!("Keys in {name}: {}", keys.join(", ")));
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    /// Print the key tree of the selected groups, or of all groups.
    pub fn list(&self, groups: &[String], console: &mut dyn Console) -> Result<()> {
        for name in groups {
            if !self.store.contains(name) {
                return Err(StrongboxError::GroupNotFound(name.clone()));
            }
        }

        let selected = self
            .store
            .groups()
            .filter(|g| groups.is_empty() || groups.iter().any(|name| name == g.name()));
        console.println(&render_key_tree(&self.path.display().to_string(), selected));
        Ok(())
    }

    /// Whether the current store differs from the loaded version.
    pub fn is_modified(&self) -> bool {
        !self.store.is_same_version(&self.original)
    }

    /// Persist the store if it changed. Returns whether a write happened.
    pub async fn finish(self, console: &mut dyn Console) -> Result<bool> {
        if !self.is_modified() {
            debug!(path = %self.path.display(), "store unchanged, not writing");
            return Ok(false);
        }

        write_store_file(&self.path, &StoreFile::from_store(&self.store)).await?;
        console.println(&format!("Changes written to {} successfully.", self.path.display()));
        Ok(true)
    }
}

fn reveal(secret: &SecretString) -> String {
    format!("The associated secret is: {}", secret.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::tests::ScriptedConsole;

    fn fast() -> Authenticator {
        Authenticator::new(HashScheme {
            memory_cost: 8,
            iterations: 1,
            parallelism: 1,
        })
    }

    async fn new_store(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("vault.json");
        let mut console = ScriptedConsole::new("master");
        run_new(&path, &fast(), &mut console).await.unwrap();
        path
    }

    async fn add(path: &Path, group: &str, key: &str, secret: &str) {
        let mut console = ScriptedConsole::new("master")
            .with_lines(&[key])
            .with_secrets(&[secret]);
        let mut session = Session::open(path, &fast(), &mut console).await.unwrap();
        session.add_groups(&[group.to_string()], &mut console).unwrap();
        assert!(session.finish(&mut console).await.unwrap());
    }

    #[tokio::test]
    async fn new_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;

        let mut console = ScriptedConsole::new("master");
        let err = run_new(&path, &fast(), &mut console).await.unwrap_err();
        assert!(matches!(err, StrongboxError::StoreFileExists(_)));
    }

    #[tokio::test]
    async fn add_then_extract() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;
        add(&path, "email", "work", "hunter2").await;

        let mut console = ScriptedConsole::new("master").with_lines(&["work"]);
        let session = Session::open(&path, &fast(), &mut console).await.unwrap();
        session.extract(&["email".to_string()], &mut console).unwrap();

        assert_eq!(console.printed(), "The associated secret is: hunter2");
        assert!(!session.finish(&mut console).await.unwrap());
    }

    #[tokio::test]
    async fn extract_retries_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;
        add(&path, "email", "work", "hunter2").await;

        let mut console = ScriptedConsole::new("master").with_lines(&["home", "work"]);
        let session = Session::open(&path, &fast(), &mut console).await.unwrap();
        session.extract(&["email".to_string()], &mut console).unwrap();

        assert_eq!(
            console.output,
            vec![
                "The key home does not exist in group email.",
                "Keys in email: work",
                "The associated secret is: hunter2",
            ]
        );
    }

    #[tokio::test]
    async fn extract_gives_up_when_input_ends() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;
        add(&path, "email", "work", "hunter2").await;

        let mut console = ScriptedConsole::new("master").with_lines(&["home"]);
        let session = Session::open(&path, &fast(), &mut console).await.unwrap();
        let err = session
            .extract(&["email".to_string()], &mut console)
            .unwrap_err();
        assert!(matches!(err, StrongboxError::Prompt(_)));
    }

    #[tokio::test]
    async fn replace_persists_new_secret() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;
        add(&path, "email", "work", "hunter2").await;

        let mut console = ScriptedConsole::new("master").with_secrets(&["hunter3"]);
        let mut session = Session::open(&path, &fast(), &mut console).await.unwrap();
        session.replace("email", "work", &mut console).unwrap();
        assert!(session.finish(&mut console).await.unwrap());

        let mut console = ScriptedConsole::new("master");
        let session = Session::open(&path, &fast(), &mut console).await.unwrap();
        assert_eq!(
            session.store.unlock("email", "work").unwrap().expose_secret(),
            "hunter3"
        );
    }

    #[tokio::test]
    async fn replace_unknown_key_prompts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;
        add(&path, "email", "work", "hunter2").await;

        let mut console = ScriptedConsole::new("master");
        let mut session = Session::open(&path, &fast(), &mut console).await.unwrap();
        let err = session.replace("email", "home", &mut console).unwrap_err();

        assert!(matches!(err, StrongboxError::KeyNotFound { .. }));
        assert!(!session.is_modified());
    }

    #[tokio::test]
    async fn adding_existing_group_fails_before_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;
        add(&path, "email", "work", "hunter2").await;

        let mut console = ScriptedConsole::new("master");
        let mut session = Session::open(&path, &fast(), &mut console).await.unwrap();
        let err = session
            .add_groups(&["email".to_string()], &mut console)
            .unwrap_err();
        assert!(matches!(err, StrongboxError::GroupAlreadyExists(_)));
    }

    #[tokio::test]
    async fn list_renders_selected_groups() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;
        add(&path, "email", "work", "hunter2").await;
        add(&path, "wifi", "home", "pass").await;

        let mut console = ScriptedConsole::new("master");
        let session = Session::open(&path, &fast(), &mut console).await.unwrap();
        session.list(&["wifi".to_string()], &mut console).unwrap();

        let expected = format!("{}\n|-- wifi\n     |-- home", path.display());
        assert_eq!(console.printed(), expected);
    }

    #[tokio::test]
    async fn list_unknown_group_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;

        let mut console = ScriptedConsole::new("master");
        let session = Session::open(&path, &fast(), &mut console).await.unwrap();
        let err = session
            .list(&["nope".to_string()], &mut console)
            .unwrap_err();
        assert!(matches!(err, StrongboxError::GroupNotFound(_)));
    }

    #[tokio::test]
    async fn wrong_master_key_does_not_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;

        let mut console = ScriptedConsole::new("guess");
        let err = Session::open(&path, &fast(), &mut console)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StrongboxError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn execute_dispatches_new_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.json");
        let mut config = StrongboxConfig::default();
        config.auth.kdf_memory_cost = 8;
        config.auth.kdf_iterations = 1;

        let cli = <Cli as clap::Parser>::try_parse_from([
            "strongbox",
            "new",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let mut console = ScriptedConsole::new("master");
        execute(cli, &config, &mut console).await.unwrap();
        assert!(path.exists());

        let cli = <Cli as clap::Parser>::try_parse_from([
            "strongbox",
            "--store",
            path.to_str().unwrap(),
            "list",
        ])
        .unwrap();
        let mut console = ScriptedConsole::new("master");
        execute(cli, &config, &mut console).await.unwrap();
        assert_eq!(console.printed(), path.display().to_string());
    }

    #[tokio::test]
    async fn execute_add_then_extract_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_store(&dir).await;
        let mut config = StrongboxConfig::default();
        config.auth.kdf_memory_cost = 8;
        config.auth.kdf_iterations = 1;
        let store_arg = path.to_str().unwrap();

        let cli =
            <Cli as clap::Parser>::try_parse_from(["strongbox", "--store", store_arg, "add", "mail"])
                .unwrap();
        let mut console = ScriptedConsole::new("master")
            .with_lines(&["work"])
            .with_secrets(&["hunter2"]);
        execute(cli, &config, &mut console).await.unwrap();
        assert!(console.printed().contains("Changes written to"));

        let cli =
            <Cli as clap::Parser>::try_parse_from(["strongbox", "--store", store_arg, "extract", "mail"])
                .unwrap();
        let mut console = ScriptedConsole::new("master").with_lines(&["work"]);
        execute(cli, &config, &mut console).await.unwrap();
        assert_eq!(console.printed(), "The associated secret is: hunter2");
    }
}
