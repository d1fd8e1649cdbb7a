// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading and writing store files.
//!
//! Writes go to an owner-only sibling `<name>.tmp` file that is renamed over
//! the target, so a crash never leaves a half-written store behind.

use std::path::{Path, PathBuf};

use strongbox_core::{Result, StrongboxError};
use tokio::io::AsyncWriteExt as _;
use tracing::{debug, info};

use crate::record::StoreFile;

/// Read and parse the store file at `path`.
pub async fn read_store_file(path: &Path) -> Result<StoreFile> {
    let json = tokio::fs::read_to_string(path).await?;
    let file = StoreFile::from_json(&path.display().to_string(), &json)?;
    debug!(path = %path.display(), groups = file.data.len(), "store file read");
    Ok(file)
}

/// Atomically replace the store file at `path`.
pub async fn write_store_file(path: &Path, file: &StoreFile) -> Result<()> {
    write_atomic(path, file.to_json()?.as_bytes()).await?;
    info!(path = %path.display(), "store file written");
    Ok(())
}

/// Write a new store file, refusing to overwrite an existing one.
pub async fn create_store_file(path: &Path, file: &StoreFile) -> Result<()> {
    if tokio::fs::try_exists(path).await? {
        return Err(StrongboxError::StoreFileExists(path.to_path_buf()));
    }
    write_store_file(path, file).await
}

/// `<path>.tmp`, next to `path` and never equal to it.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut f = options.open(&tmp).await?;
        // A stale tmp file keeps its old mode; tighten it before any bytes land.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            f.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
        }
        f.write_all(bytes).await?;
        f.flush().await?;
        f.sync_all().await?;
    }
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
