//! Key-Value Slots
//!
//! The abstract storage seam the document store writes through.
//! Implementations can use files, memory, browser storage, etc.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Durable string slots addressed by key
#[async_trait]
pub trait KeyValueSlot: Send + Sync {
    /// Stored value, or `None` if the key was never written
    async fn read(&self, key: &str) -> DomainResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn write(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Copy the value under `from` to `to` as stored, even if it does not
    /// read back as text
    async fn copy(&self, from: &str, to: &str) -> DomainResult<()> {
        let value = self
            .read(from)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("storage key {}", from)))?;
        self.write(to, &value).await
    }
}

/// One JSON file per key inside a directory
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> DomainResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(DomainError::Validation(format!("unusable storage key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    async fn ensure_dir(&self) -> DomainResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::Storage(format!("create {}: {}", self.dir.display(), e)))
    }

    /// Swap a fully written staging file into place
    async fn commit_staged(staging: &Path, path: &Path) -> DomainResult<()> {
        if let Err(e) = tokio::fs::rename(staging, path).await {
            let _ = tokio::fs::remove_file(staging).await;
            return Err(DomainError::Storage(format!("rename {}: {}", path.display(), e)));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueSlot for FileSlot {
    async fn read(&self, key: &str) -> DomainResult<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::Storage(format!("read {}: {}", path.display(), e))),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| DomainError::Corrupt(format!("{}: {}", path.display(), e)))
    }

    async fn write(&self, key: &str, value: &str) -> DomainResult<()> {
        let path = self.path_for(key)?;
        self.ensure_dir().await?;

        // Write beside the target, then swap it in
        let staging = path.with_extension("json.tmp");
        if let Err(e) = tokio::fs::write(&staging, value).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(DomainError::Storage(format!("write {}: {}", staging.display(), e)));
        }
        Self::commit_staged(&staging, &path).await
    }

    async fn copy(&self, from: &str, to: &str) -> DomainResult<()> {
        let source = self.path_for(from)?;
        let path = self.path_for(to)?;
        self.ensure_dir().await?;

        let staging = path.with_extension("json.tmp");
        if let Err(e) = tokio::fs::copy(&source, &staging).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(DomainError::Storage(format!("copy {}: {}", source.display(), e)));
        }
        Self::commit_staged(&staging, &path).await
    }
}

/// In-process slot, for tests and shells without durable storage
#[derive(Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueSlot for MemorySlot {
    async fn read(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
