//! Collection Document Store
//!
//! Loads the collection once at start and saves it after every change.
//! A stored value that fails to decode is copied aside under
//! `{key}.corrupt` (or the next free `{key}.corrupt.N`) and the session
//! starts from the default seed. A document that cannot be read at all, or
//! cannot be copied aside, is left untouched.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::slot::KeyValueSlot;
use crate::domain::{Collection, DomainError, DomainResult};

pub const DEFAULT_STORAGE_KEY: &str = "foodLists";

/// Backup keys tried before giving up on keeping a corrupt copy
const MAX_CORRUPT_COPIES: usize = 100;

/// Where a loaded collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    /// Nothing stored yet
    Seeded,
    /// The stored document was corrupt and has been copied aside
    Recovered,
    /// The stored document could not be read or backed up. It must not be
    /// overwritten.
    Unavailable,
}

impl LoadSource {
    /// Whether the seed should be saved right away
    pub fn needs_initial_save(self) -> bool {
        matches!(self, LoadSource::Seeded | LoadSource::Recovered)
    }

    /// Whether later changes may be written over the stored document
    pub fn is_writable(self) -> bool {
        self != LoadSource::Unavailable
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub collection: Collection,
    pub source: LoadSource,
}

impl Loaded {
    fn seed(source: LoadSource) -> Self {
        Self {
            collection: Collection::defaults(),
            source,
        }
    }
}

#[derive(Clone)]
pub struct DocumentStore {
    slot: Arc<dyn KeyValueSlot>,
    key: String,
}

impl DocumentStore {
    pub fn new(slot: Arc<dyn KeyValueSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Never fails: anything short of a parsed document yields the seed.
    pub async fn load(&self) -> Loaded {
        let raw = match self.slot.read(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored collection, using defaults");
                return Loaded::seed(LoadSource::Seeded);
            }
            Err(DomainError::Corrupt(reason)) => {
                warn!(key = %self.key, reason = %reason, "stored collection is not text, using defaults");
                return self.quarantine().await;
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to read stored collection, using defaults without saving");
                return Loaded::seed(LoadSource::Unavailable);
            }
        };

        match serde_json::from_str::<Collection>(&raw) {
            Ok(collection) => Loaded {
                collection,
                source: LoadSource::Stored,
            },
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored collection is corrupt, using defaults");
                self.quarantine().await
            }
        }
    }

    /// Copy the corrupt document aside. Without a copy the original stays
    /// where it is and the seed is never saved over it.
    async fn quarantine(&self) -> Loaded {
        match self.backup_corrupt().await {
            Ok(backup) => {
                warn!(key = %self.key, backup = %backup, "kept a copy of the corrupt collection");
                Loaded::seed(LoadSource::Recovered)
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to keep a copy of the corrupt collection, leaving it in place");
                Loaded::seed(LoadSource::Unavailable)
            }
        }
    }

    async fn backup_corrupt(&self) -> DomainResult<String> {
        let backup = self.free_corrupt_key().await?;
        self.slot.copy(&self.key, &backup).await?;
        Ok(backup)
    }

    /// First backup key that holds nothing, so earlier copies survive
    async fn free_corrupt_key(&self) -> DomainResult<String> {
        let base = format!("{}.corrupt", self.key);
        for n in 0..MAX_CORRUPT_COPIES {
            let candidate = if n == 0 { base.clone() } else { format!("{}.{}", base, n) };
            if let Ok(None) = self.slot.read(&candidate).await {
                return Ok(candidate);
            }
        }
        Err(DomainError::Storage(format!("no free backup key for {}", self.key)))
    }

    pub async fn save(&self, collection: &Collection) -> DomainResult<()> {
        let json = serde_json::to_string(collection).map_err(|e| DomainError::Storage(e.to_string()))?;
        self.slot.write(&self.key, &json).await
    }
}
