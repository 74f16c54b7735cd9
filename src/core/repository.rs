//! Dream storage
//!
//! The analyzer never touches storage: callers read a list from a
//! `DreamRepository` and hand it over. Lists come back newest-first by
//! insertion, new entries are prepended.

use std::path::{Path, PathBuf};

use crate::core::journal::sample_entries;
use crate::types::DreamEntry;
use crate::{Error, Result};

/// Create/read/update/list over journal entries
pub trait DreamRepository: Send + Sync {
    /// Store a new entry. Fails on a duplicate id.
    fn create(&mut self, entry: DreamEntry) -> Result<DreamEntry>;

    /// Fetch by id
    fn get(&self, id: &str) -> Result<Option<DreamEntry>>;

    /// Replace an existing entry (matched by id). Fails if unknown.
    fn update(&mut self, entry: DreamEntry) -> Result<DreamEntry>;

    /// All entries, most recently inserted first
    fn list(&self) -> Result<Vec<DreamEntry>>;

    /// Entries owned by `user_id`
    fn list_owned(&self, user_id: &str) -> Result<Vec<DreamEntry>> {
        Ok(self.list()?.into_iter().filter(|e| e.is_owned_by(user_id)).collect())
    }

    /// Number of stored entries
    fn len(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Entries held in memory only
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    entries: Vec<DreamEntry>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing entries (kept in the given order)
    pub fn with_entries(entries: Vec<DreamEntry>) -> Self {
        Self { entries }
    }

    /// Start with the sample dreams
    pub fn seeded() -> Self {
        Self::with_entries(sample_entries())
    }
}

impl DreamRepository for InMemoryRepository {
    fn create(&mut self, entry: DreamEntry) -> Result<DreamEntry> {
        insert(&mut self.entries, entry)
    }

    fn get(&self, id: &str) -> Result<Option<DreamEntry>> {
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }

    fn update(&mut self, entry: DreamEntry) -> Result<DreamEntry> {
        replace(&mut self.entries, entry)
    }

    fn list(&self) -> Result<Vec<DreamEntry>> {
        Ok(self.entries.clone())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.entries.len())
    }
}

/// Entries persisted as a JSON array; the file is rewritten on every change
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    entries: Vec<DreamEntry>,
}

impl JsonFileRepository {
    /// Open the store. A missing file starts empty, or with the sample
    /// dreams when `seed` is set (written out immediately).
    pub fn open(path: impl AsRef<Path>, seed: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            let repo = Self {
                path,
                entries: if seed { sample_entries() } else { Vec::new() },
            };
            if seed {
                repo.persist()?;
            }
            tracing::info!(path = %repo.path.display(), seeded = seed, "created dream store");
            return Ok(repo);
        }

        let json = std::fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let entries: Vec<DreamEntry> = if json.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&json).map_err(|source| Error::Json {
                path: path.clone(),
                source,
            })?
        };

        tracing::info!(path = %path.display(), dreams = entries.len(), "loaded dream store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(Error::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Staged beside the store, then renamed over it
        let staging = self.staging_path();
        std::fs::write(&staging, json).map_err(|source| Error::Io {
            path: staging.clone(),
            source,
        })?;
        std::fs::rename(&staging, &self.path).map_err(|source| {
            let _ = std::fs::remove_file(&staging);
            Error::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::debug!(path = %self.path.display(), dreams = self.entries.len(), "dream store written");
        Ok(())
    }
}

impl DreamRepository for JsonFileRepository {
    fn create(&mut self, entry: DreamEntry) -> Result<DreamEntry> {
        let created = insert(&mut self.entries, entry)?;
        if let Err(err) = self.persist() {
            self.entries.retain(|e| e.id != created.id);
            return Err(err);
        }
        Ok(created)
    }

    fn get(&self, id: &str) -> Result<Option<DreamEntry>> {
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }

    fn update(&mut self, entry: DreamEntry) -> Result<DreamEntry> {
        let previous = self
            .entries
            .iter()
            .find(|e| e.id == entry.id)
            .cloned()
            .ok_or_else(|| Error::NotFound(entry.id.clone()))?;
        let updated = replace(&mut self.entries, entry)?;
        if let Err(err) = self.persist() {
            replace(&mut self.entries, previous)?;
            return Err(err);
        }
        Ok(updated)
    }

    fn list(&self) -> Result<Vec<DreamEntry>> {
        Ok(self.entries.clone())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.entries.len())
    }
}

fn insert(entries: &mut Vec<DreamEntry>, entry: DreamEntry) -> Result<DreamEntry> {
    if entries.iter().any(|e| e.id == entry.id) {
        return Err(Error::DuplicateId(entry.id));
    }
    entries.insert(0, entry.clone());
    Ok(entry)
}

fn replace(entries: &mut [DreamEntry], entry: DreamEntry) -> Result<DreamEntry> {
    let slot = entries
        .iter_mut()
        .find(|e| e.id == entry.id)
        .ok_or_else(|| Error::NotFound(entry.id.clone()))?;
    *slot = entry.clone();
    Ok(entry)
}

// =============================================================================
// TESTS
// =============================================================================
