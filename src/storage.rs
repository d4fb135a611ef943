//! Document Storage
//!
//! Whole-document persistence for the governance and audit JSON documents.
//! The engine and the audit logger never touch the filesystem directly; they
//! go through a `Store` so tests can run fully in memory.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::GovernanceError;

/// Load/save seam for a persisted document.
///
/// `load` returns `None` when no document has been persisted yet. A document
/// that exists but cannot be parsed is a fatal `MalformedStorage` error —
/// existing entries are never silently discarded in favor of a fresh state.
pub trait Store<T> {
    fn load(&self) -> Result<Option<T>, GovernanceError>;
    fn save(&mut self, value: &T) -> Result<(), GovernanceError>;
}

/// JSON file adapter: synchronous read-modify-write of the entire document.
/// Single-writer use only; the CI workflow invokes one check at a time.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> Store<T> for JsonFileStore<T> {
    fn load(&self) -> Result<Option<T>, GovernanceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            GovernanceError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let value = serde_json::from_str(&content).map_err(|e| {
            GovernanceError::MalformedStorage(format!("{}: {}", self.path.display(), e))
        })?;

        debug!("Loaded document from {}", self.path.display());
        Ok(Some(value))
    }

    fn save(&mut self, value: &T) -> Result<(), GovernanceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GovernanceError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&self.path, json).map_err(|e| {
            GovernanceError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        debug!("Persisted document to {}", self.path.display());
        Ok(())
    }
}

/// In-memory adapter with the same semantics, for unit tests.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    value: Option<T>,
}

impl<T> MemoryStore<T> {
    pub fn empty() -> Self {
        Self { value: None }
    }

    pub fn seeded(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    fn load(&self) -> Result<Option<T>, GovernanceError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &T) -> Result<(), GovernanceError> {
        self.value = Some(value.clone());
        Ok(())
    }
}
