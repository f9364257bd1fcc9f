use std::collections::BTreeMap;

use crate::core::{FsError, NormalizedPath, Result};
use crate::vfs::Entry;

/// Owns every entry of a file system, keyed by normalized path.
///
/// The store never touches timestamps; callers decide what an operation means for them.
#[derive(Debug, Default, Clone)]
pub struct Store {
    entries: BTreeMap<NormalizedPath, Entry>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, key: &NormalizedPath) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &NormalizedPath) -> Result<&Entry> {
        self.entries
            .get(key)
            .ok_or_else(|| FsError::NotFound(key.to_string()).into())
    }

    pub fn get_mut(&mut self, key: &NormalizedPath) -> Result<&mut Entry> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| FsError::NotFound(key.to_string()).into())
    }

    /// Inserts `entry`, replacing any entry stored under `key`.
    pub fn set(&mut self, key: NormalizedPath, entry: Entry) {
        self.entries.insert(key, entry);
    }

    pub fn remove(&mut self, key: &NormalizedPath) -> Result<Entry> {
        self.entries
            .remove(key)
            .ok_or_else(|| FsError::NotFound(key.to_string()).into())
    }

    /// Moves the entry under `old` to `new`.
    ///
    /// Fails without changing anything when `old` is absent, or when `new` is taken and
    /// `overwrite` is false. Rekeying an entry onto itself succeeds and changes nothing.
    pub fn rekey(
        &mut self,
        old: &NormalizedPath,
        new: NormalizedPath,
        overwrite: bool,
    ) -> Result<()> {
        if !self.exists(old) {
            return Err(FsError::NotFound(old.to_string()).into());
        }
        if *old == new {
            return Ok(());
        }
        if !overwrite && self.exists(&new) {
            return Err(FsError::AlreadyExists(new.to_string()).into());
        }
        if let Some(entry) = self.entries.remove(old) {
            self.entries.insert(new, entry);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.entries.keys()
    }
}
