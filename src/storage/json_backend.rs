use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{tmp_path, write_atomic},
    domain::{Entry, Tag},
    errors::Result,
    utils::paths::{ensure_dir, PathResolver},
};

use super::{DiaryData, EntryStore};

/// File-backed store keeping every entry and the vocabulary in one JSON
/// document. Every mutation rewrites the document atomically.
#[derive(Debug, Clone)]
pub struct JsonEntryStore {
    path: PathBuf,
    data: DiaryData,
}

impl JsonEntryStore {
    pub fn open(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        ensure_dir(&base)?;
        Self::open_file(PathResolver::entries_file_in(&base))
    }

    pub fn open_file(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            DiaryData::default()
        };
        tracing::debug!(path = %path.display(), entries = data.entries.len(), "entry store opened");
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Applies `change` and writes the document; restores the previous
    /// snapshot if the write fails.
    fn commit<T>(&mut self, change: impl FnOnce(&mut DiaryData) -> Result<T>) -> Result<T> {
        let snapshot = self.data.clone();
        let outcome = change(&mut self.data)?;
        if let Err(err) = self.persist() {
            self.data = snapshot;
            return Err(err);
        }
        Ok(outcome)
    }
}

impl EntryStore for JsonEntryStore {
    fn max_id(&self) -> Result<u64> {
        Ok(self.data.max_id())
    }

    fn save(&mut self, entry: &Entry, emotions: &[Tag]) -> Result<bool> {
        let mut staged = self.data.clone();
        if !staged.insert(entry, emotions) {
            return Ok(false);
        }
        let previous = std::mem::replace(&mut self.data, staged);
        if let Err(err) = self.persist() {
            self.data = previous;
            return Err(err);
        }
        Ok(true)
    }

    fn update(&mut self, entry: &Entry, emotions: &[Tag]) -> Result<()> {
        self.commit(|data| data.replace(entry, emotions))
    }

    fn delete(&mut self, entry: &Entry) -> Result<()> {
        self.commit(|data| data.remove(entry.id))
    }

    fn entry(&self, id: u64) -> Result<Option<Entry>> {
        Ok(self.data.find(id).cloned())
    }

    fn all_entries(&self) -> Result<Vec<Entry>> {
        Ok(self.data.sorted_entries())
    }

    fn emotions_for_entry(&self, id: u64) -> Result<Vec<Tag>> {
        self.data.emotions_of(id)
    }

    fn all_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.data.tags.clone())
    }

    fn add_tag(&mut self, tag: Tag) -> Result<bool> {
        self.commit(|data| data.add_tag(tag))
    }

    fn remove_tag(&mut self, name: &str) -> Result<bool> {
        self.commit(|data| Ok(data.remove_tag(name)))
    }
}
