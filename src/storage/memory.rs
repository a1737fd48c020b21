use crate::domain::{Entry, Tag};
use crate::errors::Result;

use super::{DiaryData, EntryStore};

/// Volatile store, seeded with the default emotion vocabulary.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: DiaryData,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            data: DiaryData {
                entries,
                ..DiaryData::default()
            },
            read_only: false,
        }
    }

    /// While read-only every `save` is rejected.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn len(&self) -> usize {
        self.data.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }
}

impl EntryStore for MemoryStore {
    fn max_id(&self) -> Result<u64> {
        Ok(self.data.max_id())
    }

    fn save(&mut self, entry: &Entry, emotions: &[Tag]) -> Result<bool> {
        if self.read_only {
            tracing::warn!(id = entry.id, "entry rejected by store: read-only");
            return Ok(false);
        }
        Ok(self.data.insert(entry, emotions))
    }

    fn update(&mut self, entry: &Entry, emotions: &[Tag]) -> Result<()> {
        self.data.replace(entry, emotions)
    }

    fn delete(&mut self, entry: &Entry) -> Result<()> {
        self.data.remove(entry.id)
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
        self.data.add_tag(tag)
    }

    fn remove_tag(&mut self, name: &str) -> Result<bool> {
        Ok(self.data.remove_tag(name))
    }
}
