pub mod json_backend;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::domain::{default_emotions, parse_score, Entry, Tag};
use crate::errors::{DiaryError, Result};

pub use json_backend::JsonEntryStore;
pub use memory::MemoryStore;

/// Persistence contract for diary entries and the emotion vocabulary.
///
/// `save` distinguishes a structural rejection (`Ok(false)`) from an I/O
/// failure (`Err`). Callers treat the former as a recoverable user notice.
pub trait EntryStore {
    /// Highest id in the store, `0` when empty.
    fn max_id(&self) -> Result<u64>;
    fn save(&mut self, entry: &Entry, emotions: &[Tag]) -> Result<bool>;
    fn update(&mut self, entry: &Entry, emotions: &[Tag]) -> Result<()>;
    fn delete(&mut self, entry: &Entry) -> Result<()>;
    fn entry(&self, id: u64) -> Result<Option<Entry>>;
    /// Newest first.
    fn all_entries(&self) -> Result<Vec<Entry>>;
    fn emotions_for_entry(&self, id: u64) -> Result<Vec<Tag>>;
    fn all_tags(&self) -> Result<Vec<Tag>>;
    fn add_tag(&mut self, tag: Tag) -> Result<bool>;
    fn remove_tag(&mut self, name: &str) -> Result<bool>;
}

/// Serializable snapshot shared by the store implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryData {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default = "default_emotions")]
    pub tags: Vec<Tag>,
}

impl Default for DiaryData {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            tags: default_emotions(),
        }
    }
}

impl DiaryData {
    pub fn max_id(&self) -> u64 {
        self.entries.iter().map(|entry| entry.id).max().unwrap_or(0)
    }

    /// Why an entry cannot be stored, if anything is structurally wrong.
    pub fn structural_problem(&self, entry: &Entry) -> Option<String> {
        if entry.id == 0 {
            return Some("entry id must be positive".into());
        }
        if entry.situation.trim().is_empty() {
            return Some("situation is required".into());
        }
        if parse_score(&entry.discomfort_before).is_none() {
            return Some(format!(
                "discomfort score `{}` is not a percentage",
                entry.discomfort_before
            ));
        }
        None
    }

    pub fn insert(&mut self, entry: &Entry, emotions: &[Tag]) -> bool {
        if let Some(problem) = self.structural_problem(entry) {
            tracing::warn!(id = entry.id, %problem, "entry rejected by store");
            return false;
        }
        if self.entries.iter().any(|existing| existing.id == entry.id) {
            tracing::warn!(id = entry.id, "entry rejected by store: duplicate id");
            return false;
        }
        let mut stored = entry.clone();
        stored.emotions = emotion_names(emotions);
        self.entries.push(stored);
        true
    }

    pub fn replace(&mut self, entry: &Entry, emotions: &[Tag]) -> Result<()> {
        if let Some(problem) = self.structural_problem(entry) {
            return Err(DiaryError::PersistenceRejected(problem));
        }
        let slot = self
            .entries
            .iter_mut()
            .find(|existing| existing.id == entry.id)
            .ok_or_else(|| DiaryError::NotFound(format!("entry {}", entry.id)))?;
        *slot = entry.clone();
        slot.emotions = emotion_names(emotions);
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            Err(DiaryError::NotFound(format!("entry {}", id)))
        } else {
            Ok(())
        }
    }

    pub fn find(&self, id: u64) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn sorted_entries(&self) -> Vec<Entry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| (b.date, b.time, b.id).cmp(&(a.date, a.time, a.id)));
        entries
    }

    /// Emotions of an entry in their stored order; names no longer in the
    /// vocabulary are still returned.
    pub fn emotions_of(&self, id: u64) -> Result<Vec<Tag>> {
        let entry = self
            .find(id)
            .ok_or_else(|| DiaryError::NotFound(format!("entry {}", id)))?;
        Ok(entry.emotions.iter().map(Tag::new).collect())
    }

    pub fn add_tag(&mut self, tag: Tag) -> Result<bool> {
        if tag.name.is_empty() {
            return Err(DiaryError::InvalidInput("emotion name is required".into()));
        }
        if self.tags.iter().any(|existing| existing.same_as(&tag.name)) {
            return Ok(false);
        }
        self.tags.push(tag);
        Ok(true)
    }

    pub fn remove_tag(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|tag| !tag.same_as(name));
        self.tags.len() != before
    }
}

fn emotion_names(emotions: &[Tag]) -> Vec<String> {
    emotions.iter().map(|tag| tag.name.clone()).collect()
}
