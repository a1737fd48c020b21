//! Archive listing and search over stored entries.

use chrono::Datelike;

use crate::domain::{Entry, MoodBand};

/// One row of the archive list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveItem {
    /// Month heading such as "March 2024".
    Divider(String),
    Row(ArchiveRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRow {
    pub id: u64,
    pub date: String,
    pub time: String,
    pub situation: String,
    pub mood: MoodBand,
}

impl From<&Entry> for ArchiveRow {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            date: entry.display_date(),
            time: entry.display_time(),
            situation: entry.situation.clone(),
            mood: entry.mood_band(),
        }
    }
}

/// Entries in the given order with a divider before each new month.
pub fn archive_items(entries: &[Entry]) -> Vec<ArchiveItem> {
    let mut items = Vec::with_capacity(entries.len());
    let mut current_month = None;
    for entry in entries {
        let month = (entry.date.year(), entry.date.month());
        if current_month != Some(month) {
            current_month = Some(month);
            items.push(ArchiveItem::Divider(entry.date.format("%B %Y").to_string()));
        }
        items.push(ArchiveItem::Row(ArchiveRow::from(entry)));
    }
    items
}

/// Case-insensitive match on situation, reflection and emotion names. A blank
/// query matches everything.
pub fn search<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| {
            entry.situation.to_lowercase().contains(&needle)
                || entry.feelings.to_lowercase().contains(&needle)
                || entry
                    .emotions
                    .iter()
                    .any(|emotion| emotion.to_lowercase().contains(&needle))
        })
        .collect()
}
