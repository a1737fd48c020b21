#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use sterdiary_core::{
    config::{AppSettings, ConfigManager},
    domain::{Entry, EntryMode},
    navigation::PanelBoard,
    session::DiarySession,
    storage::{JsonEntryStore, MemoryStore},
    wizard::EntryDraft,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub type MemorySession = DiarySession<MemoryStore, PanelBoard>;

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Started session over an in-memory store and a recording compositor.
pub fn memory_session(store: MemoryStore, settings: AppSettings) -> MemorySession {
    let mut session = DiarySession::new(store, PanelBoard::new(), settings);
    session.start().expect("start session");
    session
}

/// JSON store and config manager sharing one isolated base directory.
pub fn setup_file_env() -> (JsonEntryStore, ConfigManager, PathBuf) {
    let base = temp_base();
    let store = JsonEntryStore::open(Some(base.clone())).expect("open json store");
    let config = ConfigManager::with_base_dir(base.clone()).expect("create config manager");
    (store, config, base)
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn draft() -> EntryDraft {
    EntryDraft::at(day(2024, 3, 12), clock(19, 45))
}

pub fn stored_entry(id: u64, date: NaiveDate, situation: EntryMode, score: &str) -> Entry {
    Entry {
        id,
        date,
        time: clock(8, 0),
        situation: situation.situation().into(),
        discomfort_before: score.into(),
        thoughts: String::new(),
        feelings: String::new(),
        actions: String::new(),
        distortions: String::new(),
        emotions: Vec::new(),
    }
}
