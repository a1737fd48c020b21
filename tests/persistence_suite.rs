mod common;

use std::fs;

use common::{day, setup_file_env, stored_entry};
use sterdiary_core::{
    config::{AppSettings, Theme},
    domain::{EntryMode, Tag},
    navigation::PanelBoard,
    session::DiarySession,
    storage::{EntryStore, JsonEntryStore},
};

#[test]
fn session_entries_survive_a_reopen() {
    let (store, config, base) = setup_file_env();
    let mut session =
        DiarySession::new(store, PanelBoard::new(), config.load().unwrap()).with_config(config);
    session.start().unwrap();
    session.open_new_entry().unwrap();
    session.select_mode(EntryMode::Day).unwrap();
    {
        let draft = session.draft_mut().unwrap();
        draft.set_discomfort(76).unwrap();
        draft.toggle_emotion("Gratitude").unwrap();
        draft.toggle_factor("Family").unwrap();
    }
    while session.wizard_next().unwrap() {}
    let saved = session.finish_entry().unwrap().expect("entry saved");

    let reopened = JsonEntryStore::open(Some(base)).unwrap();
    let loaded = reopened.entry(saved.id).unwrap().expect("entry on disk");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.discomfort_before, "76%");
    assert_eq!(
        reopened.emotions_for_entry(saved.id).unwrap(),
        vec![Tag::new("Gratitude")]
    );
}

#[test]
fn settings_are_written_only_on_save() {
    let (store, config, _base) = setup_file_env();
    let path = config.path().to_path_buf();
    let mut session =
        DiarySession::new(store, PanelBoard::new(), AppSettings::default()).with_config(config);
    session.start().unwrap();

    session.update_settings(|settings| {
        settings.theme = Theme::Dark;
        settings.set_nickname("Ada");
    });
    assert!(!path.exists());

    session.save_settings().unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    let stored: AppSettings = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.theme, Theme::Dark);
    assert_eq!(stored.nickname, "Ada");
}

#[test]
fn pin_setup_is_persisted() {
    let (store, config, base) = setup_file_env();
    let mut session =
        DiarySession::new(store, PanelBoard::new(), AppSettings::default()).with_config(config);
    session.start().unwrap();
    session.open_settings().unwrap();
    session.open_pin_setup().unwrap();
    assert!(session.enter_pin("9012").unwrap());

    let reloaded = sterdiary_core::config::ConfigManager::with_base_dir(base)
        .unwrap()
        .load()
        .unwrap();
    assert!(reloaded.pin_matches("9012"));
}

#[test]
fn failed_write_keeps_the_previous_document() {
    let (mut store, _config, _base) = setup_file_env();
    store
        .save(&stored_entry(1, day(2024, 6, 1), EntryMode::Day, "10%"), &[])
        .unwrap();
    let original = fs::read_to_string(store.path()).unwrap();

    let mut tmp = store.path().to_path_buf();
    tmp.set_extension("json.tmp");
    fs::create_dir_all(&tmp).unwrap();

    let second = stored_entry(2, day(2024, 6, 2), EntryMode::Moment, "20%");
    assert!(store.save(&second, &[]).is_err());
    assert_eq!(store.max_id().unwrap(), 1);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), original);
}

#[test]
fn vocabulary_changes_are_stored() {
    let (mut store, _config, base) = setup_file_env();
    assert!(store.add_tag(Tag::new("Wonder")).unwrap());
    assert!(!store.add_tag(Tag::new("wonder")).unwrap());
    assert!(store.remove_tag("Envy").unwrap());

    let reopened = JsonEntryStore::open(Some(base)).unwrap();
    let tags = reopened.all_tags().unwrap();
    assert!(tags.iter().any(|tag| tag.same_as("Wonder")));
    assert!(!tags.iter().any(|tag| tag.same_as("Envy")));
}
