mod common;

use common::{day, memory_session, stored_entry};
use sterdiary_core::{
    archive::ArchiveItem,
    config::AppSettings,
    domain::{EntryMode, PanelId, ScreenId, TabId},
    navigation::BackOutcome,
    session::{Notice, PinMode},
    storage::{EntryStore, MemoryStore},
    wizard::{engine::REJECTED_NOTICE, SectionId},
    DiaryError,
};

fn seeded_store() -> MemoryStore {
    let mut first = stored_entry(1, day(2024, 2, 27), EntryMode::Day, "30%");
    first.feelings = "Quiet walk by the river".into();
    first.emotions = vec!["Calm".into()];
    let mut second = stored_entry(2, day(2024, 3, 4), EntryMode::Moment, "80%");
    second.feelings = "Deadline panic".into();
    second.emotions = vec!["Anxiety".into()];
    MemoryStore::with_entries(vec![first, second])
}

#[test]
fn new_entry_flow_saves_and_returns_to_the_archive() {
    let mut session = memory_session(MemoryStore::new(), AppSettings::default());
    session.open_new_entry().unwrap();
    assert_eq!(session.current_screen(), Some(ScreenId::NewEntryWizard));
    assert!(!session.compositor().is_visible(PanelId::BottomBar));
    assert!(session
        .compositor()
        .is_visible(PanelId::Section(SectionId::ModeChoice)));

    assert!(session.select_mode(EntryMode::Moment).unwrap());
    session.draft_mut().unwrap().set_discomfort(35).unwrap();
    while session.wizard_next().unwrap() {}
    assert_eq!(
        session.compositor().title(PanelId::WizardTopBar),
        Some("New entry • 5/5")
    );

    let entry = session.finish_entry().unwrap().expect("entry saved");
    assert_eq!(entry.id, 1);
    assert_eq!(entry.discomfort_before, "35%");
    assert_eq!(session.current_screen(), Some(ScreenId::Archive));
    assert!(session.wizard().is_none());
    assert!(session.compositor().is_visible(PanelId::BottomBar));
    assert!(!session.compositor().is_visible(PanelId::WizardTopBar));
    assert!(!session
        .compositor()
        .is_visible(PanelId::Section(SectionId::Reflection)));
    assert_eq!(session.entries().unwrap().len(), 1);

    assert!(matches!(
        session.finish_entry(),
        Err(DiaryError::NavigationPrecondition(_))
    ));
    assert_eq!(session.entries().unwrap().len(), 1);
}

#[test]
fn rejected_finish_leaves_a_notice_and_the_wizard_open() {
    let mut store = MemoryStore::new();
    store.set_read_only(true);
    let mut session = memory_session(store, AppSettings::default());
    session.open_new_entry().unwrap();
    session.select_mode(EntryMode::Day).unwrap();
    while session.wizard_next().unwrap() {}

    assert!(session.finish_entry().unwrap().is_none());
    assert_eq!(session.take_notices(), vec![Notice(REJECTED_NOTICE.into())]);
    assert_eq!(session.current_screen(), Some(ScreenId::NewEntryWizard));
    let wizard = session.wizard().expect("wizard still open");
    assert!(wizard.is_last_step());
    assert_eq!(wizard.draft().mode(), Some(EntryMode::Day));

    session.store_mut().set_read_only(false);
    let entry = session.finish_entry().unwrap().expect("retry saves");
    assert_eq!(entry.id, 1);
}

#[test]
fn back_arrow_on_first_step_asks_before_leaving() {
    let mut session = memory_session(MemoryStore::new(), AppSettings::default());
    session.open_new_entry().unwrap();
    session.wizard_next().unwrap();
    assert!(session.wizard_back().unwrap());
    assert!(!session.leave_requested());

    assert!(!session.wizard_back().unwrap());
    assert!(session.leave_requested());
    session.cancel_leave_wizard();
    assert_eq!(session.current_screen(), Some(ScreenId::NewEntryWizard));

    session.request_leave_wizard().unwrap();
    assert_eq!(
        session.confirm_leave_wizard().unwrap(),
        BackOutcome::Restored(ScreenId::Archive)
    );
    assert!(session.wizard().is_none());
    assert!(session.store().is_empty());
}

#[test]
fn structure_toggles_shorten_the_wizard() {
    let mut settings = AppSettings::default();
    settings.structure.discomfort_level = false;
    let mut session = memory_session(MemoryStore::new(), settings);
    session.open_new_entry().unwrap();
    assert_eq!(session.wizard().unwrap().step_count(), 4);
    assert_eq!(session.wizard().unwrap().progress_percent(), 25);
}

#[test]
fn picker_adds_known_emotions_to_the_draft() {
    let mut session = memory_session(MemoryStore::new(), AppSettings::default());
    session.open_new_entry().unwrap();
    session.open_emotion_picker().unwrap();
    assert!(session.pick_emotion("joy").unwrap());
    assert!(!session.pick_emotion("Joy").unwrap());
    assert!(matches!(
        session.pick_emotion("Zest"),
        Err(DiaryError::InvalidInput(_))
    ));

    session.back().unwrap();
    assert!(session.compositor().is_visible(PanelId::WizardTopBar));
    let names: Vec<String> = session
        .wizard()
        .unwrap()
        .draft()
        .emotions()
        .iter()
        .map(|tag| tag.name.clone())
        .collect();
    assert_eq!(names, vec!["Joy".to_string()]);
}

#[test]
fn tabs_and_back_walk_the_stack() {
    let mut session = memory_session(MemoryStore::new(), AppSettings::default());
    session.open_tab(TabId::Statistics).unwrap();
    session.open_tab(TabId::Statistics).unwrap();
    assert_eq!(session.navigation().depth(), 2);

    session.open_settings().unwrap();
    assert!(session.compositor().is_visible(PanelId::SettingsTopBar));
    assert_eq!(
        session.back().unwrap(),
        BackOutcome::Restored(ScreenId::Statistics)
    );
    assert_eq!(
        session.back().unwrap(),
        BackOutcome::Restored(ScreenId::Archive)
    );
    assert_eq!(session.compositor().selected_tab(), Some(TabId::Archive));
    assert_eq!(session.back().unwrap(), BackOutcome::Exit);
    assert!(session.is_exited());
    assert!(session.open_tab(TabId::Archive).is_err());
}

#[test]
fn search_then_open_and_delete_an_entry() {
    let mut session = memory_session(seeded_store(), AppSettings::default());
    session.open_search().unwrap();
    let hits = session.search("river").unwrap();
    assert_eq!(hits.len(), 1);

    let entry = session.open_entry(hits[0].id).unwrap();
    assert_eq!(session.current_screen(), Some(ScreenId::NoteView));
    assert_eq!(
        session.compositor().title(PanelId::NoteViewTopBar),
        Some(entry.title().as_str())
    );

    let deleted = session.delete_open_entry().unwrap();
    assert_eq!(deleted.id, 1);
    assert_eq!(session.current_screen(), Some(ScreenId::Search));
    assert!(!session.compositor().is_visible(PanelId::MainTopBar));
    assert!(session.search("river").unwrap().is_empty());
    assert!(session.opened_entry().is_none());
}

#[test]
fn editing_updates_the_stored_entry() {
    let mut session = memory_session(seeded_store(), AppSettings::default());
    session.open_entry(2).unwrap();
    session.start_edit().unwrap();
    assert!(session.compositor().is_visible(PanelId::NoteEditTopBar));
    {
        let draft = session.edit_draft_mut().unwrap();
        draft.set_discomfort(45).unwrap();
        draft.toggle_factor("Work").unwrap();
    }
    session.set_edit_actions("Split the task into parts").unwrap();

    let updated = session.save_edit().unwrap();
    assert_eq!(updated.discomfort_before, "45%");
    assert_eq!(updated.distortions, "Work");
    assert_eq!(updated.feelings, "Deadline panic");
    assert_eq!(updated.actions, "Split the task into parts");
    assert_eq!(session.current_screen(), Some(ScreenId::NoteView));
    assert!(session.compositor().is_visible(PanelId::NoteViewTopBar));
    assert_eq!(session.store().entry(2).unwrap(), Some(updated));
}

#[test]
fn archive_groups_entries_by_month() {
    let session = memory_session(seeded_store(), AppSettings::default());
    let items = session.archive().unwrap();
    let dividers: Vec<&str> = items
        .iter()
        .filter_map(|item| match item {
            ArchiveItem::Divider(label) => Some(label.as_str()),
            ArchiveItem::Row(_) => None,
        })
        .collect();
    assert_eq!(dividers, vec!["March 2024", "February 2024"]);
    assert_eq!(items.len(), 4);
}

#[test]
fn pin_lock_and_setup() {
    let mut settings = AppSettings::default();
    settings.set_pin("2468").unwrap();
    let mut session = memory_session(MemoryStore::new(), settings);
    assert!(session.is_locked());
    assert!(session.open_new_entry().is_err());

    assert!(session.enter_pin("2468").unwrap());
    session.open_settings().unwrap();
    session.open_pin_setup().unwrap();
    assert_eq!(session.pin_mode(), Some(PinMode::Change));

    assert!(!session.enter_pin("12").unwrap());
    assert_eq!(session.current_screen(), Some(ScreenId::PinEntry));
    session.take_notices();

    assert!(session.enter_pin("1357").unwrap());
    assert_eq!(session.current_screen(), Some(ScreenId::Settings));
    assert!(session.compositor().is_visible(PanelId::SettingsTopBar));
    assert!(session.settings().pin_matches("1357"));

    session.remove_pin().unwrap();
    assert!(!session.settings().has_pin());
}

#[test]
fn back_after_unlock_exits() {
    let mut settings = AppSettings::default();
    settings.set_pin("2468").unwrap();
    let mut session = memory_session(MemoryStore::new(), settings);
    session.enter_pin("2468").unwrap();
    assert_eq!(session.navigation().stack().as_slice(), &[ScreenId::Archive]);

    assert_eq!(session.back().unwrap(), BackOutcome::Exit);
    assert!(session.is_exited());
    assert!(!session.is_locked());
}

#[test]
fn back_through_tabs_after_unlock_skips_the_lock_screen() {
    let mut settings = AppSettings::default();
    settings.set_pin("2468").unwrap();
    let mut session = memory_session(MemoryStore::new(), settings);
    session.enter_pin("2468").unwrap();
    session.open_tab(TabId::Statistics).unwrap();

    assert_eq!(
        session.back().unwrap(),
        BackOutcome::Restored(ScreenId::Archive)
    );
    assert!(session.compositor().is_visible(PanelId::BottomBar));
    assert_eq!(session.back().unwrap(), BackOutcome::Exit);
}

#[test]
fn actions_follow_the_structure_toggle() {
    let mut settings = AppSettings::default();
    settings.structure.actions = false;
    let mut session = memory_session(seeded_store(), settings);
    session.open_entry(1).unwrap();
    assert!(session.set_edit_actions("Stretched").is_err());
    session.start_edit().unwrap();
    assert!(matches!(
        session.set_edit_actions("Stretched"),
        Err(DiaryError::InvalidInput(_))
    ));

    session.update_settings(|settings| settings.structure.actions = true);
    session.set_edit_actions("Stretched").unwrap();
    let updated = session.save_edit().unwrap();
    assert_eq!(updated.actions, "Stretched");
    assert_eq!(session.store().entry(1).unwrap().unwrap().actions, "Stretched");
}
