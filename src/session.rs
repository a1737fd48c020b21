//! User-level flows: the lock screen, tabs, the new-entry wizard, viewing,
//! editing and deleting entries, and settings.
//!
//! A [`DiarySession`] owns the store, the navigation controller and the
//! wizard. Settings are handed in once and written back only by
//! [`DiarySession::save_settings`].

use std::collections::VecDeque;
use std::fmt;

use crate::archive::{self, ArchiveItem};
use crate::config::{validate_pin, AppSettings, ConfigManager};
use crate::domain::{Entry, EntryMode, PanelId, ScreenId, TabId, Tag};
use crate::errors::{DiaryError, Result};
use crate::navigation::{enter_effect, BackOutcome, NavigationController, ScreenCompositor};
use crate::storage::EntryStore;
use crate::wizard::{diary_steps, EntryDraft, WizardEngine};

const WRONG_PIN: &str = "Wrong PIN";
const PIN_SAVED: &str = "PIN saved";
const PIN_REMOVED: &str = "PIN removed";
const ENTRY_UPDATED: &str = "Entry updated";
const ENTRY_DELETED: &str = "Entry deleted";

/// What the PIN screen is currently used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// Unlock the diary.
    Enter,
    /// Set a PIN for the first time.
    Create,
    /// Replace the existing PIN.
    Change,
}

/// Transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub String);

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct DiarySession<S: EntryStore, C: ScreenCompositor> {
    store: S,
    nav: NavigationController<C>,
    settings: AppSettings,
    config: Option<ConfigManager>,
    wizard: Option<WizardEngine>,
    leave_requested: bool,
    pin_mode: Option<PinMode>,
    open_entry: Option<Entry>,
    edit_draft: Option<EntryDraft>,
    notices: VecDeque<Notice>,
    exited: bool,
}

impl<S: EntryStore, C: ScreenCompositor> DiarySession<S, C> {
    pub fn new(store: S, compositor: C, settings: AppSettings) -> Self {
        Self {
            store,
            nav: NavigationController::new(compositor),
            settings,
            config: None,
            wizard: None,
            leave_requested: false,
            pin_mode: None,
            open_entry: None,
            edit_draft: None,
            notices: VecDeque::new(),
            exited: false,
        }
    }

    /// Settings are persisted through `config` on save.
    pub fn with_config(mut self, config: ConfigManager) -> Self {
        self.config = Some(config);
        self
    }

    /// Shows the lock screen when a PIN is set, the archive otherwise.
    pub fn start(&mut self) -> Result<()> {
        if self.nav.depth() > 0 {
            return Err(DiaryError::NavigationPrecondition(
                "session already started".into(),
            ));
        }
        if self.settings.has_pin() {
            self.pin_mode = Some(PinMode::Enter);
            self.nav.open(ScreenId::PinEntry);
        } else {
            self.nav.open(ScreenId::Archive);
        }
        tracing::info!(
            locked = self.is_locked(),
            nickname = %self.settings.nickname,
            "diary session started"
        );
        Ok(())
    }

    pub fn current_screen(&self) -> Option<ScreenId> {
        self.nav.current()
    }

    pub fn is_locked(&self) -> bool {
        self.pin_mode == Some(PinMode::Enter)
    }

    pub fn is_exited(&self) -> bool {
        self.exited
    }

    pub fn navigation(&self) -> &NavigationController<C> {
        &self.nav
    }

    pub fn compositor(&self) -> &C {
        self.nav.compositor()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn notify(&mut self, message: impl Into<String>) {
        let notice = Notice(message.into());
        tracing::debug!(%notice, "user notice");
        self.notices.push_back(notice);
    }

    fn ensure_active(&self) -> Result<()> {
        if self.exited {
            return Err(DiaryError::NavigationPrecondition(
                "session has exited".into(),
            ));
        }
        if self.is_locked() {
            return Err(DiaryError::NavigationPrecondition("diary is locked".into()));
        }
        Ok(())
    }

    fn ensure_on(&self, screens: &[ScreenId], action: &str) -> Result<ScreenId> {
        self.ensure_active()?;
        match self.nav.current() {
            Some(current) if screens.contains(&current) => Ok(current),
            current => Err(DiaryError::NavigationPrecondition(format!(
                "{} is not available on {}",
                action,
                current.map_or("no screen".to_string(), |screen| screen.to_string())
            ))),
        }
    }

    /// Bottom bar tab selection. Only reachable while the bottom bar shows.
    pub fn open_tab(&mut self, tab: TabId) -> Result<()> {
        self.ensure_on(
            &[ScreenId::Archive, ScreenId::Statistics, ScreenId::Settings],
            "tab selection",
        )?;
        let screen = tab.screen();
        if self.nav.current() == Some(screen) {
            return Ok(());
        }
        self.nav.open(screen);
        Ok(())
    }

    pub fn open_settings(&mut self) -> Result<()> {
        self.open_tab(TabId::Settings)
    }

    pub fn open_search(&mut self) -> Result<()> {
        self.ensure_on(&[ScreenId::Archive, ScreenId::Statistics], "search")?;
        self.nav.open(ScreenId::Search);
        Ok(())
    }

    /// Physical back action. Leaving a screen discards whatever it was
    /// editing; leaving the last screen ends the session.
    pub fn back(&mut self) -> Result<BackOutcome> {
        let leaving = self.nav.current();
        if leaving == Some(ScreenId::NewEntryWizard) {
            self.discard_wizard();
        }
        let outcome = self.nav.go_back()?;
        match leaving {
            Some(ScreenId::NoteEdit) => self.edit_draft = None,
            Some(ScreenId::NoteView) => self.open_entry = None,
            Some(ScreenId::PinEntry) => self.pin_mode = None,
            _ => {}
        }
        if outcome == BackOutcome::Exit {
            self.exited = true;
            tracing::info!("diary session ended");
        }
        Ok(outcome)
    }

    pub fn pin_mode(&self) -> Option<PinMode> {
        self.pin_mode
    }

    /// Opens the PIN screen from settings to create or change the PIN.
    pub fn open_pin_setup(&mut self) -> Result<()> {
        self.ensure_on(&[ScreenId::Settings], "PIN setup")?;
        self.pin_mode = Some(if self.settings.has_pin() {
            PinMode::Change
        } else {
            PinMode::Create
        });
        self.nav.open(ScreenId::PinEntry);
        Ok(())
    }

    /// Handles a code typed on the PIN screen. Returns whether it was accepted.
    pub fn enter_pin(&mut self, code: &str) -> Result<bool> {
        match self.pin_mode {
            Some(PinMode::Enter) => {
                if !self.settings.pin_matches(code) {
                    tracing::warn!("wrong PIN entered");
                    self.notify(WRONG_PIN);
                    return Ok(false);
                }
                self.pin_mode = None;
                self.nav.replace(ScreenId::Archive)?;
                tracing::info!("diary unlocked");
                Ok(true)
            }
            Some(PinMode::Create) | Some(PinMode::Change) => {
                if let Err(err) = validate_pin(code.trim()) {
                    self.notify(err.to_string());
                    return Ok(false);
                }
                self.settings.set_pin(code.trim())?;
                self.save_settings()?;
                self.notify(PIN_SAVED);
                self.back()?;
                Ok(true)
            }
            None => Err(DiaryError::NavigationPrecondition(
                "PIN screen is not open".into(),
            )),
        }
    }

    pub fn remove_pin(&mut self) -> Result<()> {
        self.ensure_on(&[ScreenId::Settings], "removing the PIN")?;
        if !self.settings.has_pin() {
            return Err(DiaryError::InvalidInput("no PIN is set".into()));
        }
        self.settings.clear_pin();
        self.save_settings()?;
        self.notify(PIN_REMOVED);
        Ok(())
    }

    pub fn open_new_entry(&mut self) -> Result<()> {
        self.ensure_on(&[ScreenId::Archive, ScreenId::Statistics], "new entry")?;
        let wizard = WizardEngine::new(diary_steps(&self.settings), EntryDraft::new())?;
        self.nav.open(ScreenId::NewEntryWizard);
        wizard.apply_visibility(self.nav.compositor_mut());
        tracing::debug!(steps = wizard.step_count(), "wizard opened");
        self.wizard = Some(wizard);
        self.leave_requested = false;
        Ok(())
    }

    pub fn wizard(&self) -> Option<&WizardEngine> {
        self.wizard.as_ref()
    }

    fn wizard_mut(&mut self) -> Result<&mut WizardEngine> {
        if self.nav.current() != Some(ScreenId::NewEntryWizard) {
            return Err(DiaryError::NavigationPrecondition(
                "the new entry wizard is not the current screen".into(),
            ));
        }
        self.wizard.as_mut().ok_or_else(|| {
            DiaryError::NavigationPrecondition("no new entry is in progress".into())
        })
    }

    /// The draft of the entry being composed.
    pub fn draft_mut(&mut self) -> Result<&mut EntryDraft> {
        Ok(self.wizard_mut()?.draft_mut())
    }

    /// Mode choice on the first step. Returns whether the mode changed.
    pub fn select_mode(&mut self, mode: EntryMode) -> Result<bool> {
        Ok(self.draft_mut()?.select_mode(mode))
    }

    pub fn wizard_next(&mut self) -> Result<bool> {
        let wizard = self.wizard_mut()?;
        let moved = wizard.next();
        if moved {
            self.refresh_wizard_panels();
        }
        Ok(moved)
    }

    pub fn wizard_previous(&mut self) -> Result<bool> {
        let wizard = self.wizard_mut()?;
        let moved = wizard.previous();
        if moved {
            self.refresh_wizard_panels();
        }
        Ok(moved)
    }

    /// Top bar back arrow: one step back, or a request to leave the wizard
    /// when already on the first step.
    pub fn wizard_back(&mut self) -> Result<bool> {
        if self.wizard_previous()? {
            return Ok(true);
        }
        self.leave_requested = true;
        Ok(false)
    }

    /// Close action: leaving always needs confirmation.
    pub fn request_leave_wizard(&mut self) -> Result<()> {
        self.wizard_mut()?;
        self.leave_requested = true;
        Ok(())
    }

    pub fn leave_requested(&self) -> bool {
        self.leave_requested
    }

    pub fn cancel_leave_wizard(&mut self) {
        self.leave_requested = false;
    }

    /// Drops the draft and leaves the wizard screen.
    pub fn confirm_leave_wizard(&mut self) -> Result<BackOutcome> {
        self.wizard_mut()?;
        tracing::debug!("new entry discarded");
        self.back()
    }

    /// Saves the draft on the last step.
    ///
    /// On success the wizard is closed and the new entry returned. A store
    /// rejection becomes a notice and the wizard stays on its last step with
    /// the draft intact, so the user can retry or go back.
    ///
    /// Store calls complete before this returns, so one finish is never in
    /// flight while another starts. Once a save succeeds the wizard is gone and
    /// a repeated finish is a precondition error.
    pub fn finish_entry(&mut self) -> Result<Option<Entry>> {
        self.wizard_mut()?;
        let wizard = self.wizard.as_mut().ok_or_else(|| {
            DiaryError::NavigationPrecondition("no new entry is in progress".into())
        })?;
        let outcome = wizard.finalize(&mut self.store);

        match outcome {
            Ok(entry) => {
                self.back()?;
                Ok(Some(entry))
            }
            Err(DiaryError::PersistenceRejected(message)) => {
                self.notify(message);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn refresh_wizard_panels(&mut self) {
        if let Some(wizard) = self.wizard.as_ref() {
            wizard.apply_visibility(self.nav.compositor_mut());
        }
    }

    fn discard_wizard(&mut self) {
        if let Some(wizard) = self.wizard.take() {
            wizard.clear_visibility(self.nav.compositor_mut());
        }
        self.leave_requested = false;
    }

    pub fn open_emotion_picker(&mut self) -> Result<()> {
        self.ensure_on(
            &[ScreenId::NewEntryWizard, ScreenId::NoteEdit, ScreenId::Settings],
            "the emotion picker",
        )?;
        self.nav.open(ScreenId::EmotionPicker);
        Ok(())
    }

    /// Vocabulary shown by the picker.
    pub fn picker_tags(&self) -> Result<Vec<Tag>> {
        self.store.all_tags()
    }

    /// Picks an emotion for whoever opened the picker. From settings an
    /// unknown name extends the vocabulary; elsewhere the name must exist.
    /// Returns whether anything changed.
    pub fn pick_emotion(&mut self, name: &str) -> Result<bool> {
        self.ensure_on(&[ScreenId::EmotionPicker], "picking an emotion")?;
        let opener = self.nav.previous();
        if opener == Some(ScreenId::Settings) {
            let added = self.store.add_tag(Tag::new(name))?;
            if added {
                tracing::info!(emotion = name.trim(), "emotion added to vocabulary");
            }
            return Ok(added);
        }

        let tag = self
            .store
            .all_tags()?
            .into_iter()
            .find(|tag| tag.same_as(name))
            .ok_or_else(|| DiaryError::InvalidInput(format!("unknown emotion `{}`", name.trim())))?;
        let draft = match opener {
            Some(ScreenId::NewEntryWizard) => self.wizard.as_mut().map(WizardEngine::draft_mut),
            Some(ScreenId::NoteEdit) => self.edit_draft.as_mut(),
            _ => None,
        }
        .ok_or_else(|| DiaryError::NavigationPrecondition("nothing to pick emotions for".into()))?;
        Ok(draft.add_emotion(tag))
    }

    pub fn entries(&self) -> Result<Vec<Entry>> {
        self.store.all_entries()
    }

    pub fn archive(&self) -> Result<Vec<ArchiveItem>> {
        Ok(archive::archive_items(&self.store.all_entries()?))
    }

    pub fn search(&self, query: &str) -> Result<Vec<Entry>> {
        let entries = self.store.all_entries()?;
        Ok(archive::search(&entries, query).into_iter().cloned().collect())
    }

    pub fn open_entry(&mut self, id: u64) -> Result<Entry> {
        let from = self.ensure_on(
            &[ScreenId::Archive, ScreenId::Statistics, ScreenId::Search],
            "opening an entry",
        )?;
        let entry = self
            .store
            .entry(id)?
            .ok_or_else(|| DiaryError::NotFound(format!("entry {}", id)))?;
        let title = entry.title();
        self.nav.go_to(ScreenId::NoteView, |compositor| {
            enter_effect(ScreenId::NoteView, Some(from), compositor);
            compositor.set_title(PanelId::NoteViewTopBar, &title);
        });
        self.open_entry = Some(entry.clone());
        Ok(entry)
    }

    pub fn opened_entry(&self) -> Option<&Entry> {
        self.open_entry.as_ref()
    }

    pub fn start_edit(&mut self) -> Result<()> {
        self.ensure_on(&[ScreenId::NoteView], "editing")?;
        let entry = self
            .open_entry
            .as_ref()
            .ok_or_else(|| DiaryError::NavigationPrecondition("no entry is open".into()))?;
        self.edit_draft = Some(EntryDraft::from_entry(entry));
        self.nav.open(ScreenId::NoteEdit);
        Ok(())
    }

    pub fn edit_draft_mut(&mut self) -> Result<&mut EntryDraft> {
        if self.nav.current() != Some(ScreenId::NoteEdit) {
            return Err(DiaryError::NavigationPrecondition(
                "the editor is not the current screen".into(),
            ));
        }
        self.edit_draft
            .as_mut()
            .ok_or_else(|| DiaryError::NavigationPrecondition("nothing is being edited".into()))
    }

    /// Sets the actions text of the entry being edited. Refused while the
    /// actions part is switched off in the structure settings.
    pub fn set_edit_actions(&mut self, text: &str) -> Result<()> {
        if !self.settings.structure.actions {
            return Err(DiaryError::InvalidInput(
                "actions are turned off in settings".into(),
            ));
        }
        self.edit_draft_mut()?.set_actions(text);
        Ok(())
    }

    /// Writes the edited entry and returns to the note view.
    pub fn save_edit(&mut self) -> Result<Entry> {
        self.ensure_on(&[ScreenId::NoteEdit], "saving an edit")?;
        let (Some(draft), Some(original)) = (self.edit_draft.as_ref(), self.open_entry.as_ref())
        else {
            return Err(DiaryError::NavigationPrecondition(
                "nothing is being edited".into(),
            ));
        };
        let mut updated = original.clone();
        draft.apply_to(&mut updated);
        let emotions = draft.emotions().to_vec();

        if let Err(err) = self.store.update(&updated, &emotions) {
            if err.is_user_facing() {
                self.notify(err.to_string());
            }
            return Err(err);
        }
        tracing::info!(id = updated.id, "entry updated");
        self.back()?;
        self.open_entry = Some(updated.clone());
        let title = updated.title();
        self.nav
            .compositor_mut()
            .set_title(PanelId::NoteViewTopBar, &title);
        self.notify(ENTRY_UPDATED);
        Ok(updated)
    }

    /// Deletes the entry on the note view and returns to the list.
    pub fn delete_open_entry(&mut self) -> Result<Entry> {
        self.ensure_on(&[ScreenId::NoteView], "deleting")?;
        let entry = self
            .open_entry
            .clone()
            .ok_or_else(|| DiaryError::NavigationPrecondition("no entry is open".into()))?;
        self.store.delete(&entry)?;
        tracing::info!(id = entry.id, "entry deleted");
        self.back()?;
        self.notify(ENTRY_DELETED);
        Ok(entry)
    }

    pub fn update_settings(&mut self, change: impl FnOnce(&mut AppSettings)) {
        change(&mut self.settings);
    }

    /// Persists the current settings. Without a config manager the settings
    /// live only as long as the session.
    pub fn save_settings(&mut self) -> Result<()> {
        match &self.config {
            Some(config) => config.save(&self.settings),
            None => {
                tracing::debug!("no config manager; settings kept in memory");
                Ok(())
            }
        }
    }

    pub fn into_parts(self) -> (S, C, AppSettings) {
        let Self {
            store,
            nav,
            settings,
            ..
        } = self;
        (store, nav.into_compositor(), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::PanelBoard;
    use crate::storage::MemoryStore;

    fn session() -> DiarySession<MemoryStore, PanelBoard> {
        let mut session = DiarySession::new(MemoryStore::new(), PanelBoard::new(), AppSettings::default());
        session.start().unwrap();
        session
    }

    #[test]
    fn starts_on_the_archive_without_pin() {
        let session = session();
        assert_eq!(session.current_screen(), Some(ScreenId::Archive));
        assert!(!session.is_locked());
        assert_eq!(session.compositor().visible_screen(), Some(ScreenId::Archive));
    }

    #[test]
    fn wrong_pin_keeps_the_lock() {
        let mut settings = AppSettings::default();
        settings.set_pin("4321").unwrap();
        let mut session = DiarySession::new(MemoryStore::new(), PanelBoard::new(), settings);
        session.start().unwrap();
        assert!(session.is_locked());
        assert!(session.open_tab(TabId::Statistics).is_err());

        assert!(!session.enter_pin("0000").unwrap());
        assert_eq!(session.take_notices(), vec![Notice(WRONG_PIN.into())]);
        assert!(session.enter_pin("4321").unwrap());
        assert_eq!(session.current_screen(), Some(ScreenId::Archive));
        assert!(session.compositor().is_visible(PanelId::BottomBar));
    }

    #[test]
    fn picker_from_settings_extends_vocabulary() {
        let mut session = session();
        session.open_settings().unwrap();
        session.open_emotion_picker().unwrap();
        assert!(session.pick_emotion("Curiosity").unwrap());
        assert!(!session.pick_emotion("curiosity").unwrap());
        session.back().unwrap();
        assert!(session.compositor().is_visible(PanelId::SettingsTopBar));
        assert!(!session.compositor().is_visible(PanelId::EmotionPickerTopBar));
    }

    #[test]
    fn finish_before_last_step_is_refused() {
        let mut session = session();
        session.open_new_entry().unwrap();
        assert!(matches!(
            session.finish_entry(),
            Err(DiaryError::NavigationPrecondition(_))
        ));
        assert_eq!(session.current_screen(), Some(ScreenId::NewEntryWizard));
    }
}
