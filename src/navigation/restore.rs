use crate::domain::{PanelId, ScreenId, TabId};

use super::compositor::ScreenCompositor;

/// Panel changes applied when a screen is popped off the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreAction {
    /// Nothing to undo.
    None,
    /// Highlight the tab beneath without navigating and restore its title.
    ReselectTab(TabId),
    /// Main top bar and bottom bar come back.
    RestoreMainChrome,
    /// Settings closes: its bar is hidden, the main chrome returns.
    CloseSettings,
    /// The emotion picker closes and the bar of the screen that opened it returns.
    ClosePicker { reveal: PanelId },
    /// The wizard or the note view closes.
    CloseEntryScreen {
        hide: PanelId,
        restore_chrome: bool,
    },
    /// The editor closes back to the note view.
    CloseEditor,
    /// The PIN screen closes; settings get their bar back.
    ClosePin { reveal_settings: bool },
}

/// Chooses the restore action from the screen being left and the screen now
/// on top. Only the picker and the PIN screen look at `beneath` to pick a
/// panel; tab reselection uses it to know which tab to highlight.
pub fn restore_for(leaving: ScreenId, beneath: Option<ScreenId>) -> RestoreAction {
    match leaving {
        ScreenId::Archive | ScreenId::Statistics => match beneath {
            Some(screen) => screen
                .tab()
                .map_or(RestoreAction::None, RestoreAction::ReselectTab),
            None => RestoreAction::None,
        },
        ScreenId::Search => RestoreAction::RestoreMainChrome,
        ScreenId::Settings => RestoreAction::CloseSettings,
        ScreenId::EmotionPicker => RestoreAction::ClosePicker {
            reveal: match beneath {
                Some(ScreenId::NewEntryWizard) => PanelId::WizardTopBar,
                Some(ScreenId::Settings) => PanelId::SettingsTopBar,
                _ => PanelId::NoteEditTopBar,
            },
        },
        ScreenId::NewEntryWizard => RestoreAction::CloseEntryScreen {
            hide: PanelId::WizardTopBar,
            restore_chrome: beneath != Some(ScreenId::Search),
        },
        ScreenId::NoteView => RestoreAction::CloseEntryScreen {
            hide: PanelId::NoteViewTopBar,
            restore_chrome: beneath != Some(ScreenId::Search),
        },
        ScreenId::NoteEdit => RestoreAction::CloseEditor,
        ScreenId::PinEntry => RestoreAction::ClosePin {
            reveal_settings: beneath == Some(ScreenId::Settings),
        },
    }
}

impl RestoreAction {
    pub fn apply<C: ScreenCompositor + ?Sized>(&self, compositor: &mut C) {
        match *self {
            RestoreAction::None => {}
            RestoreAction::ReselectTab(tab) => {
                compositor.select_tab(tab, true);
                compositor.set_title(PanelId::MainTopBar, tab.title());
            }
            RestoreAction::RestoreMainChrome => show_main_chrome(compositor),
            RestoreAction::CloseSettings => {
                compositor.set_visible(PanelId::MainTopBar, true);
                compositor.set_visible(PanelId::SettingsTopBar, false);
                compositor.set_visible(PanelId::BottomBar, true);
            }
            RestoreAction::ClosePicker { reveal } => {
                compositor.set_visible(reveal, true);
                compositor.set_visible(PanelId::EmotionPickerTopBar, false);
            }
            RestoreAction::CloseEntryScreen {
                hide,
                restore_chrome,
            } => {
                compositor.set_visible(hide, false);
                if restore_chrome {
                    show_main_chrome(compositor);
                }
            }
            RestoreAction::CloseEditor => {
                compositor.set_visible(PanelId::NoteViewTopBar, true);
                compositor.set_visible(PanelId::NoteEditTopBar, false);
            }
            RestoreAction::ClosePin { reveal_settings } => {
                if reveal_settings {
                    compositor.set_visible(PanelId::SettingsTopBar, true);
                }
            }
        }
    }
}

fn show_main_chrome<C: ScreenCompositor + ?Sized>(compositor: &mut C) {
    compositor.set_visible(PanelId::MainTopBar, true);
    compositor.set_visible(PanelId::BottomBar, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::compositor::PanelBoard;

    #[test]
    fn every_screen_has_a_rule() {
        for leaving in ScreenId::ALL {
            for beneath in ScreenId::ALL.iter().copied().map(Some).chain([None]) {
                let _ = restore_for(leaving, beneath);
            }
        }
    }

    #[test]
    fn leaving_a_tab_reselects_the_tab_beneath() {
        assert_eq!(
            restore_for(ScreenId::Statistics, Some(ScreenId::Archive)),
            RestoreAction::ReselectTab(TabId::Archive)
        );
        assert_eq!(
            restore_for(ScreenId::Archive, Some(ScreenId::Search)),
            RestoreAction::None
        );
    }

    #[test]
    fn picker_reveals_the_bar_of_its_opener() {
        let reveal = |beneath| match restore_for(ScreenId::EmotionPicker, Some(beneath)) {
            RestoreAction::ClosePicker { reveal } => reveal,
            other => panic!("unexpected action {:?}", other),
        };
        assert_eq!(reveal(ScreenId::NewEntryWizard), PanelId::WizardTopBar);
        assert_eq!(reveal(ScreenId::Settings), PanelId::SettingsTopBar);
        assert_eq!(reveal(ScreenId::NoteEdit), PanelId::NoteEditTopBar);
    }

    #[test]
    fn entry_screen_keeps_chrome_hidden_over_search() {
        let mut board = PanelBoard::new();
        board.set_visible(PanelId::NoteViewTopBar, true);
        restore_for(ScreenId::NoteView, Some(ScreenId::Search)).apply(&mut board);
        assert!(!board.is_visible(PanelId::NoteViewTopBar));
        assert!(!board.is_visible(PanelId::MainTopBar));
        assert!(!board.is_visible(PanelId::BottomBar));

        board.set_visible(PanelId::WizardTopBar, true);
        restore_for(ScreenId::NewEntryWizard, Some(ScreenId::Archive)).apply(&mut board);
        assert!(!board.is_visible(PanelId::WizardTopBar));
        assert!(board.is_visible(PanelId::MainTopBar));
        assert!(board.is_visible(PanelId::BottomBar));
    }

    #[test]
    fn tab_reselection_is_silent() {
        let mut board = PanelBoard::new();
        RestoreAction::ReselectTab(TabId::Statistics).apply(&mut board);
        assert_eq!(board.selected_tab(), Some(TabId::Statistics));
        assert!(board.emitted_tab_events().is_empty());
        assert_eq!(board.title(PanelId::MainTopBar), Some("Statistics"));
    }
}
