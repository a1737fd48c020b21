use crate::domain::{PanelId, ScreenId, TabId};

use super::compositor::ScreenCompositor;

/// Panel changes for arriving at `screen` from `from`.
///
/// Tabs are selected silently: the highlight follows navigation and never
/// triggers another push.
pub fn enter_effect<C: ScreenCompositor + ?Sized>(
    screen: ScreenId,
    from: Option<ScreenId>,
    compositor: &mut C,
) {
    match screen {
        ScreenId::Archive | ScreenId::Statistics => {
            if let Some(tab) = screen.tab() {
                enter_tab(tab, compositor);
            }
        }
        ScreenId::Settings => {
            compositor.select_tab(TabId::Settings, true);
            compositor.set_visible(PanelId::BottomBar, true);
            compositor.set_visible(PanelId::MainTopBar, false);
            compositor.set_visible(PanelId::SettingsTopBar, true);
        }
        ScreenId::Search => hide_main_chrome(compositor),
        ScreenId::NewEntryWizard => {
            hide_main_chrome(compositor);
            compositor.set_visible(PanelId::WizardTopBar, true);
        }
        ScreenId::NoteView => {
            hide_main_chrome(compositor);
            compositor.set_visible(PanelId::NoteViewTopBar, true);
        }
        ScreenId::NoteEdit => {
            compositor.set_visible(PanelId::NoteEditTopBar, true);
            compositor.set_visible(PanelId::NoteViewTopBar, false);
        }
        ScreenId::EmotionPicker => {
            compositor.set_visible(PanelId::EmotionPickerTopBar, true);
            compositor.set_visible(PanelId::NoteEditTopBar, false);
            compositor.set_visible(PanelId::WizardTopBar, false);
            compositor.set_visible(PanelId::SettingsTopBar, false);
        }
        ScreenId::PinEntry => {
            if from == Some(ScreenId::Settings) {
                compositor.set_visible(PanelId::SettingsTopBar, false);
            } else {
                hide_main_chrome(compositor);
            }
        }
    }
}

fn enter_tab<C: ScreenCompositor + ?Sized>(tab: TabId, compositor: &mut C) {
    compositor.select_tab(tab, true);
    compositor.set_title(PanelId::MainTopBar, tab.title());
    compositor.set_visible(PanelId::SettingsTopBar, false);
    compositor.set_visible(PanelId::MainTopBar, true);
    compositor.set_visible(PanelId::BottomBar, true);
}

fn hide_main_chrome<C: ScreenCompositor + ?Sized>(compositor: &mut C) {
    compositor.set_visible(PanelId::BottomBar, false);
    compositor.set_visible(PanelId::MainTopBar, false);
}
