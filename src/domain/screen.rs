//! Identifiers for navigable screens and the panels they toggle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DiaryError;
use crate::wizard::SectionId;

/// A distinct navigable UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenId {
    Archive,
    Statistics,
    Settings,
    Search,
    NoteView,
    NoteEdit,
    NewEntryWizard,
    EmotionPicker,
    PinEntry,
}

impl ScreenId {
    pub const ALL: [ScreenId; 9] = [
        ScreenId::Archive,
        ScreenId::Statistics,
        ScreenId::Settings,
        ScreenId::Search,
        ScreenId::NoteView,
        ScreenId::NoteEdit,
        ScreenId::NewEntryWizard,
        ScreenId::EmotionPicker,
        ScreenId::PinEntry,
    ];

    /// Bottom-bar tab that opens this screen.
    pub fn tab(self) -> Option<TabId> {
        match self {
            ScreenId::Archive => Some(TabId::Archive),
            ScreenId::Statistics => Some(TabId::Statistics),
            ScreenId::Settings => Some(TabId::Settings),
            _ => None,
        }
    }

    /// Content tabs driven by the main top bar. Settings brings its own top
    /// bar and is handled separately.
    pub fn is_tab(self) -> bool {
        matches!(self, ScreenId::Archive | ScreenId::Statistics)
    }

    pub fn label(self) -> &'static str {
        match self {
            ScreenId::Archive => "archive",
            ScreenId::Statistics => "statistics",
            ScreenId::Settings => "settings",
            ScreenId::Search => "search",
            ScreenId::NoteView => "note-view",
            ScreenId::NoteEdit => "note-edit",
            ScreenId::NewEntryWizard => "new-entry",
            ScreenId::EmotionPicker => "emotion-picker",
            ScreenId::PinEntry => "pin-entry",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScreenId {
    type Err = DiaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ScreenId::ALL
            .into_iter()
            .find(|screen| screen.label() == normalized)
            .ok_or_else(|| DiaryError::InvalidInput(format!("unknown screen `{}`", value)))
    }
}

/// Entries of the bottom tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabId {
    Archive,
    Statistics,
    Settings,
}

impl TabId {
    pub fn screen(self) -> ScreenId {
        match self {
            TabId::Archive => ScreenId::Archive,
            TabId::Statistics => ScreenId::Statistics,
            TabId::Settings => ScreenId::Settings,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TabId::Archive => "Archive",
            TabId::Statistics => "Statistics",
            TabId::Settings => "Settings",
        }
    }
}

impl FromStr for TabId {
    type Err = DiaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "archive" => Ok(TabId::Archive),
            "statistics" | "stats" => Ok(TabId::Statistics),
            "settings" => Ok(TabId::Settings),
            other => Err(DiaryError::InvalidInput(format!("unknown tab `{}`", other))),
        }
    }
}

/// A concrete visual region toggled by screen transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelId {
    MainTopBar,
    BottomBar,
    WizardTopBar,
    NoteViewTopBar,
    NoteEditTopBar,
    EmotionPickerTopBar,
    SettingsTopBar,
    /// Content area holding the body of a screen.
    Content(ScreenId),
    /// One content section of the new-entry wizard.
    Section(SectionId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_archive_and_statistics_are_content_tabs() {
        let tabs: Vec<ScreenId> = ScreenId::ALL.into_iter().filter(|s| s.is_tab()).collect();
        assert_eq!(tabs, vec![ScreenId::Archive, ScreenId::Statistics]);
        assert_eq!(ScreenId::Settings.tab(), Some(TabId::Settings));
        assert_eq!(ScreenId::Search.tab(), None);
    }

    #[test]
    fn screen_labels_parse_back() {
        for screen in ScreenId::ALL {
            assert_eq!(screen.label().parse::<ScreenId>().unwrap(), screen);
        }
        assert!("nowhere".parse::<ScreenId>().is_err());
    }
}
