use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{PanelId, ScreenId, TabId};

/// Shows and hides concrete UI panels on behalf of the core.
pub trait ScreenCompositor {
    fn set_visible(&mut self, panel: PanelId, visible: bool);

    fn set_title(&mut self, panel: PanelId, text: &str);

    /// Highlights `tab` in the tab bar. With `silent` set the selection must
    /// not emit the event that would normally navigate to the tab.
    fn select_tab(&mut self, tab: TabId, silent: bool);
}

impl<C: ScreenCompositor + ?Sized> ScreenCompositor for &mut C {
    fn set_visible(&mut self, panel: PanelId, visible: bool) {
        (**self).set_visible(panel, visible);
    }

    fn set_title(&mut self, panel: PanelId, text: &str) {
        (**self).set_title(panel, text);
    }

    fn select_tab(&mut self, tab: TabId, silent: bool) {
        (**self).select_tab(tab, silent);
    }
}

/// In-memory compositor that records panel state. Used by the CLI to render
/// status and by tests to observe what the core asked for.
#[derive(Debug, Clone, Default)]
pub struct PanelBoard {
    visible: BTreeSet<PanelId>,
    titles: BTreeMap<PanelId, String>,
    selected_tab: Option<TabId>,
    emitted_tab_events: Vec<TabId>,
    mutations: usize,
}

impl PanelBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, panel: PanelId) -> bool {
        self.visible.contains(&panel)
    }

    pub fn title(&self, panel: PanelId) -> Option<&str> {
        self.titles.get(&panel).map(String::as_str)
    }

    pub fn selected_tab(&self) -> Option<TabId> {
        self.selected_tab
    }

    /// Tab selections that were not silent, in order.
    pub fn emitted_tab_events(&self) -> &[TabId] {
        &self.emitted_tab_events
    }

    /// Number of calls received so far.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Screens whose content panel is currently shown.
    pub fn visible_screens(&self) -> Vec<ScreenId> {
        self.visible
            .iter()
            .filter_map(|panel| match panel {
                PanelId::Content(screen) => Some(*screen),
                _ => None,
            })
            .collect()
    }

    /// The single visible screen, if exactly one content panel is shown.
    pub fn visible_screen(&self) -> Option<ScreenId> {
        match self.visible_screens().as_slice() {
            [screen] => Some(*screen),
            _ => None,
        }
    }

    /// Visible chrome (everything except content areas and wizard sections).
    pub fn visible_bars(&self) -> Vec<PanelId> {
        self.visible
            .iter()
            .copied()
            .filter(|panel| !matches!(panel, PanelId::Content(_) | PanelId::Section(_)))
            .collect()
    }
}

impl ScreenCompositor for PanelBoard {
    fn set_visible(&mut self, panel: PanelId, visible: bool) {
        self.mutations += 1;
        if visible {
            self.visible.insert(panel);
        } else {
            self.visible.remove(&panel);
        }
    }

    fn set_title(&mut self, panel: PanelId, text: &str) {
        self.mutations += 1;
        self.titles.insert(panel, text.to_string());
    }

    fn select_tab(&mut self, tab: TabId, silent: bool) {
        self.mutations += 1;
        self.selected_tab = Some(tab);
        if !silent {
            self.emitted_tab_events.push(tab);
        }
    }
}
