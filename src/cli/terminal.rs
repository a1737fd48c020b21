use crate::domain::{PanelId, TabId};
use crate::navigation::{PanelBoard, ScreenCompositor};

use super::output;

/// Compositor for the shell: keeps a [`PanelBoard`] for `status` and echoes
/// top bar titles as they change.
#[derive(Debug, Default)]
pub struct TerminalCompositor {
    board: PanelBoard,
    echo_titles: bool,
}

impl TerminalCompositor {
    pub fn new(echo_titles: bool) -> Self {
        Self {
            board: PanelBoard::new(),
            echo_titles,
        }
    }

    pub fn board(&self) -> &PanelBoard {
        &self.board
    }
}

impl ScreenCompositor for TerminalCompositor {
    fn set_visible(&mut self, panel: PanelId, visible: bool) {
        self.board.set_visible(panel, visible);
    }

    fn set_title(&mut self, panel: PanelId, text: &str) {
        let changed = self.board.title(panel) != Some(text);
        self.board.set_title(panel, text);
        if self.echo_titles && changed {
            output::section(text);
        }
    }

    fn select_tab(&mut self, tab: TabId, silent: bool) {
        self.board.select_tab(tab, silent);
    }
}
