use crate::domain::{PanelId, ScreenId};
use crate::errors::{DiaryError, Result};

use super::compositor::ScreenCompositor;
use super::enter::enter_effect;
use super::restore::restore_for;
use super::stack::NavigationStack;

/// What a back action led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The last screen was left; the caller should end the session.
    Exit,
    /// The given screen is current again and its panels are restored.
    Restored(ScreenId),
}

/// Owns the screen history and keeps the compositor in step with it.
///
/// `go_to` and `go_back` are the history operations; `replace` swaps the top
/// without recording it, for the lock screen. Each one also swaps the content
/// panel so the visible screen always matches the top of the stack.
#[derive(Debug)]
pub struct NavigationController<C: ScreenCompositor> {
    stack: NavigationStack,
    compositor: C,
}

impl<C: ScreenCompositor> NavigationController<C> {
    pub fn new(compositor: C) -> Self {
        Self {
            stack: NavigationStack::new(),
            compositor,
        }
    }

    /// Pushes `screen`, then runs `side_effect` for its chrome.
    pub fn go_to(&mut self, screen: ScreenId, side_effect: impl FnOnce(&mut C)) {
        let previous = self.stack.top();
        if let Some(previous) = previous {
            self.compositor
                .set_visible(PanelId::Content(previous), false);
        }
        self.stack.push(screen);
        self.compositor.set_visible(PanelId::Content(screen), true);
        side_effect(&mut self.compositor);
        tracing::debug!(
            screen = %screen,
            from = ?previous,
            depth = self.stack.len(),
            "navigation push"
        );
    }

    /// `go_to` with the standard enter effect for `screen`.
    pub fn open(&mut self, screen: ScreenId) {
        let from = self.stack.top();
        self.go_to(screen, |compositor| enter_effect(screen, from, compositor));
    }

    /// Pops the current screen and restores the panels of the one beneath.
    ///
    /// Leaving the only screen yields [`BackOutcome::Exit`] without touching
    /// the compositor. Calling this after an exit is a caller bug and reported
    /// as [`DiaryError::NavigationPrecondition`].
    pub fn go_back(&mut self) -> Result<BackOutcome> {
        let popped = self.stack.pop().ok_or_else(|| {
            tracing::warn!("back requested on an empty navigation stack");
            DiaryError::NavigationPrecondition("navigation stack is empty".into())
        })?;
        let Some(top) = popped.top else {
            tracing::debug!(screen = %popped.left, "navigation exit");
            return Ok(BackOutcome::Exit);
        };

        let action = restore_for(popped.left, Some(top));
        action.apply(&mut self.compositor);
        self.compositor
            .set_visible(PanelId::Content(popped.left), false);
        self.compositor.set_visible(PanelId::Content(top), true);
        tracing::debug!(
            left = %popped.left,
            restored = %top,
            ?action,
            depth = self.stack.len(),
            "navigation pop"
        );
        Ok(BackOutcome::Restored(top))
    }

    /// Swaps the current screen for `screen`, leaving no trace of it in the
    /// history. Back from `screen` then behaves as if the replaced screen was
    /// never shown.
    pub fn replace(&mut self, screen: ScreenId) -> Result<()> {
        let popped = self.stack.pop().ok_or_else(|| {
            DiaryError::NavigationPrecondition("nothing to replace on an empty stack".into())
        })?;
        self.compositor
            .set_visible(PanelId::Content(popped.left), false);
        let replaced = popped.left;
        self.go_to(screen, |compositor| {
            enter_effect(screen, Some(replaced), compositor)
        });
        tracing::debug!(replaced = %replaced, screen = %screen, "navigation replace");
        Ok(())
    }

    pub fn current(&self) -> Option<ScreenId> {
        self.stack.top()
    }

    /// The screen a back action would return to.
    pub fn previous(&self) -> Option<ScreenId> {
        self.stack.second_from_top()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut C {
        &mut self.compositor
    }

    pub fn into_compositor(self) -> C {
        self.compositor
    }
}
