use crate::domain::ScreenId;

/// Result of popping the stack: the screen left and the one now on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Popped {
    pub left: ScreenId,
    pub top: Option<ScreenId>,
}

/// Ordered history of screens; the last element is the current screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    screens: Vec<ScreenId>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, screen: ScreenId) {
        self.screens.push(screen);
    }

    pub fn pop(&mut self) -> Option<Popped> {
        let left = self.screens.pop()?;
        Some(Popped {
            left,
            top: self.top(),
        })
    }

    pub fn top(&self) -> Option<ScreenId> {
        self.screens.last().copied()
    }

    /// The screen directly beneath the current one.
    pub fn second_from_top(&self) -> Option<ScreenId> {
        self.screens.iter().rev().nth(1).copied()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn contains(&self, screen: ScreenId) -> bool {
        self.screens.contains(&screen)
    }

    pub fn as_slice(&self) -> &[ScreenId] {
        &self.screens
    }
}
