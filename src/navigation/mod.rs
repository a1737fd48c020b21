//! Back-stack controller for screens and the panel rules tied to it.
//!
//! A single back action unwinds different panels depending on which screen is
//! being left. The rules live in [`restore`] as a pure lookup; the controller
//! owns the stack and applies them through a [`ScreenCompositor`].

pub mod compositor;
pub mod controller;
pub mod enter;
pub mod restore;
pub mod stack;

pub use compositor::{PanelBoard, ScreenCompositor};
pub use controller::{BackOutcome, NavigationController};
pub use enter::enter_effect;
pub use restore::{restore_for, RestoreAction};
pub use stack::{NavigationStack, Popped};
