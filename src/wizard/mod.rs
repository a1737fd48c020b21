//! Multi-step flow that composes a new diary entry.
//!
//! [`steps`] describes what each step shows, [`EntryDraft`] holds the answers
//! and [`WizardEngine`] moves between steps and turns the draft into a stored
//! [`Entry`](crate::domain::Entry).

pub mod draft;
pub mod engine;
pub mod steps;

pub use draft::EntryDraft;
pub use engine::{AlwaysValid, PrimaryButton, StepValidator, WizardEngine};
pub use steps::{diary_steps, order_sections, SectionId, WizardStep, POSITIVE_FIRST_THRESHOLD};
