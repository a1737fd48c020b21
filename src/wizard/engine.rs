use std::collections::BTreeSet;
use std::fmt;

use crate::domain::{Entry, PanelId};
use crate::errors::{DiaryError, Result};
use crate::navigation::ScreenCompositor;
use crate::storage::EntryStore;

use super::draft::EntryDraft;
use super::steps::{order_sections, SectionId, WizardStep};

/// Notice shown when the store refuses the finished entry.
pub const REJECTED_NOTICE: &str = "All fields must be filled";

/// Gate deciding whether the user may leave a step forwards.
pub trait StepValidator {
    fn validate(&self, step: usize, draft: &EntryDraft) -> bool;
}

/// Forward navigation is never blocked by missing answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl StepValidator for AlwaysValid {
    fn validate(&self, _step: usize, _draft: &EntryDraft) -> bool {
        true
    }
}

impl<F> StepValidator for F
where
    F: Fn(usize, &EntryDraft) -> bool,
{
    fn validate(&self, step: usize, draft: &EntryDraft) -> bool {
        self(step, draft)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryButton {
    Continue,
    Finish,
}

impl PrimaryButton {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryButton::Continue => "Continue",
            PrimaryButton::Finish => "Finish",
        }
    }
}

impl fmt::Display for PrimaryButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Step pointer, visible sections and draft of one new-entry flow.
///
/// Visible sections are recomputed in full on every transition, so sections
/// of skipped steps never linger. The emotion step orders its sections by the
/// discomfort score at the moment it is entered.
#[derive(Debug, Clone)]
pub struct WizardEngine<V: StepValidator = AlwaysValid> {
    steps: Vec<WizardStep>,
    current: usize,
    visible: Vec<SectionId>,
    progress: u8,
    draft: EntryDraft,
    validator: V,
}

impl WizardEngine<AlwaysValid> {
    pub fn new(steps: Vec<WizardStep>, draft: EntryDraft) -> Result<Self> {
        Self::with_validator(steps, draft, AlwaysValid)
    }
}

impl<V: StepValidator> WizardEngine<V> {
    pub fn with_validator(steps: Vec<WizardStep>, draft: EntryDraft, validator: V) -> Result<Self> {
        let mut engine = Self {
            steps: Vec::new(),
            current: 0,
            visible: Vec::new(),
            progress: 0,
            draft,
            validator,
        };
        engine.initialize(steps)?;
        Ok(engine)
    }

    /// Installs `steps` and rewinds to the first one.
    pub fn initialize(&mut self, steps: Vec<WizardStep>) -> Result<()> {
        if steps.is_empty() {
            return Err(DiaryError::InvalidInput(
                "wizard needs at least one step".into(),
            ));
        }
        self.steps = steps;
        self.current = 0;
        self.refresh();
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn validate(&self, step: usize) -> bool {
        self.validator.validate(step, &self.draft)
    }

    /// Moves one step forward. Returns `false` when the gate refuses or the
    /// wizard is already on its last step; the index is unchanged then.
    pub fn next(&mut self) -> bool {
        if !self.validate(self.current) {
            tracing::debug!(step = self.current, "wizard step refused by validator");
            return false;
        }
        if self.is_last_step() {
            return false;
        }
        self.current += 1;
        self.refresh();
        tracing::debug!(step = self.current, of = self.steps.len(), "wizard advanced");
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.refresh();
        tracing::debug!(step = self.current, of = self.steps.len(), "wizard stepped back");
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Rounded share of steps reached, the current one included.
    pub fn progress_percent(&self) -> u8 {
        self.progress
    }

    /// Sections to show for the current step, in display order.
    pub fn current_step_sections(&self) -> &[SectionId] {
        &self.visible
    }

    pub fn primary_button(&self) -> PrimaryButton {
        if self.is_last_step() {
            PrimaryButton::Finish
        } else {
            PrimaryButton::Continue
        }
    }

    pub fn step_title(&self) -> String {
        format!("New entry • {}/{}", self.current + 1, self.steps.len())
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EntryDraft {
        &mut self.draft
    }

    pub fn into_draft(self) -> EntryDraft {
        self.draft
    }

    /// Hides every wizard section, shows the current ones and updates the
    /// wizard top bar title.
    pub fn apply_visibility<C: ScreenCompositor + ?Sized>(&self, compositor: &mut C) {
        for section in self.all_sections() {
            compositor.set_visible(PanelId::Section(section), false);
        }
        for section in &self.visible {
            compositor.set_visible(PanelId::Section(*section), true);
        }
        compositor.set_title(PanelId::WizardTopBar, &self.step_title());
    }

    /// Hides every wizard section, used when the wizard screen is left.
    pub fn clear_visibility<C: ScreenCompositor + ?Sized>(&self, compositor: &mut C) {
        for section in self.all_sections() {
            compositor.set_visible(PanelId::Section(section), false);
        }
    }

    /// Turns the draft into a stored entry.
    ///
    /// The next id is read from `store` at this moment. A rejected save
    /// yields [`DiaryError::PersistenceRejected`] and leaves the step and the
    /// draft as they were, so the same draft can be retried.
    ///
    /// At most one finalize may be outstanding per wizard. With a synchronous
    /// store this holds by construction; an asynchronous caller must refuse
    /// finish requests until the outcome is handled.
    pub fn finalize<S: EntryStore + ?Sized>(&mut self, store: &mut S) -> Result<Entry> {
        if !self.is_last_step() {
            return Err(DiaryError::NavigationPrecondition(format!(
                "finalize requested on step {} of {}",
                self.current + 1,
                self.steps.len()
            )));
        }
        if !self.validate(self.current) {
            return Err(DiaryError::ValidationRejected { step: self.current });
        }

        let id = store.max_id()? + 1;
        let entry = self.draft.to_entry(id);
        if store.save(&entry, self.draft.emotions())? {
            tracing::info!(id, situation = %entry.situation, "entry persisted");
            Ok(entry)
        } else {
            tracing::warn!(id, "store rejected the new entry");
            Err(DiaryError::PersistenceRejected(REJECTED_NOTICE.into()))
        }
    }

    fn all_sections(&self) -> BTreeSet<SectionId> {
        self.steps
            .iter()
            .flat_map(|step| step.sections.iter().copied())
            .collect()
    }

    fn refresh(&mut self) {
        let step = &self.steps[self.current];
        self.visible = if step.dynamic_order {
            order_sections(self.draft.discomfort())
                .into_iter()
                .filter(|section| step.sections.contains(section))
                .collect()
        } else {
            step.sections.clone()
        };
        self.progress = percent(self.current, self.steps.len());
    }
}

fn percent(index: usize, count: usize) -> u8 {
    let value = ((index + 1) * 200 + count) / (2 * count);
    value.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppSettings;
    use crate::navigation::PanelBoard;
    use crate::wizard::diary_steps;
    use chrono::{NaiveDate, NaiveTime};

    fn engine() -> WizardEngine {
        let draft = EntryDraft::at(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        );
        WizardEngine::new(diary_steps(&AppSettings::default()), draft).unwrap()
    }

    #[test]
    fn progress_rounds_to_nearest() {
        assert_eq!(percent(0, 5), 20);
        assert_eq!(percent(4, 5), 100);
        assert_eq!(percent(0, 3), 33);
        assert_eq!(percent(1, 3), 67);
        assert_eq!(percent(0, 8), 13);
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut wizard = engine();
        assert!(!wizard.previous());
        while wizard.next() {}
        assert_eq!(wizard.current_index(), wizard.step_count() - 1);
        assert!(!wizard.next());
        assert_eq!(wizard.primary_button(), PrimaryButton::Finish);
        assert_eq!(wizard.step_title(), "New entry • 5/5");
    }

    #[test]
    fn refusing_validator_blocks_next() {
        let draft = EntryDraft::new();
        let mut wizard = WizardEngine::with_validator(
            diary_steps(&AppSettings::default()),
            draft,
            |step: usize, _: &EntryDraft| step != 1,
        )
        .unwrap();
        assert!(wizard.next());
        assert!(!wizard.next());
        assert_eq!(wizard.current_index(), 1);
    }

    #[test]
    fn empty_step_list_is_rejected() {
        assert!(WizardEngine::new(Vec::new(), EntryDraft::new()).is_err());
    }

    #[test]
    fn visibility_is_replaced_on_each_step() {
        let mut wizard = engine();
        let mut board = PanelBoard::new();
        wizard.apply_visibility(&mut board);
        wizard.next();
        wizard.apply_visibility(&mut board);
        assert!(!board.is_visible(PanelId::Section(SectionId::ModeChoice)));
        assert!(board.is_visible(PanelId::Section(SectionId::DiscomfortLevel)));
        assert_eq!(board.title(PanelId::WizardTopBar), Some("New entry • 2/5"));

        wizard.clear_visibility(&mut board);
        assert!(!board.is_visible(PanelId::Section(SectionId::DiscomfortLevel)));
    }
}
