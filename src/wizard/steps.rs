use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AppSettings;

/// Scores at or above this show positive emotions first.
pub const POSITIVE_FIRST_THRESHOLD: u8 = 50;

/// Content blocks the wizard shows and hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    ModeChoice,
    DiscomfortLevel,
    NegativeEmotions,
    PositiveEmotions,
    InfluenceFactors,
    Reflection,
}

impl SectionId {
    pub fn label(self) -> &'static str {
        match self {
            SectionId::ModeChoice => "mode-choice",
            SectionId::DiscomfortLevel => "discomfort-level",
            SectionId::NegativeEmotions => "negative-emotions",
            SectionId::PositiveEmotions => "positive-emotions",
            SectionId::InfluenceFactors => "influence-factors",
            SectionId::Reflection => "reflection",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One page of the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardStep {
    pub sections: Vec<SectionId>,
    /// Section order depends on the draft and is recomputed whenever the step
    /// becomes current.
    pub dynamic_order: bool,
}

impl WizardStep {
    pub fn fixed(sections: Vec<SectionId>) -> Self {
        Self {
            sections,
            dynamic_order: false,
        }
    }

    pub fn emotions() -> Self {
        Self {
            sections: vec![SectionId::NegativeEmotions, SectionId::PositiveEmotions],
            dynamic_order: true,
        }
    }
}

/// Display order of the two emotion sections for a mood score.
pub fn order_sections(score: u8) -> Vec<SectionId> {
    if score >= POSITIVE_FIRST_THRESHOLD {
        vec![SectionId::PositiveEmotions, SectionId::NegativeEmotions]
    } else {
        vec![SectionId::NegativeEmotions, SectionId::PositiveEmotions]
    }
}

/// Steps of the new-entry wizard, shaped by the structure toggles.
pub fn diary_steps(settings: &AppSettings) -> Vec<WizardStep> {
    let mut steps = vec![WizardStep::fixed(vec![SectionId::ModeChoice])];
    if settings.structure.discomfort_level {
        steps.push(WizardStep::fixed(vec![SectionId::DiscomfortLevel]));
    }
    steps.push(WizardStep::emotions());
    steps.push(WizardStep::fixed(vec![SectionId::InfluenceFactors]));
    if settings.structure.reflection {
        steps.push(WizardStep::fixed(vec![SectionId::Reflection]));
    }
    steps
}
