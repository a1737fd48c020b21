//! Emotion tags and the fixed influence-factor vocabulary.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, NamedEntity};

const POSITIVE_EMOTIONS: [&str; 14] = [
    "Joy",
    "Delight",
    "Pride",
    "Admiration",
    "Serenity",
    "Enthusiasm",
    "Calm",
    "Interest",
    "Love",
    "Satisfaction",
    "Inspiration",
    "Gratitude",
    "Hope",
    "Optimism",
];

const NEGATIVE_EMOTIONS: [&str; 19] = [
    "Anger",
    "Irritation",
    "Disgust",
    "Contempt",
    "Resentment",
    "Annoyance",
    "Envy",
    "Jealousy",
    "Sadness",
    "Disappointment",
    "Longing",
    "Despair",
    "Regret",
    "Fear",
    "Anxiety",
    "Horror",
    "Panic",
    "Shame",
    "Guilt",
];

/// The twelve influence factors offered on the factors step, in display order.
pub const INFLUENCE_FACTORS: [&str; 12] = [
    "Sleep",
    "Work",
    "Study",
    "Family",
    "Friends",
    "Health",
    "Exercise",
    "Food",
    "Weather",
    "Money",
    "Rest",
    "Social media",
];

static POSITIVE: Lazy<HashSet<String>> = Lazy::new(|| normalized_set(&POSITIVE_EMOTIONS));
static NEGATIVE: Lazy<HashSet<String>> = Lazy::new(|| normalized_set(&NEGATIVE_EMOTIONS));

fn normalized_set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| normalize(name)).collect()
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Mood category of an emotion, derived from static set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodCategory {
    Negative,
    Positive,
    Neutral,
}

impl MoodCategory {
    pub fn of(name: &str) -> Self {
        let key = normalize(name);
        if NEGATIVE.contains(&key) {
            MoodCategory::Negative
        } else if POSITIVE.contains(&key) {
            MoodCategory::Positive
        } else {
            MoodCategory::Neutral
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoodCategory::Negative => "negative",
            MoodCategory::Positive => "positive",
            MoodCategory::Neutral => "other",
        };
        f.write_str(label)
    }
}

/// An emotion the user can attach to an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }

    pub fn category(&self) -> MoodCategory {
        MoodCategory::of(&self.name)
    }

    /// Tag identity is the name, compared case-insensitively.
    pub fn same_as(&self, name: &str) -> bool {
        normalize(&self.name) == normalize(name)
    }
}

impl NamedEntity for Tag {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Tag {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.category())
    }
}

/// Seed vocabulary: every negative emotion followed by every positive one.
pub fn default_emotions() -> Vec<Tag> {
    NEGATIVE_EMOTIONS
        .iter()
        .chain(POSITIVE_EMOTIONS.iter())
        .map(|name| Tag::new(*name))
        .collect()
}

/// Canonical spelling of an influence factor, if it belongs to the vocabulary.
pub fn influence_factor(name: &str) -> Option<&'static str> {
    let key = normalize(name);
    INFLUENCE_FACTORS
        .iter()
        .copied()
        .find(|candidate| normalize(candidate) == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_disjoint_and_case_insensitive() {
        assert_eq!(MoodCategory::of("joy"), MoodCategory::Positive);
        assert_eq!(MoodCategory::of(" Anxiety "), MoodCategory::Negative);
        assert_eq!(MoodCategory::of("Curiosity"), MoodCategory::Neutral);
        assert!(POSITIVE.is_disjoint(&NEGATIVE));
    }

    #[test]
    fn influence_factor_lookup_is_canonical() {
        assert_eq!(influence_factor("social MEDIA"), Some("Social media"));
        assert_eq!(influence_factor("Astrology"), None);
    }

    #[test]
    fn default_vocabulary_has_no_neutral_tags() {
        let tags = default_emotions();
        assert_eq!(tags.len(), 33);
        assert!(tags.iter().all(|t| t.category() != MoodCategory::Neutral));
    }
}
