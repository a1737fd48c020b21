//! Persisted diary entries and their value helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::errors::DiaryError;

/// Separator used for the persisted influence-factor list.
pub const FACTOR_SEPARATOR: char = ';';

/// What the entry describes: the whole day or the current moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    Day,
    Moment,
}

impl EntryMode {
    pub fn key(self) -> &'static str {
        match self {
            EntryMode::Day => "day",
            EntryMode::Moment => "moment",
        }
    }

    /// Situation text written into the entry.
    pub fn situation(self) -> &'static str {
        match self {
            EntryMode::Day => "Feelings over the day",
            EntryMode::Moment => "Feelings right now",
        }
    }

    /// Question shown above the discomfort scale.
    pub fn prompt(self) -> &'static str {
        match self {
            EntryMode::Day => "How did you feel over the day?",
            EntryMode::Moment => "How do you feel right now?",
        }
    }

    pub fn from_situation(text: &str) -> Option<Self> {
        [EntryMode::Day, EntryMode::Moment]
            .into_iter()
            .find(|mode| mode.situation() == text.trim())
    }
}

impl fmt::Display for EntryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EntryMode {
    type Err = DiaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(EntryMode::Day),
            "moment" => Ok(EntryMode::Moment),
            other => Err(DiaryError::InvalidInput(format!(
                "mode must be `day` or `moment`, got `{}`",
                other
            ))),
        }
    }
}

/// Formats a 0–100 discomfort score the way entries persist it (`"76%"`).
pub fn format_score(score: u8) -> String {
    format!("{}%", score)
}

/// Reads a persisted score back, ignoring everything but digits.
pub fn parse_score(raw: &str) -> Option<u8> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok().map(|value| value.min(100) as u8)
}

/// Coarse colour band used to tint entries by mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodBand {
    Good,
    Mixed,
    Low,
    Neutral,
}

impl MoodBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            67..=u8::MAX => MoodBand::Good,
            34..=66 => MoodBand::Mixed,
            1..=33 => MoodBand::Low,
            0 => MoodBand::Neutral,
        }
    }
}

impl fmt::Display for MoodBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoodBand::Good => "good",
            MoodBand::Mixed => "mixed",
            MoodBand::Low => "low",
            MoodBand::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// A diary entry as owned by the entry store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: u64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub situation: String,
    pub discomfort_before: String,
    #[serde(default)]
    pub thoughts: String,
    #[serde(default)]
    pub feelings: String,
    #[serde(default)]
    pub actions: String,
    #[serde(default)]
    pub distortions: String,
    #[serde(default)]
    pub emotions: Vec<String>,
}

impl Entry {
    pub fn score(&self) -> Option<u8> {
        parse_score(&self.discomfort_before)
    }

    pub fn mood_band(&self) -> MoodBand {
        MoodBand::from_score(self.score().unwrap_or(0))
    }

    pub fn mode(&self) -> Option<EntryMode> {
        EntryMode::from_situation(&self.situation)
    }

    pub fn influence_factors(&self) -> Vec<&str> {
        self.distortions
            .split(FACTOR_SEPARATOR)
            .map(str::trim)
            .filter(|factor| !factor.is_empty())
            .collect()
    }

    pub fn display_date(&self) -> String {
        self.date
            .format("%d %B %Y")
            .to_string()
            .trim_start_matches('0')
            .to_string()
    }

    pub fn display_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Title shown in the note-view top bar.
    pub fn title(&self) -> String {
        format!("{}, {}", self.display_date(), self.display_time())
    }
}

impl Displayable for Entry {
    fn display_label(&self) -> String {
        format!("#{} {} — {}", self.id, self.title(), self.situation)
    }
}
