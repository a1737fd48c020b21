use chrono::{Local, NaiveDate, NaiveTime, Timelike};

use crate::domain::{
    format_score, influence_factor, Entry, EntryMode, NamedEntity, Tag, FACTOR_SEPARATOR,
    INFLUENCE_FACTORS,
};
use crate::errors::{DiaryError, Result};

pub const DEFAULT_DISCOMFORT: u8 = 50;
const EMPTY_VALUE: &str = "—";

/// Answers collected by the wizard before they become an [`Entry`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    mode: Option<EntryMode>,
    discomfort: u8,
    emotions: Vec<Tag>,
    factors: Vec<&'static str>,
    reflection: String,
    actions: String,
    date: NaiveDate,
    time: NaiveTime,
}

impl Default for EntryDraft {
    fn default() -> Self {
        let now = Local::now().naive_local();
        Self::at(now.date(), now.time())
    }
}

impl EntryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty draft stamped with the given moment (seconds dropped).
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            mode: None,
            discomfort: DEFAULT_DISCOMFORT,
            emotions: Vec::new(),
            factors: Vec::new(),
            reflection: String::new(),
            actions: String::new(),
            date,
            time: truncate_seconds(time),
        }
    }

    /// Draft prefilled from a stored entry, used by the edit flow.
    pub fn from_entry(entry: &Entry) -> Self {
        let mut draft = Self::at(entry.date, entry.time);
        draft.mode = entry.mode();
        draft.discomfort = entry.score().unwrap_or(DEFAULT_DISCOMFORT);
        draft.emotions = entry.emotions.iter().map(Tag::new).collect();
        draft.factors = entry
            .influence_factors()
            .into_iter()
            .filter_map(influence_factor)
            .collect();
        draft.sort_factors();
        draft.reflection = entry.feelings.clone();
        draft.actions = entry.actions.clone();
        draft
    }

    pub fn mode(&self) -> Option<EntryMode> {
        self.mode
    }

    /// Returns `true` when the mode actually changed. Re-selecting the
    /// current mode leaves the draft and the prompt untouched.
    pub fn select_mode(&mut self, mode: EntryMode) -> bool {
        if self.mode == Some(mode) {
            return false;
        }
        self.mode = Some(mode);
        true
    }

    /// Question asked on the discomfort step; follows the selected mode.
    pub fn prompt(&self) -> &'static str {
        self.mode.unwrap_or(EntryMode::Moment).prompt()
    }

    pub fn situation(&self) -> &'static str {
        self.mode.map(EntryMode::situation).unwrap_or("")
    }

    pub fn discomfort(&self) -> u8 {
        self.discomfort
    }

    pub fn set_discomfort(&mut self, score: u8) -> Result<()> {
        if score > 100 {
            return Err(DiaryError::InvalidInput(format!(
                "discomfort score {} is outside 0..=100",
                score
            )));
        }
        self.discomfort = score;
        Ok(())
    }

    pub fn emotions(&self) -> &[Tag] {
        &self.emotions
    }

    pub fn has_emotion(&self, name: &str) -> bool {
        self.emotions.iter().any(|tag| tag.same_as(name))
    }

    /// Adds the emotion if absent, removes it otherwise. Returns whether it
    /// is selected afterwards.
    pub fn toggle_emotion(&mut self, name: &str) -> Result<bool> {
        let tag = Tag::new(name);
        if tag.name.is_empty() {
            return Err(DiaryError::InvalidInput("emotion name is required".into()));
        }
        if self.has_emotion(&tag.name) {
            self.emotions.retain(|existing| !existing.same_as(&tag.name));
            Ok(false)
        } else {
            self.emotions.push(tag);
            Ok(true)
        }
    }

    /// Adds the emotion unless already selected.
    pub fn add_emotion(&mut self, tag: Tag) -> bool {
        if tag.name.is_empty() || self.has_emotion(&tag.name) {
            return false;
        }
        self.emotions.push(tag);
        true
    }

    pub fn factors(&self) -> &[&'static str] {
        &self.factors
    }

    /// Toggles one of the influence factors. Names outside the vocabulary are
    /// rejected.
    pub fn toggle_factor(&mut self, name: &str) -> Result<bool> {
        let factor = influence_factor(name).ok_or_else(|| {
            DiaryError::InvalidInput(format!("`{}` is not an influence factor", name.trim()))
        })?;
        if self.factors.contains(&factor) {
            self.factors.retain(|existing| *existing != factor);
            Ok(false)
        } else {
            self.factors.push(factor);
            self.sort_factors();
            Ok(true)
        }
    }

    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    pub fn set_reflection(&mut self, text: &str) {
        self.reflection = text.trim().to_string();
    }

    /// What the user did about the situation. Only the editor asks for it.
    pub fn actions(&self) -> &str {
        &self.actions
    }

    pub fn set_actions(&mut self, text: &str) {
        self.actions = text.trim().to_string();
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = truncate_seconds(time);
    }

    /// Factors joined for storage.
    pub fn joined_factors(&self) -> String {
        let separator = FACTOR_SEPARATOR.to_string();
        self.factors.join(separator.as_str())
    }

    /// Review text shown before the entry is written.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Mode: {}", or_empty(self.situation())),
            format!("Before: {}", format_score(self.discomfort)),
            format!("Emotions: {}", or_empty(&self.emotion_names().join(", "))),
            format!("Reflection: {}", or_empty(&self.reflection)),
            format!("Influence: {}", or_empty(&self.factors.join(", "))),
        ]
    }

    /// Builds the stored form with the given id.
    pub fn to_entry(&self, id: u64) -> Entry {
        Entry {
            id,
            date: self.date,
            time: self.time,
            situation: self.situation().to_string(),
            discomfort_before: format_score(self.discomfort),
            thoughts: String::new(),
            feelings: self.reflection.clone(),
            actions: self.actions.clone(),
            distortions: self.joined_factors(),
            emotions: self.emotion_names(),
        }
    }

    /// Writes the draft's answers over an existing entry, keeping its id and
    /// the fields the wizard does not ask for.
    pub fn apply_to(&self, entry: &mut Entry) {
        let rebuilt = self.to_entry(entry.id);
        entry.date = rebuilt.date;
        entry.time = rebuilt.time;
        entry.situation = rebuilt.situation;
        entry.discomfort_before = rebuilt.discomfort_before;
        entry.feelings = rebuilt.feelings;
        entry.actions = rebuilt.actions;
        entry.distortions = rebuilt.distortions;
        entry.emotions = rebuilt.emotions;
    }

    fn emotion_names(&self) -> Vec<String> {
        self.emotions.iter().map(|tag| tag.name().to_string()).collect()
    }

    fn sort_factors(&mut self) {
        self.factors.sort_by_key(|factor| {
            INFLUENCE_FACTORS
                .iter()
                .position(|known| known == factor)
                .unwrap_or(usize::MAX)
        });
        self.factors.dedup();
    }
}

fn or_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        EMPTY_VALUE
    } else {
        value
    }
}

fn truncate_seconds(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EntryDraft {
        EntryDraft::at(
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            NaiveTime::from_hms_opt(21, 15, 42).unwrap(),
        )
    }

    #[test]
    fn reselecting_mode_is_a_no_op() {
        let mut draft = draft();
        assert_eq!(draft.prompt(), EntryMode::Moment.prompt());
        assert!(draft.select_mode(EntryMode::Day));
        assert_eq!(draft.prompt(), EntryMode::Day.prompt());
        assert!(!draft.select_mode(EntryMode::Day));
        assert_eq!(draft.prompt(), EntryMode::Day.prompt());
        assert!(draft.select_mode(EntryMode::Moment));
        assert_eq!(draft.prompt(), EntryMode::Moment.prompt());
    }

    #[test]
    fn emotions_keep_selection_order_and_are_unique() {
        let mut draft = draft();
        assert!(draft.toggle_emotion("Fear").unwrap());
        assert!(draft.toggle_emotion("Hope").unwrap());
        assert!(!draft.add_emotion(Tag::new("fear")));
        assert!(!draft.toggle_emotion("FEAR").unwrap());
        assert!(draft.toggle_emotion("Fear").unwrap());
        let names: Vec<&str> = draft.emotions().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Hope", "Fear"]);
    }

    #[test]
    fn factors_follow_vocabulary_order() {
        let mut draft = draft();
        draft.toggle_factor("money").unwrap();
        draft.toggle_factor("Sleep").unwrap();
        draft.toggle_factor("Work").unwrap();
        assert_eq!(draft.joined_factors(), "Sleep;Work;Money");
        assert!(!draft.toggle_factor("Work").unwrap());
        assert_eq!(draft.joined_factors(), "Sleep;Money");
        assert!(matches!(
            draft.toggle_factor("Astrology"),
            Err(DiaryError::InvalidInput(_))
        ));
    }

    #[test]
    fn summary_marks_empty_values() {
        let draft = draft();
        assert_eq!(
            draft.summary_lines(),
            vec![
                "Mode: —",
                "Before: 50%",
                "Emotions: —",
                "Reflection: —",
                "Influence: —",
            ]
        );
    }

    #[test]
    fn entry_carries_formatted_fields() {
        let mut draft = draft();
        draft.select_mode(EntryMode::Day);
        draft.set_discomfort(76).unwrap();
        draft.set_reflection("  Quiet evening ");
        let entry = draft.to_entry(8);
        assert_eq!(entry.id, 8);
        assert_eq!(entry.discomfort_before, "76%");
        assert_eq!(entry.situation, EntryMode::Day.situation());
        assert_eq!(entry.feelings, "Quiet evening");
        assert_eq!(entry.display_time(), "21:15");
        assert!(draft.set_discomfort(101).is_err());
    }

    #[test]
    fn editing_roundtrips_through_the_draft() {
        let mut source = draft();
        source.select_mode(EntryMode::Moment);
        source.toggle_factor("Health").unwrap();
        source.toggle_emotion("Calm").unwrap();
        let mut entry = source.to_entry(3);
        entry.thoughts = "kept".into();
        entry.actions = "Called a friend".into();

        let mut edit = EntryDraft::from_entry(&entry);
        assert_eq!(edit.factors(), &["Health"]);
        assert_eq!(edit.actions(), "Called a friend");
        edit.set_discomfort(20).unwrap();
        edit.set_actions(" Went for a run ");
        edit.apply_to(&mut entry);
        assert_eq!(entry.actions, "Went for a run");
        assert_eq!(entry.id, 3);
        assert_eq!(entry.discomfort_before, "20%");
        assert_eq!(entry.thoughts, "kept");
        assert_eq!(entry.emotions, vec!["Calm".to_string()]);
    }
}
