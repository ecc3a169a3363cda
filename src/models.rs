use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// One of the five fixed moods. Serialized as its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "😡")]
    Angry,
    #[serde(rename = "🙁")]
    Sad,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "🙂")]
    Happy,
    #[serde(rename = "😄")]
    Great,
}

impl Mood {
    /// All moods in picker order
    pub const ALL: [Mood; 5] = [Mood::Angry, Mood::Sad, Mood::Neutral, Mood::Happy, Mood::Great];

    pub fn all() -> [Mood; 5] {
        Self::ALL
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Mood::Angry => "😡",
            Mood::Sad => "🙁",
            Mood::Neutral => "😐",
            Mood::Happy => "🙂",
            Mood::Great => "😄",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Angry => "Very angry",
            Mood::Sad => "Sad",
            Mood::Neutral => "Okay",
            Mood::Happy => "Happy",
            Mood::Great => "Great",
        }
    }

    /// Lowercase identifier used on the command line and in config
    pub fn name(self) -> &'static str {
        match self {
            Mood::Angry => "angry",
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::Great => "great",
        }
    }

    /// Position within `Mood::ALL`
    pub fn index(self) -> usize {
        match self {
            Mood::Angry => 0,
            Mood::Sad => 1,
            Mood::Neutral => 2,
            Mood::Happy => 3,
            Mood::Great => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Mood> {
        Self::ALL.get(index).copied()
    }

    /// Next mood in picker order, wrapping from Great back to Angry
    pub fn next(self) -> Mood {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous mood in picker order, wrapping from Angry to Great
    pub fn previous(self) -> Mood {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph(), self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown mood '{0}' (expected one of: angry, sad, neutral, happy, great)")]
pub struct ParseMoodError(pub String);

impl FromStr for Mood {
    type Err = ParseMoodError;

    /// Accepts the name ("happy"), the glyph ("🙂") or the label ("Very angry")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| {
                mood.name().eq_ignore_ascii_case(needle)
                    || mood.glyph() == needle
                    || mood.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ParseMoodError(s.to_string()))
    }
}

/// A saved mood with its note. Never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    id: Uuid,
    date: DateTime<Utc>,
    mood: Mood,
    note: String,
}

impl MoodEntry {
    /// Create an entry stamped with a fresh id and the current time.
    /// The note is trimmed of surrounding whitespace and newlines.
    pub fn new(mood: Mood, note: &str) -> Self {
        Self::with_parts(Uuid::new_v4(), Utc::now(), mood, note)
    }

    /// Create an entry from an explicit id and timestamp
    pub fn with_parts(id: Uuid, date: DateTime<Utc>, mood: Mood, note: &str) -> Self {
        Self {
            id,
            date,
            mood,
            note: note.trim().to_string(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}
