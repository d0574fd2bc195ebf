//! Journal entry types.
//!
//! An entry is written once and never mutated afterwards. The journal file
//! is the source of truth; statistics are always derived from it.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Categorical mood assigned to an entry.
///
/// `Blocked` marks entries that failed moderation; they are never scored.
/// Older journals use Russian labels; they are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[serde(alias = "позитив")]
    Positive,

    #[serde(alias = "нейтрально")]
    Neutral,

    #[serde(alias = "негатив")]
    Negative,

    #[serde(alias = "заблокировано")]
    Blocked,
}

impl Mood {
    /// Every mood, in display order
    pub const ALL: [Mood; 4] = [Mood::Positive, Mood::Neutral, Mood::Negative, Mood::Blocked];

    /// Stable lowercase label (matches the persisted form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Positive => "positive",
            Mood::Neutral => "neutral",
            Mood::Negative => "negative",
            Mood::Blocked => "blocked",
        }
    }

    /// Whether this mood came out of sentiment scoring
    pub fn is_scored(&self) -> bool {
        !matches!(self, Mood::Blocked)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Creation instant, local time, second resolution
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,

    /// Transcribed utterance, stored verbatim (also for blocked entries)
    pub text: String,

    /// Assigned mood
    pub mood: Mood,
}

impl Entry {
    /// Create an entry stamped with the current local time
    pub fn now(text: impl Into<String>, mood: Mood) -> Self {
        Self::at(Local::now().naive_local(), text, mood)
    }

    /// Create an entry with an explicit timestamp (truncated to whole seconds)
    pub fn at(timestamp: NaiveDateTime, text: impl Into<String>, mood: Mood) -> Self {
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self {
            timestamp,
            text: text.into(),
            mood,
        }
    }

    /// Text safe to show back to the user (blocked content is masked)
    pub fn display_text(&self) -> &str {
        match self.mood {
            Mood::Blocked => "[blocked]",
            _ => &self.text,
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS` (de)serialization for entry timestamps
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
