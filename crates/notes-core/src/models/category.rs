//! Note categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed label set a note can be filed under.
///
/// The server stores categories as free text; this enum is the closed set the
/// client offers and falls back to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Daily Journal")]
    DailyJournal,
    #[serde(rename = "Mind Dump")]
    MindDump,
    #[serde(rename = "Interview Notes")]
    InterviewNotes,
    #[serde(rename = "Meeting Notes")]
    MeetingNotes,
    #[default]
    #[serde(rename = "Others")]
    Others,
}

impl Category {
    /// Every category, in menu order
    pub const ALL: [Self; 5] = [
        Self::DailyJournal,
        Self::MindDump,
        Self::InterviewNotes,
        Self::MeetingNotes,
        Self::Others,
    ];

    /// Human-readable label, as stored on notes
    pub const fn label(self) -> &'static str {
        match self {
            Self::DailyJournal => "Daily Journal",
            Self::MindDump => "Mind Dump",
            Self::InterviewNotes => "Interview Notes",
            Self::MeetingNotes => "Meeting Notes",
            Self::Others => "Others",
        }
    }

    /// Resolve a stored label; anything outside the set yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown category '{0}' (expected one of: Daily Journal, Mind Dump, Interview Notes, \
     Meeting Notes, Others)"
)]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts labels case-insensitively, with `-` or `_` in place of spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|category| normalize(category.label()) == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| match ch {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
