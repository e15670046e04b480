//! Note model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::Category;

/// A unique identifier for a note, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

/// A note as stored and served by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Title, possibly empty
    pub title: String,
    /// Plain text content
    pub content: String,
    /// Category label, stored as given
    pub category: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Note {
    /// Build a fresh note from a draft, stamped with `now`
    #[must_use]
    pub fn from_draft(draft: NoteDraft, now: i64) -> Self {
        Self {
            id: NoteId::new(),
            title: draft.title,
            content: draft.content,
            category: draft.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the stored category equals `category`'s label
    #[must_use]
    pub fn is_in(&self, category: Category) -> bool {
        self.category == category.label()
    }

    /// Apply partial changes in memory, leaving timestamps untouched
    pub fn apply(&mut self, changes: &NoteChanges) {
        if let Some(title) = &changes.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &changes.content {
            self.content.clone_from(content);
        }
        if let Some(category) = &changes.category {
            self.category.clone_from(category);
        }
    }
}

/// Body of a create request. Absent fields are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl NoteDraft {
    /// Draft with client-side defaults applied.
    ///
    /// A blank title becomes `New Note at <now>` and a missing category
    /// becomes `Others`. Content is kept verbatim.
    #[must_use]
    pub fn with_defaults(
        title: &str,
        content: impl Into<String>,
        category: Option<Category>,
        now: DateTime<Local>,
    ) -> Self {
        let title = title.trim();
        Self {
            title: if title.is_empty() {
                default_title_at(now)
            } else {
                title.to_string()
            },
            content: content.into(),
            category: category.unwrap_or_default().label().to_string(),
        }
    }
}

/// Body of an update request. Only fields that are present are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NoteChanges {
    /// Changes that only move the note to another category
    #[must_use]
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category.label().to_string()),
            ..Self::default()
        }
    }
}

impl From<NoteDraft> for NoteChanges {
    fn from(draft: NoteDraft) -> Self {
        Self {
            title: Some(draft.title),
            content: Some(draft.content),
            category: Some(draft.category),
        }
    }
}

/// Title given to notes saved without one
#[must_use]
pub fn default_title_at(now: DateTime<Local>) -> String {
    format!("New Note at {}", now.format("%d/%m/%Y, %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_note_id_unique() {
        let id1 = NoteId::new();
        let id2 = NoteId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_note_id_parse() {
        let id = NoteId::new();
        let parsed: NoteId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-an-id".parse::<NoteId>().is_err());
    }

    #[test]
    fn draft_defaults_blank_title_and_category() {
        let draft = NoteDraft::with_defaults("   ", "buy milk", None, fixed_now());
        assert_eq!(draft.title, "New Note at 09/03/2024, 14:05:07");
        assert_eq!(draft.content, "buy milk");
        assert_eq!(draft.category, "Others");
    }

    #[test]
    fn draft_keeps_trimmed_title_and_category() {
        let draft = NoteDraft::with_defaults(
            "  Standup ",
            "notes",
            Some(Category::MeetingNotes),
            fixed_now(),
        );
        assert_eq!(draft.title, "Standup");
        assert_eq!(draft.category, "Meeting Notes");
    }

    #[test]
    fn note_serializes_camel_case() {
        let note = Note::from_draft(
            NoteDraft {
                title: "t".into(),
                content: "c".into(),
                category: "Others".into(),
            },
            42,
        );
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["createdAt"], 42);
        assert_eq!(value["updatedAt"], 42);
        assert_eq!(value["category"], "Others");
        assert_eq!(value["id"], note.id.to_string());
    }

    #[test]
    fn changes_skip_absent_fields() {
        let json = serde_json::to_string(&NoteChanges::category(Category::MindDump)).unwrap();
        assert_eq!(json, r#"{"category":"Mind Dump"}"#);

        let parsed: NoteChanges = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, NoteChanges::default());
    }

    #[test]
    fn apply_replaces_only_present_fields() {
        let mut note = Note::from_draft(
            NoteDraft {
                title: "keep".into(),
                content: "keep".into(),
                category: "Others".into(),
            },
            1,
        );
        note.apply(&NoteChanges::category(Category::DailyJournal));
        assert_eq!(note.title, "keep");
        assert_eq!(note.content, "keep");
        assert!(note.is_in(Category::DailyJournal));
        assert!(!note.is_in(Category::Others));
    }
}
