use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::sync::Arc;

use chrono::Utc;
use notes_client::HttpNotesApi;
use notes_core::util::format_short_date;
use notes_core::{Note, NoteId};
use serde::Serialize;

use crate::error::CliError;

/// JSON shape printed by `list --json` and `show --json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub category: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
}

/// API client from `--api-url`, or `NOTES_API_URL` and the default.
pub fn connect(api_url: Option<&str>) -> Result<Arc<HttpNotesApi>, CliError> {
    let api = match api_url {
        Some(url) => HttpNotesApi::new(url)?,
        None => HttpNotesApi::from_env()?,
    };
    tracing::debug!(base_url = api.base_url(), "Using notes API");
    Ok(Arc::new(api))
}

pub fn parse_note_id(id: &str) -> Result<NoteId, CliError> {
    id.parse()
        .map_err(|_| CliError::InvalidNoteId(id.trim().to_string()))
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note_preview(note, 60),
        content: note.content.clone(),
        category: note.category.clone(),
        created_at: note.created_at,
        updated_at: note.updated_at,
        relative_time: format_relative_time(note.updated_at, Utc::now().timestamp_millis()),
    }
}

pub fn format_note_lines(notes: &[&Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let id = note.id.to_string();
            let short_id = id.chars().take(13).collect::<String>();
            let title = truncate(&note.title, 32);
            let relative_time = format_relative_time(note.updated_at, now_ms);
            format!(
                "{short_id:<13}  {title:<32}  {:<16}  {relative_time}",
                note.category
            )
        })
        .collect()
}

/// Full rendering used by `show`
pub fn format_note_detail(note: &Note) -> String {
    format!(
        "{}\n{} | Created {}\n\n{}",
        note.title,
        note.category,
        format_short_date(note.created_at),
        note.content
    )
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_chars)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated = text
            .chars()
            .take(max_chars.saturating_sub(3))
            .collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Content from the joined arguments, else from piped stdin. Text is kept
/// as entered; whitespace-only input counts as none.
pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = non_blank(content_parts.join(" ")) {
        return Ok(content);
    }

    read_piped_stdin()?.ok_or(CliError::EmptyContent)
}

pub fn non_blank(content: String) -> Option<String> {
    if content.trim().is_empty() {
        None
    } else {
        Some(content)
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(non_blank(buffer))
}

/// Ask a yes/no question on stderr; anything but `y`/`yes` declines.
pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
