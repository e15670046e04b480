use std::sync::Arc;
use std::time::Duration;

use notes_client::{EditorSession, ExitOutcome, NoteListView, NotesApi};
use notes_core::Category;

use crate::commands::common::parse_note_id;
use crate::error::CliError;

/// Field replacements requested on the command line
#[derive(Debug, Default)]
pub struct EditFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
}

/// Open the editor, apply `fields`, then leave it the way Escape does: one
/// immediate save of whatever has text.
pub async fn run_edit<A: NotesApi>(
    api: Arc<A>,
    id: Option<&str>,
    fields: EditFields,
    debounce: Duration,
) -> Result<(), CliError> {
    let location = match id {
        Some(id) => NoteListView::<A>::editor_location(&parse_note_id(id)?),
        None => NoteListView::<A>::new_note_location(),
    };

    let session = EditorSession::open(api, &location, debounce).await;
    if let (Some(note_id), false) = (session.note_id(), session.is_loaded()) {
        return Err(CliError::NoteNotFound(note_id.to_string()));
    }

    if let Some(title) = fields.title {
        session.set_title(title);
    }
    if let Some(content) = fields.content {
        session.set_content(content);
    }
    if fields.category.is_some() {
        session.set_category(fields.category);
    }

    match session.exit().await {
        ExitOutcome::Saved => {
            if let Some(note_id) = session.note_id() {
                println!("{note_id} (created {})", session.creation_date());
            }
            Ok(())
        }
        ExitOutcome::Empty => Err(CliError::EmptyContent),
        ExitOutcome::SaveFailed => Err(CliError::RequestFailed("save the note")),
    }
}
