use std::sync::Arc;

use notes_client::{NoteListView, NotesApi};

use crate::commands::common::{confirm, parse_note_id};
use crate::error::CliError;

pub async fn run_delete<A: NotesApi>(
    api: Arc<A>,
    id: &str,
    assume_yes: bool,
) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let mut view = NoteListView::new(api);
    if !view.refresh().await {
        return Err(CliError::RequestFailed("fetch notes"));
    }
    if view.find(&note_id).is_none() {
        return Err(CliError::NoteNotFound(note_id.to_string()));
    }

    let mut answer = Ok(assume_yes);
    let deleted = view
        .delete(&note_id, |note| {
            if assume_yes {
                return true;
            }
            if let Some(note) = note {
                eprintln!("{}", note.title);
            }
            answer = confirm("Are you sure you want to delete this note?");
            matches!(answer, Ok(true))
        })
        .await;

    match answer? {
        false => eprintln!("Cancelled"),
        true if deleted => println!("{note_id}"),
        true => return Err(CliError::RequestFailed("delete the note")),
    }
    Ok(())
}
