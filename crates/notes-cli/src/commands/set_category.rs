use std::sync::Arc;

use notes_client::{NoteListView, NotesApi};
use notes_core::Category;

use crate::commands::common::parse_note_id;
use crate::error::CliError;

pub async fn run_set_category<A: NotesApi>(
    api: Arc<A>,
    id: &str,
    category: Category,
) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let mut view = NoteListView::new(api);
    if !view.reassign_category(&note_id, category).await {
        return Err(CliError::RequestFailed("update the note category"));
    }

    println!("{note_id} -> {category}");
    Ok(())
}
