use std::sync::Arc;

use notes_client::{Key, Modifiers, NoteListView, NotesApi};
use notes_core::Category;

use crate::commands::common::resolve_note_content;
use crate::error::CliError;

pub async fn run_capture<A: NotesApi>(
    api: Arc<A>,
    title: Option<&str>,
    category: Option<Category>,
    content_parts: &[String],
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;

    let mut view = NoteListView::new(api);
    view.set_draft_title(title.unwrap_or_default());
    view.set_draft_content(content);
    view.set_draft_category(category);

    let note = view
        .handle_shortcut(Modifiers::command(), Key::Enter)
        .await
        .ok_or(CliError::RequestFailed("save the note"))?;

    println!("{}", note.id);
    Ok(())
}
