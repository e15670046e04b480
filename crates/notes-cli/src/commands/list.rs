use std::sync::Arc;

use notes_client::{CategoryFilter, NoteListView, NotesApi};

use crate::commands::common::{format_note_lines, note_to_list_item, NoteListItem};
use crate::error::CliError;

pub async fn run_list<A: NotesApi>(
    api: Arc<A>,
    filter: CategoryFilter,
    as_json: bool,
) -> Result<(), CliError> {
    let mut view = NoteListView::new(api);
    if !view.refresh().await {
        return Err(CliError::RequestFailed("fetch notes"));
    }
    view.set_filter(filter);
    let notes = view.visible_notes();

    if as_json {
        let json_items = notes
            .iter()
            .map(|note| note_to_list_item(note))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        eprintln!("No notes in {filter}");
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
