use std::sync::Arc;

use notes_client::{ClientError, NotesApi};

use crate::commands::common::{format_note_detail, note_to_list_item, parse_note_id};
use crate::error::CliError;

pub async fn run_show<A: NotesApi>(api: Arc<A>, id: &str, as_json: bool) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let note = match api.get_note(&note_id).await {
        Ok(note) => note,
        Err(ClientError::NotFound) => return Err(CliError::NoteNotFound(note_id.to_string())),
        Err(error) => return Err(error.into()),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&note_to_list_item(&note))?);
    } else {
        println!("{}", format_note_detail(&note));
    }
    Ok(())
}
