//! Single-note editor with debounced autosave.
//!
//! Every edit bumps a version counter and spawns a timer task. When a timer
//! wakes it saves only if no newer edit (or an exit) has happened since it
//! was scheduled, so a burst of keystrokes produces one save per quiet
//! period. Saves already in flight are never cancelled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Local;
use notes_core::util::format_short_date;
use notes_core::models::default_title_at;
use notes_core::{Category, NoteChanges, NoteDraft, NoteId};

use crate::api::NotesApi;
use crate::keys::{editor_key_action, EditorKeyAction, Field, Key};

/// Quiet period before an edit is saved
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Path of the editor page
pub const EDITOR_PATH: &str = "/textedit";

/// Path of the notes list
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Loading,
    Editing,
    Autosaving,
    Exited,
}

/// How [`EditorSession::exit`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Unsaved text was written before leaving
    Saved,
    /// Title and content were both empty; nothing was written
    Empty,
    /// The final save failed; the session stays open
    SaveFailed,
}

/// What [`EditorSession::handle_key`] did with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Focused(Field),
    Exited(ExitOutcome),
}

#[derive(Debug)]
struct EditorState {
    note_id: Option<NoteId>,
    title: String,
    content: String,
    /// Stored label, kept verbatim; empty until one is chosen
    category: String,
    created_at: Option<i64>,
    location: String,
    focus: Field,
    phase: EditorPhase,
    version: u64,
}

impl EditorState {
    fn has_text(&self) -> bool {
        !self.title.is_empty() || !self.content.is_empty()
    }

    /// Title and content are sent as typed; only empty fields get defaults.
    fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: if self.title.is_empty() {
                default_title_at(Local::now())
            } else {
                self.title.clone()
            },
            content: self.content.clone(),
            category: if self.category.is_empty() {
                Category::default().label().to_string()
            } else {
                self.category.clone()
            },
        }
    }
}

/// One open editor page.
///
/// Edits must be made from inside a tokio runtime, since scheduling a save
/// spawns a task.
pub struct EditorSession<A: NotesApi> {
    api: Arc<A>,
    state: Arc<Mutex<EditorState>>,
    debounce: Duration,
}

fn lock(state: &Mutex<EditorState>) -> MutexGuard<'_, EditorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Pull the note id out of a location such as `/textedit?id=<id>`.
pub fn note_id_from_location(location: &str) -> Option<NoteId> {
    let (_, query) = location.split_once('?')?;
    let raw = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())?;
    match raw.parse() {
        Ok(id) => Some(id),
        Err(error) => {
            tracing::warn!("Ignoring malformed note id '{}': {}", raw, error);
            None
        }
    }
}

impl<A: NotesApi> EditorSession<A> {
    /// Open the editor at `location`, loading the note named by its `id`
    /// query parameter. Without one the session starts as an unsaved note.
    pub async fn open(api: Arc<A>, location: &str, debounce: Duration) -> Self {
        let note_id = note_id_from_location(location);
        let session = Self {
            api,
            state: Arc::new(Mutex::new(EditorState {
                note_id,
                title: String::new(),
                content: String::new(),
                category: String::new(),
                created_at: None,
                location: note_id.map_or_else(
                    || EDITOR_PATH.to_string(),
                    |id| format!("{EDITOR_PATH}?id={id}"),
                ),
                focus: Field::Title,
                phase: EditorPhase::Loading,
                version: 0,
            })),
            debounce,
        };

        if let Some(id) = note_id {
            match session.api.get_note(&id).await {
                Ok(note) => {
                    let mut state = lock(&session.state);
                    state.title = note.title;
                    state.content = note.content;
                    state.category = note.category;
                    state.created_at = Some(note.created_at);
                }
                Err(error) => tracing::error!("Error fetching note: {}", error),
            }
        }

        lock(&session.state).phase = EditorPhase::Editing;
        session
    }

    pub fn note_id(&self) -> Option<NoteId> {
        lock(&self.state).note_id
    }

    pub fn title(&self) -> String {
        lock(&self.state).title.clone()
    }

    pub fn content(&self) -> String {
        lock(&self.state).content.clone()
    }

    /// The selected category when it is one of the known labels
    pub fn category(&self) -> Option<Category> {
        Category::from_label(&lock(&self.state).category)
    }

    /// The category label as stored, empty when none was chosen
    pub fn category_label(&self) -> String {
        lock(&self.state).category.clone()
    }

    /// Current navigation location
    pub fn location(&self) -> String {
        lock(&self.state).location.clone()
    }

    pub fn phase(&self) -> EditorPhase {
        lock(&self.state).phase
    }

    pub fn focus(&self) -> Field {
        lock(&self.state).focus
    }

    /// Whether an existing note was fetched when the session opened
    pub fn is_loaded(&self) -> bool {
        lock(&self.state).created_at.is_some()
    }

    /// `dd/mm/yyyy` of the note's creation, or today for a new note
    pub fn creation_date(&self) -> String {
        let created_at = lock(&self.state).created_at;
        created_at.map_or_else(
            || Local::now().format("%d/%m/%Y").to_string(),
            format_short_date,
        )
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.edit(move |state| state.title = title);
    }

    pub fn set_content(&self, content: impl Into<String>) {
        let content = content.into();
        self.edit(move |state| state.content = content);
    }

    pub fn set_category(&self, category: Option<Category>) {
        let label = category.map(Category::label).unwrap_or_default();
        self.edit(move |state| state.category = label.to_string());
    }

    pub fn set_focus(&self, field: Field) {
        lock(&self.state).focus = field;
    }

    fn edit(&self, apply: impl FnOnce(&mut EditorState)) {
        let version = {
            let mut state = lock(&self.state);
            if state.phase == EditorPhase::Exited {
                tracing::warn!("Ignoring edit after the editor was closed");
                return;
            }
            apply(&mut state);
            state.version += 1;
            if !state.has_text() {
                return;
            }
            state.version
        };
        self.schedule_save(version);
    }

    fn schedule_save(&self, version: u64) {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let delay = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let current = lock(&state);
                if current.version != version || current.phase == EditorPhase::Exited {
                    return;
                }
            }
            tracing::debug!("Autosaving note");
            persist(api.as_ref(), &state).await;
        });
    }

    /// Save immediately, skipping the debounce. Returns false when there was
    /// nothing to save or the save failed.
    pub async fn save_now(&self) -> bool {
        persist(self.api.as_ref(), &self.state).await
    }

    /// Leave the editor: cancel any pending autosave, save unsaved text, then
    /// navigate home. A failed save keeps the session open.
    pub async fn exit(&self) -> ExitOutcome {
        let has_text = {
            let mut state = lock(&self.state);
            // Invalidate every scheduled timer.
            state.version += 1;
            state.has_text()
        };

        let outcome = if !has_text {
            ExitOutcome::Empty
        } else if persist(self.api.as_ref(), &self.state).await {
            ExitOutcome::Saved
        } else {
            ExitOutcome::SaveFailed
        };

        if outcome != ExitOutcome::SaveFailed {
            let mut state = lock(&self.state);
            state.phase = EditorPhase::Exited;
            state.location = HOME_PATH.to_string();
        }
        outcome
    }

    /// React to a key pressed in `field`. Escape exits with save.
    pub async fn handle_key(
        &self,
        field: Field,
        key: Key,
        caret_at_start: bool,
    ) -> Option<KeyOutcome> {
        match editor_key_action(field, key, caret_at_start)? {
            EditorKeyAction::Focus(target) => {
                self.set_focus(target);
                Some(KeyOutcome::Focused(target))
            }
            EditorKeyAction::Exit => Some(KeyOutcome::Exited(self.exit().await)),
        }
    }
}

impl<A: NotesApi> Drop for EditorSession<A> {
    fn drop(&mut self) {
        // Timers still sleeping wake to a stale version and skip their save.
        lock(&self.state).version += 1;
    }
}

/// Write the current state: update when the id is known, create otherwise.
/// The first successful create adopts the new id and rewrites the location.
async fn persist<A: NotesApi>(api: &A, state: &Mutex<EditorState>) -> bool {
    let (note_id, draft, previous_phase) = {
        let mut current = lock(state);
        if !current.has_text() {
            return false;
        }
        let previous_phase = current.phase;
        current.phase = EditorPhase::Autosaving;
        (current.note_id, current.draft(), previous_phase)
    };

    let saved = match note_id {
        Some(id) => api
            .update_note(&id, &NoteChanges::from(draft))
            .await
            .map(|note| (note, false)),
        None => api.create_note(&draft).await.map(|note| (note, true)),
    };

    let mut current = lock(state);
    if current.phase == EditorPhase::Autosaving {
        current.phase = previous_phase;
    }
    match saved {
        Ok((note, created)) => {
            if created && current.note_id.is_none() {
                current.note_id = Some(note.id);
                current.created_at = Some(note.created_at);
                current.location = format!("{EDITOR_PATH}?id={}", note.id);
            }
            tracing::debug!(note_id = %note.id, "Saved note");
            true
        }
        Err(error) => {
            tracing::error!("Error saving note: {}", error);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    use super::*;
    use crate::fake::{note, Call, FakeApi};

    const WINDOW: Duration = DEFAULT_DEBOUNCE;

    async fn new_session(api: &Arc<FakeApi>) -> EditorSession<FakeApi> {
        EditorSession::open(Arc::clone(api), EDITOR_PATH, WINDOW).await
    }

    #[test]
    fn parses_note_id_from_location() {
        let id = NoteId::new();
        assert_eq!(
            note_id_from_location(&format!("/textedit?id={id}")),
            Some(id)
        );
        assert_eq!(
            note_id_from_location(&format!("/textedit?mode=full&id={id}")),
            Some(id)
        );
        assert_eq!(note_id_from_location("/textedit"), None);
        assert_eq!(note_id_from_location("/textedit?id=garbage"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn open_loads_note_from_location() {
        let stored = note("Weekly sync", "Meeting Notes", 1_700_000_000_000);
        let api = Arc::new(FakeApi::with_notes(vec![stored.clone()]));

        let location = format!("/textedit?id={}", stored.id);
        let editor = EditorSession::open(Arc::clone(&api), &location, WINDOW).await;

        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.note_id(), Some(stored.id));
        assert!(editor.is_loaded());
        assert_eq!(editor.title(), "Weekly sync");
        assert_eq!(editor.content(), "Weekly sync content");
        assert_eq!(editor.category(), Some(Category::MeetingNotes));
        assert_eq!(editor.location(), location);
        assert_eq!(editor.creation_date(), format_short_date(stored.created_at));
        assert_eq!(api.calls(), vec![Call::Get(stored.id)]);
    }

    #[tokio::test(start_paused = true)]
    async fn open_without_id_starts_empty() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;

        assert_eq!(editor.note_id(), None);
        assert_eq!(editor.title(), "");
        assert_eq!(editor.location(), "/textedit");
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn keystroke_burst_creates_exactly_once() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;

        editor.set_content("h");
        sleep(Duration::from_millis(300)).await;
        editor.set_content("he");
        sleep(Duration::from_millis(300)).await;
        editor.set_content("hel");

        // Each keystroke restarted the window.
        sleep(Duration::from_millis(900)).await;
        assert!(api.calls().is_empty());

        sleep(Duration::from_millis(200)).await;
        let creates = api.creates();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].content, "hel");
        assert!(creates[0].title.starts_with("New Note at "));
        assert_eq!(creates[0].category, "Others");

        let id = editor.note_id().unwrap();
        assert_eq!(editor.location(), format!("/textedit?id={id}"));
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn later_edits_update_adopted_note() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;

        editor.set_title("Plan");
        sleep(WINDOW + Duration::from_millis(50)).await;
        let id = editor.note_id().unwrap();

        editor.set_content("step one");
        editor.set_category(Some(Category::MindDump));
        sleep(WINDOW + Duration::from_millis(50)).await;

        assert_eq!(api.creates().len(), 1);
        let updates = api.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, id);
        assert_eq!(updates[0].1.title.as_deref(), Some("Plan"));
        assert_eq!(updates[0].1.content.as_deref(), Some("step one"));
        assert_eq!(updates[0].1.category.as_deref(), Some("Mind Dump"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_fields_never_autosave() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;

        editor.set_title("x");
        editor.set_title("");
        sleep(WINDOW * 3).await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn exit_before_window_saves_immediately_once() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;

        editor.set_content("quick thought");
        assert_eq!(editor.exit().await, ExitOutcome::Saved);
        assert_eq!(api.creates().len(), 1);
        assert_eq!(editor.location(), HOME_PATH);
        assert_eq!(editor.phase(), EditorPhase::Exited);

        // The cancelled timer must not fire a second save.
        sleep(WINDOW * 3).await;
        assert_eq!(api.calls().len(), 1);

        editor.set_content("after exit");
        sleep(WINDOW * 3).await;
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exit_with_nothing_typed_skips_save() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;

        assert_eq!(editor.exit().await, ExitOutcome::Empty);
        assert!(api.calls().is_empty());
        assert_eq!(editor.location(), HOME_PATH);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_exit_save_keeps_editor_open() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;
        api.set_offline(true);

        editor.set_content("unsent");
        assert_eq!(editor.exit().await, ExitOutcome::SaveFailed);
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.location(), "/textedit");
        assert_eq!(editor.content(), "unsent");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_autosave_is_swallowed() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;
        api.set_offline(true);

        editor.set_content("lost in transit");
        sleep(WINDOW + Duration::from_millis(50)).await;
        assert_eq!(api.creates().len(), 1);
        assert_eq!(editor.note_id(), None);
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn keys_move_focus_and_escape_exits() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;
        assert_eq!(editor.focus(), Field::Title);

        assert_eq!(
            editor.handle_key(Field::Title, Key::Enter, false).await,
            Some(KeyOutcome::Focused(Field::Content))
        );
        assert_eq!(editor.focus(), Field::Content);

        assert_eq!(
            editor.handle_key(Field::Content, Key::ArrowUp, false).await,
            None
        );
        assert_eq!(editor.focus(), Field::Content);

        editor.handle_key(Field::Content, Key::ArrowUp, true).await;
        assert_eq!(editor.focus(), Field::Title);

        editor.set_title("Escape hatch");
        assert_eq!(
            editor.handle_key(Field::Title, Key::Escape, false).await,
            Some(KeyOutcome::Exited(ExitOutcome::Saved))
        );
        assert_eq!(editor.phase(), EditorPhase::Exited);
        assert_eq!(api.creates().len(), 1);
        assert_eq!(api.creates()[0].title, "Escape hatch");
    }

    #[tokio::test(start_paused = true)]
    async fn missing_note_keeps_id_and_updates() {
        let api = Arc::new(FakeApi::default());
        let id = NoteId::new();
        let editor =
            EditorSession::open(Arc::clone(&api), &format!("/textedit?id={id}"), WINDOW).await;

        assert_eq!(editor.note_id(), Some(id));
        assert_eq!(editor.title(), "");
        assert!(!editor.is_loaded());

        editor.set_content("orphan");
        assert!(!editor.save_now().await);
        assert_eq!(api.updates().len(), 1);
        assert!(api.creates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn escape_reports_failed_exit_save() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;
        api.set_offline(true);

        editor.set_content("unsent");
        assert_eq!(
            editor.handle_key(Field::Content, Key::Escape, false).await,
            Some(KeyOutcome::Exited(ExitOutcome::SaveFailed))
        );
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_category_survives_edits() {
        let stored = note("Bread", "Cooking", 1_700_000_000_000);
        let api = Arc::new(FakeApi::with_notes(vec![stored.clone()]));
        let location = format!("/textedit?id={}", stored.id);
        let editor = EditorSession::open(Arc::clone(&api), &location, WINDOW).await;

        assert_eq!(editor.category(), None);
        assert_eq!(editor.category_label(), "Cooking");

        editor.set_content("more flour");
        assert!(editor.save_now().await);

        let updates = api.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.category.as_deref(), Some("Cooking"));
        assert_eq!(api.stored()[0].category, "Cooking");
    }

    #[tokio::test(start_paused = true)]
    async fn saved_title_is_not_trimmed() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;

        editor.set_title("  spaced ");
        editor.set_content("body");
        assert!(editor.save_now().await);
        assert_eq!(api.creates()[0].title, "  spaced ");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_session_cancels_pending_autosave() {
        let api = Arc::new(FakeApi::default());
        let editor = new_session(&api).await;

        editor.set_content("abandoned");
        drop(editor);

        sleep(WINDOW * 3).await;
        assert!(api.calls().is_empty());
    }
}
