//! Note list state: capture, filtering, category moves and deletion.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Local;
use notes_core::models::ParseCategoryError;
use notes_core::{Category, Note, NoteChanges, NoteDraft, NoteId};

use crate::api::NotesApi;
use crate::editor::EDITOR_PATH;
use crate::keys::{is_capture_shortcut, Key, Modifiers};

/// Which notes the list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Label of the pseudo-category that shows everything
    pub const ALL_LABEL: &'static str = "All Notes";

    /// Filter tabs in display order
    pub fn tabs() -> impl Iterator<Item = Self> {
        std::iter::once(Self::All).chain(Category::ALL.into_iter().map(Self::Only))
    }

    pub fn matches(self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => note.is_in(category),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_LABEL),
            Self::Only(category) => fmt::Display::fmt(category, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::ALL_LABEL) || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

/// Fields of the quick-capture box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureDraft {
    pub title: String,
    pub content: String,
    pub category: Option<Category>,
}

impl CaptureDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// State behind the notes list page.
pub struct NoteListView<A: NotesApi> {
    api: Arc<A>,
    notes: Vec<Note>,
    draft: CaptureDraft,
    filter: CategoryFilter,
}

impl<A: NotesApi> NoteListView<A> {
    pub const fn new(api: Arc<A>) -> Self {
        Self {
            api,
            notes: Vec::new(),
            draft: CaptureDraft {
                title: String::new(),
                content: String::new(),
                category: None,
            },
            filter: CategoryFilter::All,
        }
    }

    /// Create the view and load the list.
    pub async fn load(api: Arc<A>) -> Self {
        let mut view = Self::new(api);
        view.refresh().await;
        view
    }

    /// Replace the local list with the server's.
    pub async fn refresh(&mut self) -> bool {
        match self.api.list_notes().await {
            Ok(notes) => {
                tracing::debug!(count = notes.len(), "Fetched notes");
                self.notes = notes;
                true
            }
            Err(error) => {
                tracing::error!("Error fetching notes: {}", error);
                false
            }
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == *id)
    }

    pub const fn draft(&self) -> &CaptureDraft {
        &self.draft
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn set_draft_category(&mut self, category: Option<Category>) {
        self.draft.category = category;
    }

    /// Save the drafted note.
    ///
    /// Whitespace-only content is never sent. The draft is cleared and the
    /// list refreshed only after the server accepts the note.
    pub async fn capture(&mut self) -> Option<Note> {
        if self.draft.content.trim().is_empty() {
            return None;
        }

        let draft = NoteDraft::with_defaults(
            &self.draft.title,
            self.draft.content.clone(),
            self.draft.category,
            Local::now(),
        );

        match self.api.create_note(&draft).await {
            Ok(note) => {
                tracing::debug!(note_id = %note.id, "Captured note");
                self.draft.clear();
                self.refresh().await;
                Some(note)
            }
            Err(error) => {
                tracing::error!("Error saving note: {}", error);
                None
            }
        }
    }

    /// Run the capture shortcut if `key` with `modifiers` is one.
    pub async fn handle_shortcut(&mut self, modifiers: Modifiers, key: Key) -> Option<Note> {
        if is_capture_shortcut(modifiers, key) {
            self.capture().await
        } else {
            None
        }
    }

    /// Move a note to another category, patching the local copy on success.
    pub async fn reassign_category(&mut self, id: &NoteId, category: Category) -> bool {
        match self
            .api
            .update_note(id, &NoteChanges::category(category))
            .await
        {
            Ok(_) => {
                if let Some(note) = self.notes.iter_mut().find(|note| note.id == *id) {
                    note.category = category.label().to_string();
                }
                true
            }
            Err(error) => {
                tracing::error!("Error updating note category: {}", error);
                false
            }
        }
    }

    /// Delete a note once `confirm` agrees.
    ///
    /// `confirm` sees the note when it is in the local list. Declining sends
    /// nothing. On success the note is dropped locally without a refetch.
    pub async fn delete(
        &mut self,
        id: &NoteId,
        confirm: impl FnOnce(Option<&Note>) -> bool,
    ) -> bool {
        if !confirm(self.find(id)) {
            return false;
        }

        match self.api.delete_note(id).await {
            Ok(()) => {
                self.notes.retain(|note| note.id != *id);
                true
            }
            Err(error) => {
                tracing::error!("Error deleting note: {}", error);
                false
            }
        }
    }

    pub const fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Notes passing the current filter, in server order
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| self.filter.matches(note))
            .collect()
    }

    /// Location of the editor for an existing note
    pub fn editor_location(id: &NoteId) -> String {
        format!("{EDITOR_PATH}?id={id}")
    }

    /// Location of the editor for a brand-new note
    pub fn new_note_location() -> String {
        EDITOR_PATH.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fake::{note, Call, FakeApi};

    fn seeded() -> Arc<FakeApi> {
        Arc::new(FakeApi::with_notes(vec![
            note("journal", "Daily Journal", 300),
            note("standup", "Meeting Notes", 200),
            note("brain", "Mind Dump", 100),
            note("retro", "Meeting Notes", 50),
        ]))
    }

    #[tokio::test]
    async fn load_fetches_full_list() {
        let api = seeded();
        let view = NoteListView::load(api.clone()).await;
        assert_eq!(view.notes().len(), 4);
        assert_eq!(view.notes()[0].title, "journal");
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn capture_without_title_uses_defaults() {
        let api = Arc::new(FakeApi::default());
        let mut view = NoteListView::load(api.clone()).await;

        view.set_draft_content("remember the milk");
        let created = view.capture().await.unwrap();

        assert!(created.title.starts_with("New Note at "));
        assert_eq!(created.category, "Others");
        assert_eq!(created.content, "remember the milk");
        assert_eq!(view.draft(), &CaptureDraft::default());
        assert_eq!(view.notes().len(), 1);
        assert_eq!(api.calls().last(), Some(&Call::List));
    }

    #[tokio::test]
    async fn capture_trims_title_and_keeps_category() {
        let api = Arc::new(FakeApi::default());
        let mut view = NoteListView::new(api.clone());

        view.set_draft_title("  Candidate A ");
        view.set_draft_content("strong on systems");
        view.set_draft_category(Some(Category::InterviewNotes));
        view.capture().await.unwrap();

        let drafts = api.creates();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Candidate A");
        assert_eq!(drafts[0].category, "Interview Notes");
    }

    #[tokio::test]
    async fn capture_skips_blank_content() {
        let api = Arc::new(FakeApi::default());
        let mut view = NoteListView::new(api.clone());

        view.set_draft_title("only a title");
        view.set_draft_content("  \n ");
        assert!(view.capture().await.is_none());
        assert!(api.calls().is_empty());
        assert_eq!(view.draft().title, "only a title");
    }

    #[tokio::test]
    async fn failed_capture_keeps_draft() {
        let api = Arc::new(FakeApi::default());
        let mut view = NoteListView::new(api.clone());
        api.set_offline(true);

        view.set_draft_content("draft survives");
        assert!(view.capture().await.is_none());
        assert_eq!(view.draft().content, "draft survives");
        assert!(view.notes().is_empty());
    }

    #[tokio::test]
    async fn shortcut_captures_only_with_modifier() {
        let api = Arc::new(FakeApi::default());
        let mut view = NoteListView::new(api.clone());
        view.set_draft_content("via keyboard");

        assert!(view
            .handle_shortcut(Modifiers::default(), Key::Enter)
            .await
            .is_none());
        assert!(api.creates().is_empty());

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert!(view.handle_shortcut(ctrl, Key::Enter).await.is_some());
        assert_eq!(api.creates().len(), 1);
    }

    #[tokio::test]
    async fn reassign_category_patches_locally_without_refetch() {
        let api = seeded();
        let mut view = NoteListView::load(api.clone()).await;
        let id = view.notes()[2].id;

        assert!(view.reassign_category(&id, Category::Others).await);
        assert_eq!(view.find(&id).unwrap().category, "Others");
        assert_eq!(
            api.calls(),
            vec![Call::List, Call::Update(id, NoteChanges::category(Category::Others))]
        );
    }

    #[tokio::test]
    async fn failed_reassign_leaves_state() {
        let api = seeded();
        let mut view = NoteListView::load(api.clone()).await;
        let id = view.notes()[0].id;
        api.set_offline(true);

        assert!(!view.reassign_category(&id, Category::Others).await);
        assert_eq!(view.find(&id).unwrap().category, "Daily Journal");
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let api = seeded();
        let mut view = NoteListView::load(api.clone()).await;
        let id = view.notes()[1].id;

        assert!(!view.delete(&id, |_| false).await);
        assert_eq!(view.notes().len(), 4);
        assert_eq!(api.calls(), vec![Call::List]);

        let mut seen = None;
        assert!(
            view.delete(&id, |note| {
                seen = note.map(|note| note.title.clone());
                true
            })
            .await
        );
        assert_eq!(seen.as_deref(), Some("standup"));
        assert!(view.find(&id).is_none());
        assert_eq!(view.notes().len(), 3);
        assert_eq!(api.calls(), vec![Call::List, Call::Delete(id)]);
    }

    #[tokio::test]
    async fn filter_shows_exact_category_matches() {
        let api = seeded();
        let mut view = NoteListView::load(api).await;

        view.set_filter(CategoryFilter::Only(Category::MeetingNotes));
        let titles: Vec<&str> = view
            .visible_notes()
            .iter()
            .map(|note| note.title.as_str())
            .collect();
        assert_eq!(titles, vec!["standup", "retro"]);

        view.set_filter(CategoryFilter::Only(Category::InterviewNotes));
        assert!(view.visible_notes().is_empty());

        view.set_filter(CategoryFilter::All);
        assert_eq!(view.visible_notes().len(), 4);
    }

    #[test]
    fn filter_parses_all_notes_and_categories() {
        assert_eq!("All Notes".parse(), Ok(CategoryFilter::All));
        assert_eq!(
            "mind-dump".parse(),
            Ok(CategoryFilter::Only(Category::MindDump))
        );
        assert!("nope".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::tabs().count(), 6);
        assert_eq!(CategoryFilter::All.to_string(), "All Notes");
    }

    #[test]
    fn editor_locations() {
        let id = NoteId::new();
        assert_eq!(
            NoteListView::<FakeApi>::editor_location(&id),
            format!("/textedit?id={id}")
        );
        assert_eq!(NoteListView::<FakeApi>::new_note_location(), "/textedit");
    }
}
