//! Keyboard affordances for the list and editor views.

/// Keys the views react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    Char(char),
    Other,
}

/// Modifier state accompanying a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Only the platform command modifier (Ctrl, or Cmd on macOS)
    pub const fn command() -> Self {
        Self {
            ctrl: cfg!(not(target_os = "macos")),
            meta: cfg!(target_os = "macos"),
            shift: false,
            alt: false,
        }
    }
}

/// Editor input fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Title,
    Content,
}

/// What an editor key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKeyAction {
    Focus(Field),
    Exit,
}

/// Ctrl+Enter or Cmd+Enter captures the drafted note.
pub const fn is_capture_shortcut(modifiers: Modifiers, key: Key) -> bool {
    (modifiers.ctrl || modifiers.meta) && matches!(key, Key::Enter)
}

/// Map a key press in `field` to an editor action.
///
/// `caret_at_start` is whether the content caret sits at offset 0; ArrowUp
/// only leaves the content field from there.
pub const fn editor_key_action(
    field: Field,
    key: Key,
    caret_at_start: bool,
) -> Option<EditorKeyAction> {
    match (field, key) {
        (_, Key::Escape) => Some(EditorKeyAction::Exit),
        (Field::Title, Key::Enter | Key::ArrowDown) => Some(EditorKeyAction::Focus(Field::Content)),
        (Field::Content, Key::ArrowUp) if caret_at_start => {
            Some(EditorKeyAction::Focus(Field::Title))
        }
        _ => None,
    }
}
