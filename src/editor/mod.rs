//! Editor session state and commands.
//!
//! An [`EditorSession`] holds what a presentation layer would otherwise keep
//! in widget state: which template is open, which representation the buffer
//! is in, which category the list is filtered to, and the transient styles.
//! Every user action is an [`EditorCommand`] run through [`dispatch`].
//!
//! ```rust
//! use mailbook::editor::{EditorCommand, EditorSession, dispatch};
//! use mailbook::models::TemplateDraft;
//! use mailbook::storage::SqliteTemplateStore;
//!
//! let store = SqliteTemplateStore::in_memory()?;
//! let mut session = EditorSession::new();
//!
//! let draft = TemplateDraft::new("Welcome", "Sales", "Hello", "");
//! let outcome = dispatch(EditorCommand::SaveTemplate(draft), &mut session, &store)?;
//! assert_eq!(outcome.categories, vec!["Sales".to_string()]);
//! assert!(session.current_template().is_some());
//! # Ok::<(), mailbook::Error>(())
//! ```

mod commands;

pub use commands::{
    CommandHandler, CommandOutcome, CreateCategoryHandler, DeleteCategoryHandler,
    DeleteTemplateHandler, EditorCommand, NewTemplateHandler, SaveTemplateHandler,
    SelectCategoryHandler, SelectTemplateHandler, SwitchModeHandler, dispatch,
};

use crate::content::{DisplayMode, StyleSpans};
use crate::models::TemplateId;

/// Process-local selection state of one editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    current_template: Option<TemplateId>,
    mode: DisplayMode,
    selected_category: Option<String>,
    styles: StyleSpans,
}

impl EditorSession {
    /// Creates a session with nothing open, in plain mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_template: None,
            mode: DisplayMode::Plain,
            selected_category: None,
            styles: StyleSpans::new(),
        }
    }

    /// Id of the open template; `None` while editing a new, unsaved one.
    #[must_use]
    pub const fn current_template(&self) -> Option<TemplateId> {
        self.current_template
    }

    /// Returns `true` when the next save will insert a new template.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.current_template.is_none()
    }

    /// Current display mode.
    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Category the template list is filtered to.
    #[must_use]
    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// Transient styles of the open buffer.
    #[must_use]
    pub const fn styles(&self) -> &StyleSpans {
        &self.styles
    }

    /// Mutable access to the transient styles.
    pub fn styles_mut(&mut self) -> &mut StyleSpans {
        &mut self.styles
    }

    /// Returns to the "new template" state: nothing open, plain mode, no styles.
    ///
    /// The category filter is kept.
    pub fn reset(&mut self) {
        self.current_template = None;
        self.mode = DisplayMode::Plain;
        self.styles.clear();
    }

    pub(crate) fn open(&mut self, id: TemplateId) {
        self.current_template = Some(id);
        self.styles.clear();
    }

    pub(crate) fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            self.mode = mode;
            self.styles.clear();
        }
    }

    pub(crate) fn select_category(&mut self, category: Option<String>) {
        self.selected_category = category;
    }
}
