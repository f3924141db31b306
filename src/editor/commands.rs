//! Editor commands and their handlers.
//!
//! # Architecture
//!
//! ```text
//! EditorCommand (enum)
//!   ├── NewTemplate          -> NewTemplateHandler
//!   ├── SaveTemplate(draft)  -> SaveTemplateHandler
//!   ├── DeleteTemplate(id)   -> DeleteTemplateHandler
//!   ├── SelectCategory(name) -> SelectCategoryHandler
//!   ├── SelectTemplate(id)   -> SelectTemplateHandler
//!   ├── CreateCategory(name) -> CreateCategoryHandler
//!   ├── DeleteCategory(name) -> DeleteCategoryHandler
//!   └── SwitchMode           -> SwitchModeHandler
//! ```
//!
//! Handlers work on a copy of the session. [`dispatch`] writes the copy back
//! only when the handler succeeds, so a failed command leaves the session as
//! it was.

use super::EditorSession;
use crate::content::DisplayMode;
use crate::models::{Template, TemplateDraft, TemplateId, TemplateSummary};
use crate::storage::TemplateStore;
use crate::Result;
use serde::Serialize;

/// A user action against the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Start a new, unsaved template.
    NewTemplate,
    /// Save the draft, inserting or updating depending on the session.
    SaveTemplate(TemplateDraft),
    /// Delete a template by id.
    DeleteTemplate(TemplateId),
    /// Filter the template list to a category.
    SelectCategory(String),
    /// Open a template for editing.
    SelectTemplate(TemplateId),
    /// Create a category if it does not exist.
    CreateCategory(String),
    /// Delete a category together with its templates.
    DeleteCategory(String),
    /// Convert the buffer to another display mode.
    SwitchMode {
        /// Mode to switch to.
        target: DisplayMode,
        /// Buffer contents in the current mode.
        buffer: String,
    },
}

impl EditorCommand {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NewTemplate => "new_template",
            Self::SaveTemplate(_) => "save_template",
            Self::DeleteTemplate(_) => "delete_template",
            Self::SelectCategory(_) => "select_category",
            Self::SelectTemplate(_) => "select_template",
            Self::CreateCategory(_) => "create_category",
            Self::DeleteCategory(_) => "delete_category",
            Self::SwitchMode { .. } => "switch_mode",
        }
    }

    /// Builds the handler for this command.
    #[must_use]
    pub fn into_handler(self) -> Box<dyn CommandHandler> {
        match self {
            Self::NewTemplate => Box::new(NewTemplateHandler),
            Self::SaveTemplate(draft) => Box::new(SaveTemplateHandler { draft }),
            Self::DeleteTemplate(id) => Box::new(DeleteTemplateHandler { id }),
            Self::SelectCategory(name) => Box::new(SelectCategoryHandler { name }),
            Self::SelectTemplate(id) => Box::new(SelectTemplateHandler { id }),
            Self::CreateCategory(name) => Box::new(CreateCategoryHandler { name }),
            Self::DeleteCategory(name) => Box::new(DeleteCategoryHandler { name }),
            Self::SwitchMode { target, buffer } => {
                Box::new(SwitchModeHandler { target, buffer })
            },
        }
    }
}

/// What the presentation layer needs to redraw after a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// All category names, reloaded.
    pub categories: Vec<String>,
    /// Templates in the session's selected category, or all of them.
    pub templates: Vec<TemplateSummary>,
    /// The template that was opened, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    /// New buffer contents, if the command produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<String>,
    /// Status line for the user.
    pub message: String,
}

impl CommandOutcome {
    /// Reloads both lists for the session's category filter.
    fn reload(
        session: &EditorSession,
        store: &dyn TemplateStore,
        message: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            categories: store.list_categories()?,
            templates: store.list_templates(session.selected_category())?,
            template: None,
            buffer: None,
            message: message.into(),
        })
    }

    fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    fn with_buffer(mut self, buffer: String) -> Self {
        self.buffer = Some(buffer);
        self
    }
}

/// Executes one command against a session and a store.
pub trait CommandHandler {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns the store error that stopped the command.
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome>;
}

/// Routes a command to its handler.
///
/// # Errors
///
/// Returns the handler's error; `session` is unchanged in that case.
pub fn dispatch(
    command: EditorCommand,
    session: &mut EditorSession,
    store: &dyn TemplateStore,
) -> Result<CommandOutcome> {
    let name = command.name();
    tracing::debug!(command = name, "Dispatching editor command");

    let mut working = session.clone();
    match command.into_handler().handle(&mut working, store) {
        Ok(outcome) => {
            *session = working;
            Ok(outcome)
        },
        Err(e) => {
            tracing::warn!(
                command = name,
                error = %e,
                recoverable = e.is_recoverable(),
                "Editor command failed"
            );
            Err(e)
        },
    }
}

/// Handles [`EditorCommand::NewTemplate`].
pub struct NewTemplateHandler;

impl CommandHandler for NewTemplateHandler {
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome> {
        session.reset();
        Ok(CommandOutcome::reload(session, store, "New template")?.with_buffer(String::new()))
    }
}

/// Handles [`EditorCommand::SaveTemplate`].
pub struct SaveTemplateHandler {
    draft: TemplateDraft,
}

impl CommandHandler for SaveTemplateHandler {
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome> {
        let id = store.save_template(session.current_template(), &self.draft)?;
        let message = if session.is_new() {
            format!("Created template '{}' ({id})", self.draft.name)
        } else {
            format!("Saved template '{}' ({id})", self.draft.name)
        };
        session.current_template = Some(id);
        CommandOutcome::reload(session, store, message)
    }
}

/// Handles [`EditorCommand::DeleteTemplate`].
pub struct DeleteTemplateHandler {
    id: TemplateId,
}

impl CommandHandler for DeleteTemplateHandler {
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome> {
        let removed = store.delete_template(self.id)?;
        if session.current_template() == Some(self.id) {
            session.reset();
        }
        let message = if removed {
            format!("Deleted template {}", self.id)
        } else {
            format!("Template {} was already gone", self.id)
        };
        CommandOutcome::reload(session, store, message)
    }
}

/// Handles [`EditorCommand::SelectCategory`].
pub struct SelectCategoryHandler {
    name: String,
}

impl CommandHandler for SelectCategoryHandler {
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome> {
        session.select_category(Some(self.name.clone()));
        CommandOutcome::reload(session, store, format!("Category '{}'", self.name))
    }
}

/// Handles [`EditorCommand::SelectTemplate`].
///
/// A template deleted since the list was drawn is reported in the message,
/// not as an error.
pub struct SelectTemplateHandler {
    id: TemplateId,
}

impl CommandHandler for SelectTemplateHandler {
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome> {
        let Some(template) = store.get_template(self.id)? else {
            return CommandOutcome::reload(
                session,
                store,
                format!("Template {} no longer exists", self.id),
            );
        };

        session.open(template.id);
        let buffer = match session.mode() {
            DisplayMode::Plain => template.plain_content.clone(),
            DisplayMode::Markup => template.markup_or_rendered(),
        };
        let message = format!("Opened template '{}'", template.name);
        Ok(CommandOutcome::reload(session, store, message)?
            .with_buffer(buffer)
            .with_template(template))
    }
}

/// Handles [`EditorCommand::CreateCategory`].
pub struct CreateCategoryHandler {
    name: String,
}

impl CommandHandler for CreateCategoryHandler {
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome> {
        let message = if store.create_category(&self.name)? {
            format!("Created category '{}'", self.name)
        } else {
            format!("Category '{}' already exists", self.name)
        };
        CommandOutcome::reload(session, store, message)
    }
}

/// Handles [`EditorCommand::DeleteCategory`].
pub struct DeleteCategoryHandler {
    name: String,
}

impl CommandHandler for DeleteCategoryHandler {
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome> {
        let open_in_category = match session.current_template() {
            Some(id) => store
                .get_template(id)?
                .is_some_and(|t| t.category == self.name),
            None => false,
        };

        let removed = store.delete_category(&self.name)?;

        if open_in_category {
            session.reset();
        }
        if session.selected_category() == Some(self.name.as_str()) {
            session.select_category(None);
        }

        let message = format!(
            "Deleted category '{}' and {removed} template(s)",
            self.name
        );
        CommandOutcome::reload(session, store, message)
    }
}

/// Handles [`EditorCommand::SwitchMode`].
pub struct SwitchModeHandler {
    target: DisplayMode,
    buffer: String,
}

impl CommandHandler for SwitchModeHandler {
    fn handle(
        &self,
        session: &mut EditorSession,
        store: &dyn TemplateStore,
    ) -> Result<CommandOutcome> {
        let converted = session.mode().switch(&self.buffer, self.target);
        session.set_mode(self.target);
        let message = format!("Switched to {} mode", self.target);
        Ok(CommandOutcome::reload(session, store, message)?.with_buffer(converted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StyleTag;
    use crate::Error;
    use crate::storage::SqliteTemplateStore;

    fn setup() -> (SqliteTemplateStore, EditorSession) {
        (SqliteTemplateStore::in_memory().unwrap(), EditorSession::new())
    }

    fn save(
        session: &mut EditorSession,
        store: &SqliteTemplateStore,
        name: &str,
        category: &str,
    ) -> TemplateId {
        let draft = TemplateDraft::new(name, category, format!("{name} body"), "");
        dispatch(EditorCommand::SaveTemplate(draft), session, store).unwrap();
        session.current_template().unwrap()
    }

    #[test]
    fn test_save_inserts_then_updates() {
        let (store, mut session) = setup();
        let id = save(&mut session, &store, "Welcome", "Sales");

        let draft = TemplateDraft::new("Welcome v2", "Sales", "Hi", "");
        let outcome = dispatch(EditorCommand::SaveTemplate(draft), &mut session, &store).unwrap();

        assert_eq!(session.current_template(), Some(id));
        assert_eq!(outcome.templates, vec![TemplateSummary::new(id.get(), "Welcome v2")]);
        assert_eq!(outcome.categories, vec!["Sales".to_string()]);
    }

    #[test]
    fn test_failed_save_leaves_session_unchanged() {
        let (store, mut session) = setup();
        save(&mut session, &store, "Welcome", "Sales");
        session.styles_mut().toggle(StyleTag::Bold, 0..2);
        let before = session.clone();

        let draft = TemplateDraft::new("", "Sales", "x", "");
        let err = dispatch(EditorCommand::SaveTemplate(draft), &mut session, &store).unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(session, before);
    }

    #[test]
    fn test_new_template_resets_session() {
        let (store, mut session) = setup();
        save(&mut session, &store, "Welcome", "Sales");

        let outcome = dispatch(EditorCommand::NewTemplate, &mut session, &store).unwrap();
        assert!(session.is_new());
        assert_eq!(outcome.buffer.as_deref(), Some(""));
    }

    #[test]
    fn test_select_template_loads_buffer_for_mode() {
        let (store, mut session) = setup();
        let draft = TemplateDraft::new("Promo", "Sales", "plain body", "<b>markup</b>");
        let id = store.save_template(None, &draft).unwrap();

        let outcome = dispatch(EditorCommand::SelectTemplate(id), &mut session, &store).unwrap();
        assert_eq!(session.current_template(), Some(id));
        assert_eq!(outcome.buffer.as_deref(), Some("plain body"));
        assert_eq!(outcome.template.map(|t| t.name), Some("Promo".to_string()));

        dispatch(
            EditorCommand::SwitchMode {
                target: DisplayMode::Markup,
                buffer: "plain body".to_string(),
            },
            &mut session,
            &store,
        )
        .unwrap();
        let outcome = dispatch(EditorCommand::SelectTemplate(id), &mut session, &store).unwrap();
        assert_eq!(outcome.buffer.as_deref(), Some("<b>markup</b>"));
    }

    #[test]
    fn test_select_template_renders_markup_when_none_saved() {
        let (store, mut session) = setup();
        let id = store
            .save_template(None, &TemplateDraft::new("Plain", "Sales", "Hi there", ""))
            .unwrap();

        dispatch(
            EditorCommand::SwitchMode {
                target: DisplayMode::Markup,
                buffer: String::new(),
            },
            &mut session,
            &store,
        )
        .unwrap();
        let outcome = dispatch(EditorCommand::SelectTemplate(id), &mut session, &store).unwrap();
        assert_eq!(
            outcome.buffer.as_deref(),
            Some("<html><body>Hi there</body></html>")
        );
    }

    #[test]
    fn test_select_missing_template_is_not_an_error() {
        let (store, mut session) = setup();
        let id = save(&mut session, &store, "Open", "Ops");
        let before = session.clone();

        let outcome = dispatch(
            EditorCommand::SelectTemplate(TemplateId::new(999)),
            &mut session,
            &store,
        )
        .unwrap();

        assert!(outcome.message.contains("no longer exists"));
        assert!(outcome.template.is_none());
        assert_eq!(session, before);
        assert_eq!(session.current_template(), Some(id));
    }

    #[test]
    fn test_delete_open_template_resets_session() {
        let (store, mut session) = setup();
        let id = save(&mut session, &store, "Doomed", "Ops");

        let outcome = dispatch(EditorCommand::DeleteTemplate(id), &mut session, &store).unwrap();
        assert!(session.is_new());
        assert!(outcome.templates.is_empty());

        let outcome = dispatch(EditorCommand::DeleteTemplate(id), &mut session, &store).unwrap();
        assert!(outcome.message.contains("already gone"));
    }

    #[test]
    fn test_delete_other_template_keeps_session() {
        let (store, mut session) = setup();
        let other = store
            .save_template(None, &TemplateDraft::new("Other", "Ops", "", ""))
            .unwrap();
        let open = save(&mut session, &store, "Open", "Ops");

        dispatch(EditorCommand::DeleteTemplate(other), &mut session, &store).unwrap();
        assert_eq!(session.current_template(), Some(open));
    }

    #[test]
    fn test_select_category_filters_templates() {
        let (store, mut session) = setup();
        store
            .save_template(None, &TemplateDraft::new("A", "Sales", "", ""))
            .unwrap();
        store
            .save_template(None, &TemplateDraft::new("B", "Support", "", ""))
            .unwrap();

        let outcome = dispatch(
            EditorCommand::SelectCategory("Support".to_string()),
            &mut session,
            &store,
        )
        .unwrap();

        assert_eq!(session.selected_category(), Some("Support"));
        assert_eq!(outcome.templates.len(), 1);
        assert_eq!(outcome.templates[0].name, "B");
    }

    #[test]
    fn test_delete_category_cascades_and_resets() {
        let (store, mut session) = setup();
        dispatch(
            EditorCommand::SelectCategory("Old".to_string()),
            &mut session,
            &store,
        )
        .unwrap();
        save(&mut session, &store, "Gone", "Old");
        store
            .save_template(None, &TemplateDraft::new("Stays", "New", "", ""))
            .unwrap();

        let outcome = dispatch(
            EditorCommand::DeleteCategory("Old".to_string()),
            &mut session,
            &store,
        )
        .unwrap();

        assert!(session.is_new());
        assert_eq!(session.selected_category(), None);
        assert_eq!(outcome.categories, vec!["New".to_string()]);
        assert_eq!(outcome.templates.len(), 1);
        assert!(outcome.message.contains("1 template"));
    }

    #[test]
    fn test_create_category_reports_existing() {
        let (store, mut session) = setup();
        let outcome = dispatch(
            EditorCommand::CreateCategory("Sales".to_string()),
            &mut session,
            &store,
        )
        .unwrap();
        assert!(outcome.message.starts_with("Created"));

        let outcome = dispatch(
            EditorCommand::CreateCategory("Sales".to_string()),
            &mut session,
            &store,
        )
        .unwrap();
        assert!(outcome.message.contains("already exists"));
        assert_eq!(outcome.categories.len(), 1);
    }

    #[test]
    fn test_switch_mode_converts_and_clears_styles() {
        let (store, mut session) = setup();
        session.styles_mut().toggle(StyleTag::Bold, 0..2);

        let outcome = dispatch(
            EditorCommand::SwitchMode {
                target: DisplayMode::Markup,
                buffer: "Hi".to_string(),
            },
            &mut session,
            &store,
        )
        .unwrap();

        assert_eq!(outcome.buffer.as_deref(), Some("<html><body>Hi</body></html>"));
        assert_eq!(session.mode(), DisplayMode::Markup);
        assert!(session.styles().is_empty());

        let outcome = dispatch(
            EditorCommand::SwitchMode {
                target: DisplayMode::Plain,
                buffer: "a<b>c".to_string(),
            },
            &mut session,
            &store,
        )
        .unwrap();
        assert_eq!(outcome.buffer.as_deref(), Some("a&lt;b&gt;c"));
    }
}
