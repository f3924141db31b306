//! Integration tests for mailbook.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use mailbook::content::{DisplayMode, StyleTag, markup_to_plain, plain_to_markup};
use mailbook::editor::{EditorCommand, EditorSession, dispatch};
use mailbook::io::Format;
use mailbook::models::{TemplateDraft, TemplateId, TemplateSummary};
use mailbook::services::{ImportOptions, TemplateService, open_store};
use mailbook::storage::{SqliteTemplateStore, TemplateStore};
use mailbook::{Error, MailbookConfig};
use std::sync::Arc;
use tempfile::TempDir;

fn memory_store() -> SqliteTemplateStore {
    SqliteTemplateStore::in_memory().unwrap()
}

#[test]
fn test_error_types() {
    let err = Error::Validation("template name is required".to_string());
    assert!(err.to_string().contains("validation failed"));

    let err = Error::storage("open_template_db", "unable to open database file");
    let display = err.to_string();
    assert!(display.contains("open_template_db"));
    assert!(display.contains("unable to open database file"));

    let err = Error::Config("bad toml".to_string());
    assert!(err.to_string().contains("configuration error"));
    assert!(err.is_recoverable());
}

/// The concrete store scenarios.
mod store_scenarios {
    use super::*;

    #[test]
    fn test_create_save_and_list() {
        let store = memory_store();
        store.create_category("Sales").unwrap();

        let id = store
            .save_template(None, &TemplateDraft::new("Welcome", "Sales", "Hello", ""))
            .unwrap();

        assert_eq!(id, TemplateId::new(1));
        assert_eq!(
            store.list_templates(Some("Sales")).unwrap(),
            vec![TemplateSummary::new(1, "Welcome")]
        );
    }

    #[test]
    fn test_empty_name_leaves_store_unchanged() {
        let store = memory_store();
        let err = store
            .save_template(None, &TemplateDraft::new("", "Sales", "Hello", ""))
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(store.list_categories().unwrap().is_empty());
        assert!(store.list_templates(None).unwrap().is_empty());
    }

    #[test]
    fn test_every_saved_category_is_listed() {
        let store = memory_store();
        for (name, category) in [("a", "One"), ("b", "Two"), ("c", "One")] {
            store
                .save_template(None, &TemplateDraft::new(name, category, "", ""))
                .unwrap();
        }

        let categories = store.list_categories().unwrap();
        for template in store.list_templates(None).unwrap() {
            let template = store.get_template(template.id).unwrap().unwrap();
            assert!(categories.contains(&template.category));
        }
        assert_eq!(categories, vec!["One", "Two"]);
    }

    #[test]
    fn test_delete_category_leaves_no_orphans() {
        let store = memory_store();
        store
            .save_template(None, &TemplateDraft::new("a", "Temp", "", ""))
            .unwrap();
        store.delete_category("Temp").unwrap();

        assert!(store.list_templates(Some("Temp")).unwrap().is_empty());
        assert!(store.list_templates(None).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_readers_share_store() {
        let store = Arc::new(memory_store());
        store
            .save_template(None, &TemplateDraft::new("Shared", "Ops", "", ""))
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.list_templates(None).unwrap().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    }
}

mod content_scenarios {
    use super::*;

    #[test]
    fn test_conversions() {
        assert!(plain_to_markup("a<b").contains("a<b"));
        assert_eq!(markup_to_plain("a<b>c"), "a&lt;b&gt;c");
    }

    #[test]
    fn test_round_trip_is_lossy() {
        let plain = "Hello";
        let back = markup_to_plain(&plain_to_markup(plain));
        assert_ne!(back, plain);
        assert!(back.contains(plain));
    }
}

/// End-to-end editor flows over an on-disk store.
mod editor_flows {
    use super::*;

    #[test]
    fn test_authoring_session() {
        let dir = TempDir::new().unwrap();
        let config = MailbookConfig::default().with_data_dir(dir.path());
        let store = open_store(&config).unwrap();
        let mut session = EditorSession::new();

        dispatch(
            EditorCommand::CreateCategory("Sales".to_string()),
            &mut session,
            &store,
        )
        .unwrap();
        dispatch(
            EditorCommand::SelectCategory("Sales".to_string()),
            &mut session,
            &store,
        )
        .unwrap();

        let outcome = dispatch(
            EditorCommand::SaveTemplate(TemplateDraft::new("Welcome", "Sales", "Hello", "")),
            &mut session,
            &store,
        )
        .unwrap();
        let id = session.current_template().unwrap();
        assert_eq!(outcome.templates, vec![TemplateSummary::new(id.get(), "Welcome")]);

        session.styles_mut().toggle(StyleTag::Bold, 0..5);
        let outcome = dispatch(
            EditorCommand::SwitchMode {
                target: DisplayMode::Markup,
                buffer: "Hello".to_string(),
            },
            &mut session,
            &store,
        )
        .unwrap();
        let markup = outcome.buffer.unwrap();
        assert_eq!(markup, "<html><body>Hello</body></html>");
        assert!(session.styles().is_empty());

        dispatch(
            EditorCommand::SaveTemplate(TemplateDraft::new("Welcome", "Sales", "Hello", markup)),
            &mut session,
            &store,
        )
        .unwrap();
        assert_eq!(session.current_template(), Some(id));

        let stored = store.get_template(id).unwrap().unwrap();
        assert_eq!(stored.markup_content, "<html><body>Hello</body></html>");
        assert!(stored.updated_at > stored.created_at);

        dispatch(EditorCommand::NewTemplate, &mut session, &store).unwrap();
        assert!(session.is_new());
        assert_eq!(session.mode(), DisplayMode::Plain);
    }

    #[test]
    fn test_stale_selection_after_external_delete() {
        let store = memory_store();
        let mut session = EditorSession::new();

        let id = store
            .save_template(None, &TemplateDraft::new("Gone", "Ops", "", ""))
            .unwrap();
        dispatch(EditorCommand::SelectTemplate(id), &mut session, &store).unwrap();

        // Another front end deletes the row
        store.delete_template(id).unwrap();

        let err = dispatch(
            EditorCommand::SaveTemplate(TemplateDraft::new("Gone", "Ops", "edited", "")),
            &mut session,
            &store,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(session.current_template(), Some(id));
        assert!(store.list_templates(None).unwrap().is_empty());

        dispatch(EditorCommand::NewTemplate, &mut session, &store).unwrap();
        dispatch(
            EditorCommand::SaveTemplate(TemplateDraft::new("Gone", "Ops", "edited", "")),
            &mut session,
            &store,
        )
        .unwrap();
        assert_eq!(store.list_templates(None).unwrap().len(), 1);
    }
}

mod import_export {
    use super::*;

    #[test]
    fn test_json_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let service = TemplateService::new(Arc::new(memory_store()));
        let id = service
            .store()
            .save_template(
                None,
                &TemplateDraft::new("Promo", "Marketing", "Big sale", "<b>Big sale</b>"),
            )
            .unwrap();

        let path = dir.path().join("promo.json");
        service.export_to_path(id, &path, None).unwrap();

        let copy = service
            .import_from_path(&path, &ImportOptions::default())
            .unwrap();
        assert_ne!(copy, id);

        let original = service.require(id).unwrap();
        let imported = service.require(copy).unwrap();
        assert_eq!(imported.name, original.name);
        assert_eq!(imported.category, original.category);
        assert_eq!(imported.plain_content, original.plain_content);
        assert_eq!(imported.markup_content, original.markup_content);
        assert!(imported.created_at >= original.created_at);
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let dir = TempDir::new().unwrap();
        let service = TemplateService::new(Arc::new(memory_store()));
        let path = dir.path().join("snippet.txt");
        std::fs::write(&path, "<i>hi</i>").unwrap();

        let options = ImportOptions::default()
            .with_format(Format::Markup)
            .with_category("Snippets");
        let id = service.import_from_path(&path, &options).unwrap();

        let template = service.require(id).unwrap();
        assert_eq!(template.name, "snippet");
        assert_eq!(template.markup_content, "<i>hi</i>");
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let service = TemplateService::new(Arc::new(memory_store()));
        let err = service
            .import_from_path(&dir.path().join("nope.json"), &ImportOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }
}
