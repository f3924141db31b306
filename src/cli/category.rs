//! Category CLI commands.

use super::OutputFormat;
use crate::editor::{EditorCommand, EditorSession, dispatch};
use crate::services::TemplateService;

/// Creates a category.
///
/// With `strict`, an existing name is an error instead of a no-op.
///
/// # Errors
///
/// Returns an error for an empty or (strict) duplicate name.
pub fn cmd_category_create(
    service: &TemplateService,
    name: String,
    strict: bool,
) -> anyhow::Result<()> {
    if strict {
        service.store().add_category(&name)?;
        println!("Created category '{name}'");
        return Ok(());
    }

    let mut session = EditorSession::new();
    let outcome = dispatch(
        EditorCommand::CreateCategory(name),
        &mut session,
        service.store(),
    )?;
    println!("{}", outcome.message);
    Ok(())
}

/// Deletes a category and its templates.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn cmd_category_delete(service: &TemplateService, name: String) -> anyhow::Result<()> {
    let mut session = EditorSession::new();
    let outcome = dispatch(
        EditorCommand::DeleteCategory(name),
        &mut session,
        service.store(),
    )?;
    println!("{}", outcome.message);
    Ok(())
}

/// Lists category names.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn cmd_category_list(service: &TemplateService, format: Option<String>) -> anyhow::Result<()> {
    let categories = service.store().list_categories()?;

    match format.as_deref().map_or(OutputFormat::Table, OutputFormat::parse) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
        OutputFormat::Table | OutputFormat::Text => {
            if categories.is_empty() {
                println!("No categories found.");
            }
            for name in &categories {
                println!("{name}");
            }
        },
    }
    Ok(())
}
