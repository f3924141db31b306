//! Template CLI commands.

use super::{OutputFormat, print_templates_table};
use crate::content::DisplayMode;
use crate::editor::{EditorCommand, EditorSession, dispatch};
use crate::io::Format;
use crate::models::{TemplateDraft, TemplateId};
use crate::services::{ImportOptions, TemplateFilter, TemplateService};
use anyhow::{Context, bail};
use std::path::PathBuf;

/// Arguments for the `template save` command.
#[derive(Debug, Clone, Default)]
pub struct SaveTemplateArgs {
    /// Template name.
    pub name: String,
    /// Category name.
    pub category: String,
    /// Id of the template to update; a new template is created when `None`.
    pub id: Option<i64>,
    /// Inline plain content.
    pub content: Option<String>,
    /// File holding the plain content.
    pub from_file: Option<PathBuf>,
    /// Inline markup content.
    pub markup: Option<String>,
}

/// Opens `id` in `session`, failing if it does not exist.
fn open_template(
    service: &TemplateService,
    session: &mut EditorSession,
    id: TemplateId,
) -> anyhow::Result<crate::editor::CommandOutcome> {
    let outcome = dispatch(EditorCommand::SelectTemplate(id), session, service.store())?;
    if outcome.template.is_none() {
        bail!("template {id} not found");
    }
    Ok(outcome)
}

/// Saves a template, inserting or updating.
///
/// # Errors
///
/// Returns an error for a missing name or category, an unknown `--id`, an
/// unreadable content file, or a storage failure.
pub fn cmd_template_save(service: &TemplateService, args: SaveTemplateArgs) -> anyhow::Result<()> {
    let plain_content = match (args.content, args.from_file) {
        (Some(_), Some(_)) => bail!("use either --content or --from-file, not both"),
        (Some(content), None) => content,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => String::new(),
    };

    let mut session = EditorSession::new();
    if let Some(id) = args.id {
        open_template(service, &mut session, TemplateId::new(id))?;
    }

    let draft = TemplateDraft::new(
        args.name,
        args.category,
        plain_content,
        args.markup.unwrap_or_default(),
    );
    let outcome = dispatch(
        EditorCommand::SaveTemplate(draft),
        &mut session,
        service.store(),
    )?;
    println!("{}", outcome.message);
    Ok(())
}

/// Prints one template's body in the requested mode, or the whole record as JSON.
///
/// # Errors
///
/// Returns an error if the template does not exist or the mode is unknown.
pub fn cmd_template_get(
    service: &TemplateService,
    id: i64,
    mode: Option<String>,
    format: Option<String>,
) -> anyhow::Result<()> {
    let mode = match mode.as_deref() {
        Some(m) => DisplayMode::parse(m).with_context(|| format!("unknown mode: {m}"))?,
        None => DisplayMode::Plain,
    };

    let mut session = EditorSession::new();
    dispatch(
        EditorCommand::SwitchMode {
            target: mode,
            buffer: String::new(),
        },
        &mut session,
        service.store(),
    )?;
    let outcome = open_template(service, &mut session, TemplateId::new(id))?;

    match format.as_deref().map_or(OutputFormat::Text, OutputFormat::parse) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome.template)?),
        OutputFormat::Text | OutputFormat::Table => {
            println!("{}", outcome.buffer.unwrap_or_default());
        },
    }
    Ok(())
}

/// Lists templates, optionally in one category.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn cmd_template_list(
    service: &TemplateService,
    category: Option<String>,
    format: Option<String>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let mut filter = TemplateFilter::new();
    if let Some(category) = category {
        filter = filter.with_category(category);
    }
    if let Some(limit) = limit {
        filter = filter.with_limit(limit);
    }
    let templates = service.list(&filter)?;

    match format.as_deref().map_or(OutputFormat::Table, OutputFormat::parse) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&templates)?),
        OutputFormat::Table | OutputFormat::Text => print_templates_table(&templates),
    }
    Ok(())
}

/// Searches names and plain bodies.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn cmd_template_search(
    service: &TemplateService,
    query: String,
    category: Option<String>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let mut filter = TemplateFilter::new().with_query(query);
    if let Some(category) = category {
        filter = filter.with_category(category);
    }
    if let Some(limit) = limit {
        filter = filter.with_limit(limit);
    }
    print_templates_table(&service.list(&filter)?);
    Ok(())
}

/// Deletes a template.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn cmd_template_delete(service: &TemplateService, id: i64) -> anyhow::Result<()> {
    let mut session = EditorSession::new();
    let outcome = dispatch(
        EditorCommand::DeleteTemplate(TemplateId::new(id)),
        &mut session,
        service.store(),
    )?;
    println!("{}", outcome.message);
    Ok(())
}

fn parse_format(format: Option<&str>) -> anyhow::Result<Option<Format>> {
    Ok(format.map(str::parse::<Format>).transpose()?)
}

/// Exports a template to a file, or to stdout without `--output`.
///
/// # Errors
///
/// Returns an error if the template does not exist or the file cannot be written.
pub fn cmd_template_export(
    service: &TemplateService,
    id: i64,
    output: Option<PathBuf>,
    format: Option<String>,
) -> anyhow::Result<()> {
    let id = TemplateId::new(id);
    let format = parse_format(format.as_deref())?;

    match output {
        Some(path) => {
            service.export_to_path(id, &path, format)?;
            println!("Exported template {id} to {}", path.display());
        },
        None => {
            let stdout = std::io::stdout();
            service.export(id, format.unwrap_or(Format::Json), stdout.lock())?;
        },
    }
    Ok(())
}

/// Imports a template file as a new template.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the resolved
/// draft is missing a name or category.
pub fn cmd_template_import(
    service: &TemplateService,
    path: PathBuf,
    category: Option<String>,
    name: Option<String>,
    format: Option<String>,
) -> anyhow::Result<()> {
    let options = ImportOptions {
        format: parse_format(format.as_deref())?,
        name,
        category,
    };
    let id = service.import_from_path(&path, &options)?;
    println!("Imported {} as template {id}", path.display());
    Ok(())
}
