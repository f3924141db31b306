//! Template search and import/export.
//!
//! CRUD goes straight to the [`TemplateStore`]; this service adds the
//! operations that combine several store calls or touch the filesystem.

use crate::io::{Format, ImportedTemplate, create_export_sink, create_import_source};
use crate::models::{Template, TemplateDraft, TemplateId, TemplateSummary};
use crate::storage::TemplateStore;
use crate::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// Filter for listing templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateFilter {
    /// Restrict to one category.
    pub category: Option<String>,
    /// Substring to match against name and plain body.
    pub query: Option<String>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl TemplateFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            category: None,
            query: None,
            limit: None,
        }
    }

    /// Filters by category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filters by a search query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Limits results.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Options for importing one template.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// File format; detected from the extension when `None`.
    pub format: Option<Format>,
    /// Name to use instead of the one in the file.
    pub name: Option<String>,
    /// Category to use instead of the one in the file.
    pub category: Option<String>,
}

impl ImportOptions {
    /// Sets the format.
    #[must_use]
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Row counts reported by `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    /// Number of categories.
    pub categories: usize,
    /// Number of templates.
    pub templates: usize,
}

/// Service for template search and import/export.
#[derive(Clone)]
pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
}

impl TemplateService {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn TemplateStore {
        self.store.as_ref()
    }

    /// Lists templates matching a filter, in id order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn list(&self, filter: &TemplateFilter) -> Result<Vec<TemplateSummary>> {
        let category = filter.category.as_deref();
        let mut templates = match filter.query.as_deref() {
            Some(query) => self.store.search_templates(query, category)?,
            None => self.store.list_templates(category)?,
        };
        if let Some(limit) = filter.limit {
            templates.truncate(limit);
        }
        Ok(templates)
    }

    /// Fetches a template that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such template.
    pub fn require(&self, id: TemplateId) -> Result<Template> {
        self.store
            .get_template(id)?
            .ok_or_else(|| Error::NotFound(format!("template {id}")))
    }

    /// Counts categories and templates.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn status(&self) -> Result<StoreStatus> {
        Ok(StoreStatus {
            categories: self.store.list_categories()?.len(),
            templates: self.store.list_templates(None)?.len(),
        })
    }

    /// Writes one template to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or a write error.
    #[instrument(skip_all, fields(template.id = %id, format = %format))]
    pub fn export<W: Write>(&self, id: TemplateId, format: Format, writer: W) -> Result<()> {
        let template = self.require(id)?;
        let mut sink = create_export_sink(writer, format);
        sink.write(&template)?;
        sink.finalize()?;
        tracing::info!(name = %template.name, "Exported template");
        Ok(())
    }

    /// Writes one template to a file; the format defaults to the extension's.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if no format can be determined,
    /// [`Error::NotFound`] for an unknown id, or a filesystem error.
    pub fn export_to_path(
        &self,
        id: TemplateId,
        path: &Path,
        format: Option<Format>,
    ) -> Result<()> {
        let format = match format {
            Some(format) => format,
            None => Format::from_path(path)?,
        };
        // Resolve the template before creating the file
        self.require(id)?;
        let file = File::create(path)
            .map_err(|e| Error::storage("create_export_file", format!("{}: {e}", path.display())))?;
        self.export(id, format, BufWriter::new(file))
    }

    /// Reads one template from `reader` and saves it as a new template.
    ///
    /// `fallback_name` is used when neither the options nor the file name it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for malformed input or a missing name or
    /// category, or a storage error.
    #[instrument(skip_all, fields(format = %format))]
    pub fn import<R: Read>(
        &self,
        reader: R,
        format: Format,
        options: &ImportOptions,
        fallback_name: Option<&str>,
    ) -> Result<TemplateId> {
        let imported = create_import_source(reader, format).read()?;
        let draft = resolve_draft(imported, options, fallback_name);
        let id = self.store.save_template(None, &draft)?;
        tracing::info!(template.id = %id, name = %draft.name, "Imported template");
        Ok(id)
    }

    /// Imports one template from a file.
    ///
    /// The file stem is the fallback name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the format cannot be determined or the
    /// input is invalid, or a filesystem or storage error.
    pub fn import_from_path(&self, path: &Path, options: &ImportOptions) -> Result<TemplateId> {
        let format = match options.format {
            Some(format) => format,
            None => Format::from_path(path)?,
        };
        let file = File::open(path)
            .map_err(|e| Error::storage("open_import_file", format!("{}: {e}", path.display())))?;
        let stem = path.file_stem().and_then(|s| s.to_str());
        self.import(BufReader::new(file), format, options, stem)
    }
}

fn resolve_draft(
    imported: ImportedTemplate,
    options: &ImportOptions,
    fallback_name: Option<&str>,
) -> TemplateDraft {
    let name = options
        .name
        .clone()
        .or(imported.name)
        .or_else(|| fallback_name.map(str::to_string))
        .unwrap_or_default();
    let category = options
        .category
        .clone()
        .or(imported.category)
        .unwrap_or_default();

    TemplateDraft {
        name,
        category,
        plain_content: imported.plain_content,
        markup_content: imported.markup_content,
    }
}
