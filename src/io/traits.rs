//! Core traits for template import/export.
//!
//! Defines the [`ImportSource`] and [`ExportSink`] traits that format adapters
//! implement, and the [`TemplateDocument`] exchange representation.

use crate::Result;
use crate::models::Template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A template as written to and read from a JSON document.
///
/// Timestamps are informational: they are written on export and ignored on
/// import, which always creates a new template. A document may omit its name
/// or category; the import service fills them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDocument {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Category name.
    #[serde(default)]
    pub category: String,
    /// Body as plain text.
    #[serde(default)]
    pub plain_content: String,
    /// Body as markup.
    #[serde(default)]
    pub markup_content: String,
    /// Creation time of the exported template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time of the exported template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Template> for TemplateDocument {
    fn from(t: &Template) -> Self {
        Self {
            name: t.name.clone(),
            category: t.category.clone(),
            plain_content: t.plain_content.clone(),
            markup_content: t.markup_content.clone(),
            created_at: Some(t.created_at),
            updated_at: Some(t.updated_at),
        }
    }
}

/// Field values recovered from an import file.
///
/// Name and category are optional because not every format carries them;
/// the import service fills them from its options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedTemplate {
    /// Display name, if the file carries one.
    pub name: Option<String>,
    /// Category, if the file carries one.
    pub category: Option<String>,
    /// Body as plain text.
    pub plain_content: String,
    /// Body as markup.
    pub markup_content: String,
}

impl From<TemplateDocument> for ImportedTemplate {
    fn from(doc: TemplateDocument) -> Self {
        Self {
            name: non_blank(doc.name),
            category: non_blank(doc.category),
            plain_content: doc.plain_content,
            markup_content: doc.markup_content,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Source of one imported template.
pub trait ImportSource {
    /// Reads the template from the source.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O errors occur.
    fn read(&mut self) -> Result<ImportedTemplate>;
}

/// Destination for one exported template.
pub trait ExportSink {
    /// Writes the template.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn write(&mut self, template: &Template) -> Result<()>;

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn finalize(self: Box<Self>) -> Result<()>;
}
