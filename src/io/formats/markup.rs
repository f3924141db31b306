//! Markup file adapter.
//!
//! Export writes the stored markup, or wraps the plain body when no markup
//! was ever saved. Import keeps the file as markup and derives the plain body
//! from it; the file carries no name or category.

use crate::content::markup_to_plain;
use crate::io::traits::{ExportSink, ImportSource, ImportedTemplate};
use crate::models::Template;
use crate::{Error, Result};
use std::io::{Read, Write};

/// Markup import source.
pub struct MarkupImportSource<R: Read> {
    reader: R,
}

impl<R: Read> MarkupImportSource<R> {
    /// Creates a new markup import source.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> ImportSource for MarkupImportSource<R> {
    fn read(&mut self) -> Result<ImportedTemplate> {
        let mut markup = String::new();
        self.reader
            .read_to_string(&mut markup)
            .map_err(|e| Error::Validation(format!("markup file is not valid text: {e}")))?;

        Ok(ImportedTemplate {
            name: None,
            category: None,
            plain_content: markup_to_plain(&markup),
            markup_content: markup,
        })
    }
}

/// Markup export sink.
pub struct MarkupExportSink<W: Write> {
    writer: W,
}

impl<W: Write> MarkupExportSink<W> {
    /// Creates a new markup export sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ExportSink for MarkupExportSink<W> {
    fn write(&mut self, template: &Template) -> Result<()> {
        let markup = template.markup_or_rendered();
        self.writer
            .write_all(markup.as_bytes())
            .map_err(|e| Error::storage("write_markup", e))
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::storage("flush_markup", e))
    }
}
