//! JSON format adapter.
//!
//! One template per file, as a pretty-printed [`TemplateDocument`].

use crate::io::traits::{ExportSink, ImportSource, ImportedTemplate, TemplateDocument};
use crate::models::Template;
use crate::{Error, Result};
use std::io::{Read, Write};

/// JSON import source.
pub struct JsonImportSource<R: Read> {
    reader: R,
}

impl<R: Read> JsonImportSource<R> {
    /// Creates a new JSON import source.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> ImportSource for JsonImportSource<R> {
    fn read(&mut self) -> Result<ImportedTemplate> {
        let doc: TemplateDocument = serde_json::from_reader(&mut self.reader)
            .map_err(|e| Error::Validation(format!("malformed template document: {e}")))?;
        Ok(doc.into())
    }
}

/// JSON export sink.
pub struct JsonExportSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonExportSink<W> {
    /// Creates a new JSON export sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ExportSink for JsonExportSink<W> {
    fn write(&mut self, template: &Template) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &TemplateDocument::from(template))
            .map_err(|e| Error::storage("write_json", e))?;
        writeln!(self.writer).map_err(|e| Error::storage("write_json", e))
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::storage("flush_json", e))
    }
}
