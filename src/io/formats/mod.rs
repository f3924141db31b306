//! Format adapters for import/export.
//!
//! Each format implements the [`ImportSource`] and [`ExportSink`] traits.

pub mod json;
pub mod markup;

use crate::{Error, Result};
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use super::traits::{ExportSink, ImportSource};

/// Supported file formats for import/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// A [`TemplateDocument`](super::TemplateDocument) as JSON.
    Json,
    /// A bare markup file.
    Markup,
}

impl Format {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markup => "html",
        }
    }

    /// Detects format from file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("html" | "htm") => Ok(Self::Markup),
            Some(ext) => Err(Error::Validation(format!(
                "unsupported file extension: .{ext}"
            ))),
            None => Err(Error::Validation(
                "cannot determine format: file has no extension".to_string(),
            )),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markup" | "html" | "htm" => Ok(Self::Markup),
            _ => Err(Error::Validation(format!("unknown format: {s}"))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Markup => write!(f, "markup"),
        }
    }
}

/// Creates an import source for the given format and reader.
#[must_use]
pub fn create_import_source<'a, R: Read + 'a>(
    reader: R,
    format: Format,
) -> Box<dyn ImportSource + 'a> {
    match format {
        Format::Json => Box::new(json::JsonImportSource::new(reader)),
        Format::Markup => Box::new(markup::MarkupImportSource::new(reader)),
    }
}

/// Creates an export sink for the given format and writer.
#[must_use]
pub fn create_export_sink<'a, W: Write + 'a>(
    writer: W,
    format: Format,
) -> Box<dyn ExportSink + 'a> {
    match format {
        Format::Json => Box::new(json::JsonExportSink::new(writer)),
        Format::Markup => Box::new(markup::MarkupExportSink::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(Format::from_str("json").unwrap(), Format::Json);
        assert_eq!(Format::from_str("HTML").unwrap(), Format::Markup);
        assert_eq!(Format::from_str("markup").unwrap(), Format::Markup);
        assert!(Format::from_str("yaml").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            Format::from_path(Path::new("welcome.json")).unwrap(),
            Format::Json
        );
        assert_eq!(
            Format::from_path(Path::new("promo.HTM")).unwrap(),
            Format::Markup
        );
        assert!(Format::from_path(Path::new("notes.txt")).is_err());
        assert!(Format::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_extension_round_trips_through_from_path() {
        for format in [Format::Json, Format::Markup] {
            let path = format!("t.{}", format.extension());
            assert_eq!(Format::from_path(Path::new(&path)).unwrap(), format);
        }
    }
}
