//! Single-template import/export.
//!
//! # Supported Formats
//!
//! | Format | Extension | Import | Export |
//! |--------|-----------|--------|--------|
//! | JSON | `.json` | name, category and both bodies | full document with timestamps |
//! | Markup | `.html`, `.htm` | markup body; plain body derived | stored markup, or wrapped plain body |
//!
//! Orchestration (resolving names, writing to the store) lives in
//! [`TemplateService`](crate::services::TemplateService).

pub mod formats;
pub mod traits;

pub use formats::{Format, create_export_sink, create_import_source};
pub use traits::{ExportSink, ImportSource, ImportedTemplate, TemplateDocument};
