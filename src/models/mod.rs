//! Data models for mailbook.

mod category;
mod template;

pub use category::validate_category_name;
pub use template::{Template, TemplateDraft, TemplateId, TemplateSummary};
