//! Email template models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::plain_to_markup;
use crate::{Error, Result};

/// Store-assigned template identifier.
///
/// Stable for the lifetime of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(i64);

impl TemplateId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TemplateId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A stored email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Row identifier.
    pub id: TemplateId,
    /// Display name. Not unique.
    pub name: String,
    /// Name of the owning category.
    pub category: String,
    /// Body as plain text.
    pub plain_content: String,
    /// Body as markup. Empty when the template was never edited in markup mode.
    pub markup_content: String,
    /// Set once on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every save.
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Returns the markup body, rendering the plain body when no markup was saved.
    #[must_use]
    pub fn markup_or_rendered(&self) -> String {
        if self.markup_content.is_empty() {
            plain_to_markup(&self.plain_content)
        } else {
            self.markup_content.clone()
        }
    }

    /// Returns the field values as a draft, e.g. to re-save under another id.
    #[must_use]
    pub fn to_draft(&self) -> TemplateDraft {
        TemplateDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            plain_content: self.plain_content.clone(),
            markup_content: self.markup_content.clone(),
        }
    }
}

/// List-view projection of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    /// Row identifier.
    pub id: TemplateId,
    /// Display name.
    pub name: String,
}

impl TemplateSummary {
    /// Creates a summary.
    #[must_use]
    pub fn new(id: impl Into<TemplateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Field values submitted when saving a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    /// Display name (required).
    pub name: String,
    /// Category name (required). Created on save when missing.
    pub category: String,
    /// Body as plain text.
    #[serde(default)]
    pub plain_content: String,
    /// Body as markup.
    #[serde(default)]
    pub markup_content: String,
}

impl TemplateDraft {
    /// Creates a draft from its four fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        plain_content: impl Into<String>,
        markup_content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            plain_content: plain_content.into(),
            markup_content: markup_content.into(),
        }
    }

    /// Checks the fields required at save time.
    ///
    /// Values are stored as given; whitespace-only counts as empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name or category is empty.
    pub fn validate(&self) -> Result<()> {
        match (self.name.trim().is_empty(), self.category.trim().is_empty()) {
            (true, true) => Err(Error::Validation(
                "template name and category are required".to_string(),
            )),
            (true, false) => Err(Error::Validation("template name is required".to_string())),
            (false, true) => Err(Error::Validation(
                "template category is required".to_string(),
            )),
            (false, false) => Ok(()),
        }
    }
}
