//! Template store trait definition.

use crate::Result;
use crate::models::{Template, TemplateDraft, TemplateId, TemplateSummary};

/// Persistent store for categories and templates.
///
/// Every method runs to completion before returning. Multi-row writes are
/// atomic: callers never observe half of a save or half of a category
/// deletion.
pub trait TemplateStore: Send + Sync {
    /// Creates a category if it does not exist yet.
    ///
    /// # Returns
    ///
    /// `true` if a new row was inserted, `false` if the name was already present.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name, or a storage error.
    fn create_category(&self, name: &str) -> Result<bool>;

    /// Creates a category, failing if the name is taken.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Duplicate`] when the name already exists.
    /// Callers usually treat that as benign.
    fn add_category(&self, name: &str) -> Result<()>;

    /// Deletes a category and every template that references it.
    ///
    /// Deleting a category that does not exist is a no-op.
    ///
    /// # Returns
    ///
    /// The number of templates removed with the category.
    ///
    /// # Errors
    ///
    /// Returns a storage error; nothing is deleted in that case.
    fn delete_category(&self, name: &str) -> Result<usize>;

    /// Lists category names in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    fn list_categories(&self) -> Result<Vec<String>>;

    /// Lists `(id, name)` pairs, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    fn list_templates(&self, category: Option<&str>) -> Result<Vec<TemplateSummary>>;

    /// Fetches a full template row.
    ///
    /// `None` is a normal result, e.g. for a selection that went stale.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    fn get_template(&self, id: TemplateId) -> Result<Option<Template>>;

    /// Inserts (`id == None`) or updates a template.
    ///
    /// The category named by the draft is created if missing, in the same
    /// transaction as the template write.
    ///
    /// # Returns
    ///
    /// The id of the written row.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Validation`] if the name or category is empty; nothing is written
    /// - [`crate::Error::NotFound`] if `id` names a row that no longer exists
    /// - [`crate::Error::Storage`] for underlying failures
    fn save_template(&self, id: Option<TemplateId>, draft: &TemplateDraft) -> Result<TemplateId>;

    /// Deletes a template.
    ///
    /// # Returns
    ///
    /// `true` if a row was removed, `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be written.
    fn delete_template(&self, id: TemplateId) -> Result<bool>;

    /// Finds templates whose name or plain body contains `query`.
    ///
    /// Matching is case-insensitive for ASCII letters. An empty query matches
    /// every template.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    fn search_templates(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> Result<Vec<TemplateSummary>>;
}
