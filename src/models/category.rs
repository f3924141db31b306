//! Category names.

use crate::{Error, Result};

/// Checks a category name before it reaches the store.
///
/// Names are case-sensitive and kept exactly as given; only emptiness is
/// rejected.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the name is empty or whitespace-only.
pub fn validate_category_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("category name is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("Sales").is_ok());
        assert!(validate_category_name("sales").is_ok());
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name(" \t").is_err());
    }
}
