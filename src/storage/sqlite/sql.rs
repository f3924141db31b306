//! SQL helper functions.

/// Escapes `SQLite` LIKE wildcards (`%`, `_`) and the escape character (`\`).
///
/// Use with `LIKE ? ESCAPE '\'` so user text is matched literally.
///
/// # Examples
///
/// ```
/// use mailbook::storage::sqlite::escape_like_wildcards;
///
/// assert_eq!(escape_like_wildcards("100%"), "100\\%");
/// assert_eq!(escape_like_wildcards("first_name"), "first\\_name");
/// ```
#[must_use]
pub fn escape_like_wildcards(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            },
            _ => result.push(c),
        }
    }
    result
}

/// Builds a `%…%` substring pattern from user text.
#[must_use]
pub fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like_wildcards(s))
}
