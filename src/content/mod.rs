//! Plain text and markup representations of a template body.
//!
//! The two conversions are deliberately simple and do not invert each other:
//!
//! ```rust
//! use mailbook::content::{markup_to_plain, plain_to_markup};
//!
//! assert_eq!(plain_to_markup("Hi"), "<html><body>Hi</body></html>");
//! assert_eq!(
//!     markup_to_plain(&plain_to_markup("Hi")),
//!     "&lt;html&gt;&lt;body&gt;Hi&lt;/body&gt;&lt;/html&gt;"
//! );
//! ```

pub mod styles;

pub use styles::{StyleSpan, StyleSpans, StyleTag};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wraps plain text in a minimal markup document.
///
/// The text is inserted verbatim: no escaping and no formatting translation.
#[must_use]
pub fn plain_to_markup(text: &str) -> String {
    format!("<html><body>{text}</body></html>")
}

/// Produces the plain view of markup by escaping angle brackets.
///
/// Only `<` and `>` are replaced. Ampersands and existing entities pass
/// through unchanged, so repeated conversions accumulate escapes.
#[must_use]
pub fn markup_to_plain(markup: &str) -> String {
    markup.replace('<', "&lt;").replace('>', "&gt;")
}

/// Which representation the editor buffer currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Formatted plain text.
    #[default]
    Plain,
    /// Raw markup source.
    Markup,
}

impl DisplayMode {
    /// Parses a mode name, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Some(Self::Plain),
            "markup" | "html" => Some(Self::Markup),
            _ => None,
        }
    }

    /// Returns the mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Markup => "markup",
        }
    }

    /// Converts a buffer held in this mode into `target`'s representation.
    ///
    /// Switching to the same mode returns the buffer unchanged.
    #[must_use]
    pub fn switch(self, buffer: &str, target: Self) -> String {
        match (self, target) {
            (Self::Plain, Self::Markup) => plain_to_markup(buffer),
            (Self::Markup, Self::Plain) => markup_to_plain(buffer),
            _ => buffer.to_string(),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
