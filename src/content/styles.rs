//! Transient character styles applied to ranges of the plain buffer.
//!
//! Spans live only as long as the editor session. They are dropped when a
//! template is opened, a new template is started, or the display mode
//! changes, and they are never written to the store.

use std::ops::Range;

/// A character style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Bold weight.
    Bold,
    /// Italic.
    Italic,
    /// Underline.
    Underline,
    /// Font family, point size and color picked together.
    Custom {
        /// Font family name.
        font: String,
        /// Point size.
        size: u16,
        /// Color, e.g. `#336699`.
        color: String,
    },
}

/// A style applied to a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    /// The style.
    pub tag: StyleTag,
    /// Byte range in the plain buffer, never empty.
    pub range: Range<usize>,
}

/// The set of style spans for one editing session.
///
/// Spans carrying the same tag never overlap or touch; they are merged on
/// insertion. Spans are kept ordered by start offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSpans {
    spans: Vec<StyleSpan>,
}

impl StyleSpans {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Returns the spans ordered by start offset.
    #[must_use]
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Returns `true` if no style is applied anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Removes every span.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Returns the tags in effect at `offset`.
    #[must_use]
    pub fn tags_at(&self, offset: usize) -> Vec<&StyleTag> {
        self.spans
            .iter()
            .filter(|s| s.range.contains(&offset))
            .map(|s| &s.tag)
            .collect()
    }

    /// Returns `true` if `tag` is in effect at `offset`.
    #[must_use]
    pub fn has_tag_at(&self, tag: &StyleTag, offset: usize) -> bool {
        self.tags_at(offset).contains(&tag)
    }

    /// Toggles `tag` over `selection`.
    ///
    /// If the tag is in effect at the start of the selection it is removed
    /// from exactly the selected range; otherwise it is applied to the whole
    /// selection. An empty selection is a no-op.
    pub fn toggle(&mut self, tag: StyleTag, selection: Range<usize>) {
        if selection.is_empty() {
            return;
        }
        if self.has_tag_at(&tag, selection.start) {
            self.remove(&tag, &selection);
        } else {
            self.insert(tag, selection);
        }
    }

    /// Applies a font, size and color to `selection`.
    pub fn apply_custom(
        &mut self,
        font: impl Into<String>,
        size: u16,
        color: impl Into<String>,
        selection: Range<usize>,
    ) {
        if selection.is_empty() {
            return;
        }
        let tag = StyleTag::Custom {
            font: font.into(),
            size,
            color: color.into(),
        };
        self.insert(tag, selection);
    }

    fn insert(&mut self, tag: StyleTag, mut range: Range<usize>) {
        self.spans.retain(|span| {
            let joins = span.tag == tag && span.range.start <= range.end && range.start <= span.range.end;
            if joins {
                range.start = range.start.min(span.range.start);
                range.end = range.end.max(span.range.end);
            }
            !joins
        });
        self.spans.push(StyleSpan { tag, range });
        self.spans.sort_by_key(|s| s.range.start);
    }

    fn remove(&mut self, tag: &StyleTag, selection: &Range<usize>) {
        let mut kept = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            let overlaps = &span.tag == tag
                && span.range.start < selection.end
                && selection.start < span.range.end;
            if !overlaps {
                kept.push(span);
                continue;
            }
            if span.range.start < selection.start {
                kept.push(StyleSpan {
                    tag: span.tag.clone(),
                    range: span.range.start..selection.start,
                });
            }
            if selection.end < span.range.end {
                kept.push(StyleSpan {
                    tag: span.tag,
                    range: selection.end..span.range.end,
                });
            }
        }
        kept.sort_by_key(|s| s.range.start);
        self.spans = kept;
    }
}
