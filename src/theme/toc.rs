//! Table of contents entries

use serde::{Deserialize, Serialize};

/// One heading in the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Heading level (2-6)
    pub level: u8,
    /// Heading text
    pub title: String,
    /// Anchor id assigned to the heading
    pub id: String,
}

/// Anchor id for a heading text.
///
/// Characters outside `[A-Za-z0-9_!?]` become `_`, then each `__` collapses to
/// a single `_` in one left-to-right pass.
pub fn toc_anchor(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '!' | '?') {
                c
            } else {
                '_'
            }
        })
        .collect();
    replaced.replace("__", "_")
}

/// Build TOC items from `(level, text)` headings; levels outside 2-6 are skipped
pub fn build_toc<'a, I>(headings: I) -> Vec<TocItem>
where
    I: IntoIterator<Item = (u8, &'a str)>,
{
    headings
        .into_iter()
        .filter(|(level, _)| (2..=6).contains(level))
        .map(|(level, text)| TocItem {
            level,
            title: text.to_string(),
            id: toc_anchor(text),
        })
        .collect()
}
