//! crates/vetportal_core/src/catalog.rs
//!
//! Read-side queries over the content catalog.

use crate::domain::{ContentCategory, ContentItem};

/// Filter the catalog by category and a free-text query.
///
/// The query matches case-insensitively as a substring of either the title
/// or the description; an empty query matches everything. Collection order
/// is preserved.
pub fn search<'a>(
    items: &'a [ContentItem],
    category: Option<ContentCategory>,
    query: &str,
) -> Vec<&'a ContentItem> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| category.map_or(true, |c| item.category == c))
        .filter(|item| {
            needle.is_empty()
                || item.title.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .collect()
}
