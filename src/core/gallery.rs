//! Gallery: visibility, search, tag and category filters

use std::collections::BTreeSet;

use crate::types::{DreamCategory, DreamEntry, GalleryFilter};

/// Can `viewer` see this entry? Public entries are visible to everyone.
pub fn is_visible(entry: &DreamEntry, viewer: Option<&str>) -> bool {
    entry.is_public || viewer.is_some_and(|v| entry.is_owned_by(v))
}

/// Does the entry fall into the category?
pub fn matches_category(entry: &DreamEntry, category: DreamCategory) -> bool {
    let keywords = category.keywords();
    entry
        .tags
        .iter()
        .chain(entry.emotions.iter())
        .any(|label| keywords.contains(&label.to_lowercase().as_str()))
}

/// Does the entry pass every part of the filter (visibility included)?
pub fn matches(entry: &DreamEntry, filter: &GalleryFilter) -> bool {
    if !is_visible(entry, filter.viewer.as_deref()) {
        return false;
    }

    if let Some(term) = filter.search.as_deref().filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        if !entry.title.to_lowercase().contains(&term)
            && !entry.description.to_lowercase().contains(&term)
        {
            return false;
        }
    }

    if !filter.tags.iter().all(|tag| entry.has_tag(tag)) {
        return false;
    }

    filter.categories.is_empty() || filter.categories.iter().any(|c| matches_category(entry, *c))
}

/// Entries passing the filter, order preserved
pub fn filter_entries<'a>(entries: &'a [DreamEntry], filter: &GalleryFilter) -> Vec<&'a DreamEntry> {
    entries.iter().filter(|e| matches(e, filter)).collect()
}

/// Sorted, de-duplicated tags across entries
pub fn all_tags<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a DreamEntry>,
{
    entries
        .into_iter()
        .flat_map(|e| e.tags.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
