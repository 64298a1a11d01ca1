//! Matching requested category names against stored categories

use std::collections::HashSet;

use super::Category;

/// Outcome of matching requested names against stored categories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryResolution {
    /// Ids of stored categories that matched, in request order, no repeats
    pub existing_ids: Vec<i64>,
    /// Names with no stored match, first spelling of each kept
    pub missing: Vec<String>,
}

/// Partition `requested` into already-stored categories and names to create.
///
/// Matching ignores letter case, and so does deduplication: `["Rock", "rock"]`
/// yields one entry, whether it matched or is missing.
pub fn resolve_categories(requested: &[String], existing: &[Category]) -> CategoryResolution {
    let mut resolution = CategoryResolution::default();
    let mut seen = HashSet::new();

    for name in requested {
        let key = name.to_lowercase();
        if !seen.insert(key.clone()) {
            continue;
        }

        match existing.iter().find(|c| c.name.to_lowercase() == key) {
            Some(category) => {
                if !resolution.existing_ids.contains(&category.id) {
                    resolution.existing_ids.push(category.id);
                }
            }
            None => resolution.missing.push(name.clone()),
        }
    }

    resolution
}

/// Lower-cased copies of `names`, for case-insensitive lookups.
pub fn lowercase_names(names: &[String]) -> Vec<String> {
    names.iter().map(|name| name.to_lowercase()).collect()
}
