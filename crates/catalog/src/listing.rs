//! Derive the two-level catalog (category → design) from flat storage keys.
//!
//! The bucket has no folders, only keys such as `estampados/Naruto/kakashi.png`.
//! Categories and designs are reconstructed from the key structure alone.

use std::collections::HashSet;

use crate::types::{Category, Design};
use crate::IMAGE_EXTENSION;

/// Prefix to list when collecting categories (`root/`).
pub fn root_prefix(root: &str) -> String {
    format!("{}/", root.trim_end_matches('/'))
}

/// Prefix to list when collecting the designs of one category (`root/category/`).
pub fn category_prefix(root: &str, category: &str) -> String {
    format!("{}{}/", root_prefix(root), category)
}

/// Storage key of a single design image.
pub fn image_key(root: &str, category: &str, filename: &str) -> String {
    format!("{}{}", category_prefix(root, category), filename)
}

/// Distinct categories found under `root`, in order of first appearance.
///
/// A segment only counts as a category when something follows it, so a bare
/// object directly under the root is ignored while a folder marker
/// (`root/Naruto/`) is enough to surface an empty category.
pub fn categories_from_keys<'a, I>(root: &str, keys: I) -> Vec<Category>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = root_prefix(root);
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for key in keys {
        let Some(rest) = key.strip_prefix(prefix.as_str()) else {
            continue;
        };
        let Some((folder, _)) = rest.split_once('/') else {
            continue;
        };
        if folder.is_empty() {
            continue;
        }
        if seen.insert(folder) {
            categories.push(Category::new(folder));
        }
    }

    categories
}

/// Designs under `root/category/`, keeping only keys whose last segment is an
/// image. Listing order is preserved.
pub fn designs_from_keys<'a, I>(root: &str, category: &str, keys: I) -> Vec<Design>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = category_prefix(root, category);
    keys.into_iter()
        .filter(|key| key.starts_with(prefix.as_str()))
        .filter_map(design_from_key)
        .collect()
}

/// Build a design from a full key, or `None` when the key is not an image.
pub fn design_from_key(key: &str) -> Option<Design> {
    let filename = key.rsplit('/').next()?;
    let name = filename.strip_suffix(IMAGE_EXTENSION)?;
    Some(Design {
        id: key.to_string(),
        filename: filename.to_string(),
        name: name.to_string(),
    })
}
