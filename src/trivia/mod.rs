//! Request-independent trivia logic: paging, text search and quiz selection.
//! Everything here works on already loaded records and never touches the store.

pub mod pagination;
pub mod quiz;
pub mod search;

use std::collections::BTreeMap;

use crate::db::Category;

/// `{"1": "Science", "2": "Art", ...}`, the shape clients use to label categories.
pub fn category_map(categories: &[Category]) -> BTreeMap<String, String> {
    categories
        .iter()
        .map(|category| (category.id.to_string(), category.kind.clone()))
        .collect()
}
