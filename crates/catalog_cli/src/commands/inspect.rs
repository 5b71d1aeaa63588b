//! Inspect command implementation.

use super::read_document;
use crate::Format;
use catalog_core::{CollectionName, Document, IdPolicy};
use serde::Serialize;
use std::path::Path;

/// Catalog inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Catalog file path.
    pub path: String,
    /// File size in bytes.
    pub file_size: u64,
    /// Number of products.
    pub products: usize,
    /// Number of categories.
    pub categories: usize,
    /// Number of favorites.
    pub favorites: usize,
    /// Id the next added category would get, `None` once ids are exhausted.
    pub next_category_id: Option<i64>,
    /// Whether the file carries a persisted id counter.
    pub counter_persisted: bool,
    /// Top-level fields outside the known collections.
    pub extra_fields: Vec<String>,
}

impl InspectResult {
    fn from_document(path: &Path, file_size: u64, doc: &Document, policy: IdPolicy) -> Self {
        Self {
            path: path.display().to_string(),
            file_size,
            products: doc.len(CollectionName::Products),
            categories: doc.len(CollectionName::Categories),
            favorites: doc.len(CollectionName::Favorites),
            next_category_id: doc.peek_category_id(policy).ok(),
            counter_persisted: doc.next_category_id.is_some(),
            extra_fields: doc.extra.keys().cloned().collect(),
        }
    }
}

/// Runs the inspect command.
pub fn run(
    path: &Path,
    format: Format,
    legacy_ids: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_document(path)?;
    let file_size = std::fs::metadata(path)?.len();
    let policy = if legacy_ids {
        IdPolicy::CountPlusOne
    } else {
        IdPolicy::Monotonic
    };

    let result = InspectResult::from_document(path, file_size, &doc, policy);

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Text => print_text(&result),
    }

    Ok(())
}

fn print_text(result: &InspectResult) {
    println!("Catalog: {}", result.path);
    println!("File size: {} bytes", result.file_size);
    println!();
    println!("Collections:");
    println!("  products:   {}", result.products);
    println!("  categories: {}", result.categories);
    println!("  favorites:  {}", result.favorites);
    println!();
    match result.next_category_id {
        Some(id) => println!(
            "Next category id: {}{}",
            id,
            if result.counter_persisted { "" } else { " (derived)" }
        ),
        None => println!("Next category id: none (ids exhausted)"),
    }
    if !result.extra_fields.is_empty() {
        println!("Extra fields: {}", result.extra_fields.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Category;

    #[test]
    fn result_from_document() {
        let mut doc = Document::new();
        doc.categories.push(Category { id: 4, name: "a".into() });
        doc.products.push(serde_json::json!({"id": 1}));
        doc.extra.insert("users".into(), serde_json::json!([]));

        let path = Path::new("db.json");
        let result = InspectResult::from_document(path, 10, &doc, IdPolicy::Monotonic);
        assert_eq!(result.products, 1);
        assert_eq!(result.categories, 1);
        assert_eq!(result.favorites, 0);
        assert_eq!(result.next_category_id, Some(5));
        assert!(!result.counter_persisted);
        assert_eq!(result.extra_fields, vec!["users".to_string()]);

        let legacy = InspectResult::from_document(path, 10, &doc, IdPolicy::CountPlusOne);
        assert_eq!(legacy.next_category_id, Some(2));

        doc.next_category_id = Some(i64::MAX);
        doc.categories.clear();
        let full = InspectResult::from_document(path, 10, &doc, IdPolicy::Monotonic);
        assert_eq!(full.next_category_id, None);
    }
}
