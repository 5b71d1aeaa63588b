//! CLI command implementations.

pub mod inspect;
pub mod serve;
pub mod verify;

use catalog_core::Document;
use std::path::Path;

/// Reads and decodes a catalog file without taking the writer lock.
pub(crate) fn read_document(path: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No catalog found at {:?}", path).into());
    }
    let data = std::fs::read(path)?;
    Ok(Document::decode(&data, &path.display().to_string())?)
}
