//! Verify command implementation.

use super::read_document;
use std::path::Path;

/// Runs the verify command.
///
/// Returns `Ok(false)` when the catalog decodes but breaks an invariant.
pub fn run(path: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    println!("Verifying catalog at {:?}", path);
    println!();

    let doc = read_document(path)?;
    println!(
        "Decoded {} products, {} categories, {} favorites",
        doc.products.len(),
        doc.categories.len(),
        doc.favorites.len()
    );

    let problems = doc.check();
    if problems.is_empty() {
        println!("Status: OK");
        return Ok(true);
    }

    println!();
    println!("Problems:");
    for problem in &problems {
        println!("  - {problem}");
    }
    println!();
    println!("Status: FAILED ({} problems)", problems.len());
    Ok(false)
}
