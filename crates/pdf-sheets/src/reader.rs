//! Document I/O operations for batch analysis

use crate::geometry::read_page_dimensions;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Read a document's pages
///
/// Never fails the caller: any problem opening the file or reading a page box
/// comes back as a [`DocumentReadError`] for this document alone.
pub async fn read_document(
    path: impl AsRef<Path>,
) -> std::result::Result<Vec<Page>, DocumentReadError> {
    let doc = load_pdf(path)
        .await
        .map_err(|e| DocumentReadError::Open(e.to_string()))?;
    pages_of(&doc)
}

/// Read the pages of an already loaded document
pub fn pages_of(doc: &Document) -> std::result::Result<Vec<Page>, DocumentReadError> {
    let pages = read_page_dimensions(doc)?
        .into_iter()
        .enumerate()
        .map(|(position, dimensions)| Page {
            index: position + 1,
            dimensions,
        })
        .collect();
    Ok(pages)
}
