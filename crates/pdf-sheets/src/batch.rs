//! Batch analysis of a folder of documents
//!
//! This module orchestrates a run:
//! 1. Find the PDF files and order them by batch code
//! 2. Read each document's page geometry
//! 3. Pair pages into sheets
//! 4. Aggregate per-document and batch statistics

use crate::constants::{BATCH_CODE_LEN, PDF_EXTENSION};
use crate::options::AnalysisOptions;
use crate::pairing::pair_pages;
use crate::reader::read_document;
use crate::stats::{Aggregator, BatchReport};
use crate::types::*;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// A document scheduled for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub path: PathBuf,
    /// Name shown in the report: the path relative to the batch folder
    pub file_name: String,
}

/// Find the PDF files of a folder, in report order
pub async fn discover_documents(folder: &Path, recursive: bool) -> Result<Vec<DocumentEntry>> {
    let mut entries = Vec::new();
    let mut pending = vec![folder.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut read_dir = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;

            if file_type.is_dir() {
                if recursive {
                    pending.push(path);
                }
            } else if is_pdf(&path) {
                let file_name = path
                    .strip_prefix(folder)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .into_owned();
                entries.push(DocumentEntry { path, file_name });
            }
        }
    }

    // Listing order is platform dependent; within a batch code, keep name order
    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    sort_by_batch_code(&mut entries);
    Ok(entries)
}

/// Stable sort on the first two characters of the file name
pub fn sort_by_batch_code(entries: &mut [DocumentEntry]) {
    entries.sort_by(|a, b| batch_code(&a.file_name).cmp(batch_code(&b.file_name)));
}

/// Leading characters of a file name used for ordering
pub fn batch_code(file_name: &str) -> &str {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);
    match name.char_indices().nth(BATCH_CODE_LEN) {
        Some((end, _)) => &name[..end],
        None => name,
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}

/// Analyze every document in order
///
/// Each document is read, paired and recorded before the next one starts.
/// A document that cannot be read is recorded as such and the run goes on.
pub async fn analyze_documents(
    documents: &[DocumentEntry],
    options: &AnalysisOptions,
) -> Result<BatchReport> {
    options.validate()?;

    let mut aggregator = Aggregator::new();
    for document in documents {
        match read_document(&document.path).await {
            Ok(pages) => {
                let sheets = pair_pages(&pages, options.tolerance_mm);
                info!(
                    "{}: {} pages, {} sheets",
                    document.file_name,
                    pages.len(),
                    sheets.len()
                );
                aggregator.record_document(&document.file_name, pages, sheets);
            }
            Err(e) => {
                warn!("{}: skipped, {}", document.file_name, e);
                aggregator.record_failure(&document.file_name, e);
            }
        }
    }

    Ok(aggregator.finish())
}

/// Discover and analyze the documents of a folder
pub async fn analyze_folder(
    folder: impl AsRef<Path>,
    options: &AnalysisOptions,
) -> Result<BatchReport> {
    let folder = folder.as_ref();
    options.validate()?;

    let documents = discover_documents(folder, options.recursive).await?;
    info!(
        "Analyzing {} documents in {}",
        documents.len(),
        folder.display()
    );
    analyze_documents(&documents, options).await
}
