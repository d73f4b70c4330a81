//! Batch statistics
//!
//! An [`Aggregator`] is created empty for each run, fed one document at a
//! time in report order, then turned into a read-only [`BatchReport`].

use crate::types::*;
use std::collections::BTreeMap;

/// One row of the page inventory
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryRow {
    pub file_name: String,
    pub pages: std::result::Result<Vec<Page>, DocumentReadError>,
}

impl InventoryRow {
    /// Page count, or `None` for a document that could not be read
    pub fn page_count(&self) -> Option<usize> {
        self.pages.as_ref().ok().map(Vec::len)
    }
}

/// One row of the sheet detail table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetRow {
    pub file_name: String,
    pub sheet: Sheet,
    /// Number of sheets in the same document
    pub sheets_in_document: usize,
}

/// How many sheets share a format
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatCount {
    pub format: String,
    pub count: usize,
}

/// Statistics for one successfully read document
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentStats {
    pub file_name: String,
    pub page_count: usize,
    pub sheet_count: usize,
    pub orphan_count: usize,
    /// Sheets per format label
    pub formats: BTreeMap<String, usize>,
}

impl DocumentStats {
    pub fn from_sheets(file_name: &str, page_count: usize, sheets: &[Sheet]) -> Self {
        let mut formats = BTreeMap::new();
        for sheet in sheets {
            *formats.entry(sheet.format.clone()).or_insert(0) += 1;
        }

        Self {
            file_name: file_name.to_string(),
            page_count,
            sheet_count: sheets.len(),
            orphan_count: sheets.iter().filter(|sheet| sheet.is_orphan()).count(),
            formats,
        }
    }

    pub fn paired_count(&self) -> usize {
        self.sheet_count - self.orphan_count
    }

    pub fn formats_by_frequency(&self) -> Vec<FormatCount> {
        by_frequency(&self.formats)
    }

    /// Formats as `"210×297 mm (3); 420×297 mm (1)"`
    pub fn formats_summary(&self) -> String {
        self.formats_by_frequency()
            .iter()
            .map(|entry| format!("{} ({})", entry.format, entry.count))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Totals over every successfully read document of a batch
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    pub total_pages: usize,
    pub total_sheets: usize,
    pub total_orphans: usize,
    /// Sheets per format label across the batch
    pub formats: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn formats_by_frequency(&self) -> Vec<FormatCount> {
        by_frequency(&self.formats)
    }
}

/// Everything a report is built from
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchReport {
    pub inventory: Vec<InventoryRow>,
    pub sheets: Vec<SheetRow>,
    pub documents: Vec<DocumentStats>,
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Number of documents recorded as unreadable
    pub fn failed_count(&self) -> usize {
        self.inventory.iter().filter(|row| row.pages.is_err()).count()
    }

    /// Largest page count in the inventory
    pub fn max_page_count(&self) -> usize {
        self.inventory
            .iter()
            .filter_map(InventoryRow::page_count)
            .max()
            .unwrap_or(0)
    }
}

/// Accumulates per-document results for a single batch run
#[derive(Debug, Default)]
pub struct Aggregator {
    inventory: Vec<InventoryRow>,
    sheets: Vec<SheetRow>,
    documents: Vec<DocumentStats>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document that was read and paired
    pub fn record_document(&mut self, file_name: &str, pages: Vec<Page>, sheets: Vec<Sheet>) {
        let stats = DocumentStats::from_sheets(file_name, pages.len(), &sheets);
        let sheets_in_document = sheets.len();

        self.sheets.extend(sheets.into_iter().map(|sheet| SheetRow {
            file_name: file_name.to_string(),
            sheet,
            sheets_in_document,
        }));
        self.inventory.push(InventoryRow {
            file_name: file_name.to_string(),
            pages: Ok(pages),
        });
        self.documents.push(stats);
    }

    /// Record a document that could not be read; it only shows in the inventory
    pub fn record_failure(&mut self, file_name: &str, error: DocumentReadError) {
        self.inventory.push(InventoryRow {
            file_name: file_name.to_string(),
            pages: Err(error),
        });
    }

    /// Compute batch totals
    pub fn finish(self) -> BatchReport {
        let mut summary = BatchSummary::default();
        for stats in &self.documents {
            summary.total_pages += stats.page_count;
            summary.total_sheets += stats.sheet_count;
            summary.total_orphans += stats.orphan_count;
            for (format, count) in &stats.formats {
                *summary.formats.entry(format.clone()).or_insert(0) += count;
            }
        }

        BatchReport {
            inventory: self.inventory,
            sheets: self.sheets,
            documents: self.documents,
            summary,
        }
    }
}

/// Sort a format map by descending count, then by label
fn by_frequency(formats: &BTreeMap<String, usize>) -> Vec<FormatCount> {
    let mut entries: Vec<FormatCount> = formats
        .iter()
        .map(|(format, &count)| FormatCount {
            format: format.clone(),
            count,
        })
        .collect();
    // BTreeMap order already sorts labels; the stable sort keeps it among ties
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}
