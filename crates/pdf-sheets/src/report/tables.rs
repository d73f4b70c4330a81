//! CSV renderings of the batch tables

use super::chart::FormatDistribution;
use crate::constants::ERROR_MARKER;
use crate::stats::BatchReport;
use crate::types::*;

/// Page inventory: one row per document, one column per page
pub fn pages_csv(report: &BatchReport) -> Result<Vec<u8>> {
    let max_pages = report.max_page_count();
    let mut header = vec!["file".to_string(), "pages".to_string()];
    header.extend((1..=max_pages).map(|n| format!("page {n}")));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;

    for row in &report.inventory {
        let mut record = vec![row.file_name.clone()];
        match &row.pages {
            Ok(pages) => {
                record.push(pages.len().to_string());
                record.extend(pages.iter().map(|page| page.dimensions.to_string()));
            }
            Err(e) => record.push(format!("{ERROR_MARKER}: {e}")),
        }
        record.resize(header.len(), String::new());
        writer.write_record(&record)?;
    }

    finish(writer)
}

/// Sheet detail: one row per sheet
pub fn sheets_csv(report: &BatchReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["file", "first page", "second page", "format", "sheets in file"])?;

    for row in &report.sheets {
        let sheet = &row.sheet;
        writer.write_record([
            row.file_name.clone(),
            page_label(sheet.first_page),
            sheet.second_page.map(page_label).unwrap_or_default(),
            sheet.format.clone(),
            row.sheets_in_document.to_string(),
        ])?;
    }

    finish(writer)
}

fn page_label(index: usize) -> String {
    format!("page {index}")
}

/// Per-document statistics
pub fn document_stats_csv(report: &BatchReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "file",
        "pages",
        "sheets",
        "paired sheets",
        "orphan sheets",
        "formats",
    ])?;

    for stats in &report.documents {
        writer.write_record([
            stats.file_name.clone(),
            stats.page_count.to_string(),
            stats.sheet_count.to_string(),
            stats.paired_count().to_string(),
            stats.orphan_count.to_string(),
            stats.formats_summary(),
        ])?;
    }

    finish(writer)
}

/// Batch totals as label/value rows
pub fn summary_csv(report: &BatchReport) -> Result<Vec<u8>> {
    let summary = &report.summary;
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["total", "value"])?;
    writer.write_record(["pages", summary.total_pages.to_string().as_str()])?;
    writer.write_record(["sheets", summary.total_sheets.to_string().as_str()])?;
    writer.write_record(["orphan sheets", summary.total_orphans.to_string().as_str()])?;
    finish(writer)
}

/// Global format frequencies, most frequent first
pub fn formats_csv(report: &BatchReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["format", "count"])?;
    for entry in report.summary.formats_by_frequency() {
        writer.write_record([entry.format, entry.count.to_string()])?;
    }
    finish(writer)
}

/// Stacked bar chart data: documents by formats
pub fn format_distribution_csv(distribution: &FormatDistribution) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["file".to_string()];
    header.extend(distribution.formats.iter().cloned());
    writer.write_record(&header)?;

    for row in &distribution.rows {
        let mut record = vec![row.file_name.clone()];
        record.extend(row.counts.iter().map(ToString::to_string));
        writer.write_record(&record)?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| SheetsError::Io(e.into_error()))
}
