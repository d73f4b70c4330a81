//! Report emission
//!
//! Turns a [`BatchReport`] into files in an output directory: a workbook
//! holding every table and the format chart, one CSV per table, and
//! optionally the whole report as JSON.

mod chart;
mod tables;
mod workbook;

pub use chart::{DistributionRow, FormatDistribution};
pub use tables::{
    document_stats_csv, format_distribution_csv, formats_csv, pages_csv, sheets_csv, summary_csv,
};
pub use workbook::{PAGES_SHEET, SHEETS_SHEET, SUMMARY_SHEET, workbook_xlsx};

use crate::constants::*;
use crate::options::ReportOptions;
use crate::stats::BatchReport;
use crate::types::*;
use log::info;
use std::path::PathBuf;

/// Render every report file in memory, as (file name, contents) pairs
pub fn render_report(
    report: &BatchReport,
    options: &ReportOptions,
) -> Result<Vec<(&'static str, Vec<u8>)>> {
    let distribution = FormatDistribution::from_report(report);

    let mut files = vec![
        (WORKBOOK_FILE, workbook_xlsx(report)?),
        (PAGES_FILE, pages_csv(report)?),
        (SHEETS_FILE, sheets_csv(report)?),
        (DOCUMENT_STATS_FILE, document_stats_csv(report)?),
        (SUMMARY_FILE, summary_csv(report)?),
        (FORMATS_FILE, formats_csv(report)?),
        (FORMAT_DISTRIBUTION_FILE, format_distribution_csv(&distribution)?),
    ];

    if options.write_json {
        #[cfg(feature = "serde")]
        files.push((JSON_REPORT_FILE, report_json(report)?));
        #[cfg(not(feature = "serde"))]
        log::warn!("JSON report requested but the serde feature is disabled");
    }

    Ok(files)
}

/// Serialize the whole report
#[cfg(feature = "serde")]
pub fn report_json(report: &BatchReport) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(report)
        .map_err(|e| SheetsError::Config(format!("Failed to serialize report: {}", e)))
}

/// Write the report into `options.output_dir`, returning the paths written
pub async fn write_report(report: &BatchReport, options: &ReportOptions) -> Result<Vec<PathBuf>> {
    let report = report.clone();
    let render_options = options.clone();
    let files =
        tokio::task::spawn_blocking(move || render_report(&report, &render_options)).await??;

    tokio::fs::create_dir_all(&options.output_dir).await?;

    let mut written = Vec::with_capacity(files.len());
    for (name, bytes) in files {
        let path = options.output_dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        written.push(path);
    }

    info!(
        "Wrote {} report files to {}",
        written.len(),
        options.output_dir.display()
    );
    Ok(written)
}
