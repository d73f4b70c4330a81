//! Shared constants for page geometry and batch analysis
//!
//! This module centralizes the unit conversion and the fixed values used
//! while reading documents and emitting reports.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / POINTS_PER_INCH
}

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Round a length to 2 decimal places
///
/// Rounds the exact binary value, ties to even: 104.775 (stored just below)
/// gives 104.77.
#[inline]
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

// =============================================================================
// Pairing
// =============================================================================

/// Default similarity tolerance in millimeters (exact match after rounding)
pub const DEFAULT_TOLERANCE_MM: f64 = 0.0;

// =============================================================================
// Batch Discovery
// =============================================================================

/// File extension of analyzable documents (compared case-insensitively)
pub const PDF_EXTENSION: &str = "pdf";

/// File extension of archives unpacked before analysis
pub const ZIP_EXTENSION: &str = "zip";

/// Number of leading file name characters forming the batch code
pub const BATCH_CODE_LEN: usize = 2;

// =============================================================================
// Report
// =============================================================================

/// Prefix of the page inventory cell for documents that could not be read
pub const ERROR_MARKER: &str = "Error";

pub const PAGES_FILE: &str = "pages.csv";
pub const SHEETS_FILE: &str = "sheets.csv";
pub const DOCUMENT_STATS_FILE: &str = "document_stats.csv";
pub const SUMMARY_FILE: &str = "summary.csv";
pub const FORMATS_FILE: &str = "formats.csv";
pub const FORMAT_DISTRIBUTION_FILE: &str = "format_distribution.csv";
pub const JSON_REPORT_FILE: &str = "report.json";
pub const WORKBOOK_FILE: &str = "sheet_report.xlsx";
