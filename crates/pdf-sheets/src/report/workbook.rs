//! Spreadsheet rendering of the report
//!
//! One workbook with three worksheets:
//! - `Pages`: the page inventory
//! - `Sheets`: the sheet detail
//! - `Summary`: the format chart, per-document statistics, batch totals and
//!   global format counts, plus the table the chart is drawn from

use super::chart::FormatDistribution;
use crate::constants::ERROR_MARKER;
use crate::stats::BatchReport;
use crate::types::*;
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartType, ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook,
    Worksheet, XlsxError,
};

pub const PAGES_SHEET: &str = "Pages";
pub const SHEETS_SHEET: &str = "Sheets";
pub const SUMMARY_SHEET: &str = "Summary";

/// First column of the tables on the summary sheet, right of the chart
const STATS_COL: ColNum = 20;
const TOTALS_COL: ColNum = STATS_COL + 8;
const DISTRIBUTION_COL: ColNum = TOTALS_COL + 3;

const CHART_WIDTH: u32 = 1152;
const CHART_MIN_HEIGHT: u32 = 384;
const CHART_HEIGHT_PER_DOCUMENT: u32 = 38;

/// Hide zero-sized segments' labels
const DATA_LABEL_FORMAT: &str = "0;-0;;@";

/// Render the whole report as an `.xlsx` workbook
pub fn workbook_xlsx(report: &BatchReport) -> Result<Vec<u8>> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();

    write_pages_sheet(workbook.add_worksheet(), report, &styles)?;
    write_sheets_sheet(workbook.add_worksheet(), report, &styles)?;
    write_summary_sheet(workbook.add_worksheet(), report, &styles)?;

    Ok(workbook.save_to_buffer()?)
}

struct Styles {
    header: Format,
    title: Format,
    cell: Format,
}

impl Styles {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            title: Format::new().set_bold().set_font_size(14),
            cell: Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
        }
    }

    fn table_header(&self) -> Format {
        self.cell.clone().set_bold()
    }
}

fn write_pages_sheet(sheet: &mut Worksheet, report: &BatchReport, styles: &Styles) -> Result<()> {
    sheet.set_name(PAGES_SHEET)?;

    sheet.write_string_with_format(0, 0, "file", &styles.header)?;
    sheet.write_string_with_format(0, 1, "pages", &styles.header)?;
    for n in 1..=report.max_page_count() {
        sheet.write_string_with_format(0, col(n + 1)?, format!("page {n}"), &styles.header)?;
    }

    for (i, entry) in report.inventory.iter().enumerate() {
        let r = row(i + 1)?;
        sheet.write_string(r, 0, &entry.file_name)?;
        match &entry.pages {
            Ok(pages) => {
                sheet.write_number(r, 1, pages.len() as f64)?;
                for (j, page) in pages.iter().enumerate() {
                    sheet.write_string(r, col(j + 2)?, page.dimensions.to_string())?;
                }
            }
            Err(e) => {
                sheet.write_string(r, 1, format!("{ERROR_MARKER}: {e}"))?;
            }
        }
    }

    sheet.autofit();
    Ok(())
}

fn write_sheets_sheet(sheet: &mut Worksheet, report: &BatchReport, styles: &Styles) -> Result<()> {
    sheet.set_name(SHEETS_SHEET)?;

    let header = ["file", "first page", "second page", "format", "sheets in file"];
    for (j, label) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col(j)?, *label, &styles.header)?;
    }

    for (i, entry) in report.sheets.iter().enumerate() {
        let r = row(i + 1)?;
        let detail = &entry.sheet;
        sheet.write_string(r, 0, &entry.file_name)?;
        sheet.write_string(r, 1, format!("page {}", detail.first_page))?;
        if let Some(second) = detail.second_page {
            sheet.write_string(r, 2, format!("page {second}"))?;
        }
        sheet.write_string(r, 3, &detail.format)?;
        sheet.write_number(r, 4, entry.sheets_in_document as f64)?;
    }

    sheet.autofit();
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, report: &BatchReport, styles: &Styles) -> Result<()> {
    sheet.set_name(SUMMARY_SHEET)?;
    let header = styles.table_header();

    // Per-document statistics
    sheet.write_string_with_format(0, STATS_COL, "Statistics per document", &styles.title)?;
    let columns = [
        "file",
        "pages",
        "sheets",
        "paired sheets",
        "orphan sheets",
        "formats",
    ];
    for (j, label) in columns.iter().enumerate() {
        sheet.write_string_with_format(1, STATS_COL + col(j)?, *label, &header)?;
    }
    for (i, stats) in report.documents.iter().enumerate() {
        let r = row(i + 2)?;
        sheet.write_string_with_format(r, STATS_COL, &stats.file_name, &styles.cell)?;
        let counts = [
            stats.page_count,
            stats.sheet_count,
            stats.paired_count(),
            stats.orphan_count,
        ];
        for (j, count) in counts.into_iter().enumerate() {
            sheet.write_number_with_format(r, STATS_COL + col(j + 1)?, count as f64, &styles.cell)?;
        }
        sheet.write_string_with_format(r, STATS_COL + 5, stats.formats_summary(), &styles.cell)?;
    }

    // Batch totals
    let summary = &report.summary;
    sheet.write_string_with_format(0, TOTALS_COL, "Batch summary", &styles.title)?;
    let totals = [
        ("Total pages", summary.total_pages),
        ("Total sheets", summary.total_sheets),
        ("Total orphan sheets", summary.total_orphans),
    ];
    for (i, (label, value)) in totals.into_iter().enumerate() {
        let r = row(i + 1)?;
        sheet.write_string_with_format(r, TOTALS_COL, label, &styles.cell)?;
        sheet.write_number_with_format(r, TOTALS_COL + 1, value as f64, &styles.cell)?;
    }

    // Global format counts
    let formats_row = row(totals.len() + 3)?;
    sheet.write_string_with_format(formats_row, TOTALS_COL, "Formats across the batch", &styles.title)?;
    sheet.write_string_with_format(formats_row + 1, TOTALS_COL, "format", &header)?;
    sheet.write_string_with_format(formats_row + 1, TOTALS_COL + 1, "count", &header)?;
    for (i, entry) in summary.formats_by_frequency().into_iter().enumerate() {
        let r = formats_row + 2 + row(i)?;
        sheet.write_string_with_format(r, TOTALS_COL, entry.format, &styles.cell)?;
        sheet.write_number_with_format(r, TOTALS_COL + 1, entry.count as f64, &styles.cell)?;
    }

    let distribution = FormatDistribution::from_report(report);
    write_distribution(sheet, &distribution, &header)?;
    if let Some(chart) = distribution_chart(&distribution)? {
        sheet.insert_chart(0, 0, &chart)?;
    }

    sheet.autofit();
    Ok(())
}

/// Documents × formats table the chart reads from, header on row 1
fn write_distribution(
    sheet: &mut Worksheet,
    distribution: &FormatDistribution,
    header: &Format,
) -> Result<()> {
    sheet.write_string_with_format(1, DISTRIBUTION_COL, "file", header)?;
    for (j, format) in distribution.formats.iter().enumerate() {
        sheet.write_string_with_format(1, DISTRIBUTION_COL + col(j + 1)?, format, header)?;
    }

    for (i, entry) in distribution.rows.iter().enumerate() {
        let r = row(i + 2)?;
        sheet.write_string(r, DISTRIBUTION_COL, &entry.file_name)?;
        for (j, count) in entry.counts.iter().enumerate() {
            sheet.write_number(r, DISTRIBUTION_COL + col(j + 1)?, *count as f64)?;
        }
    }
    Ok(())
}

/// Stacked horizontal bars: one bar per document, one segment per format
fn distribution_chart(distribution: &FormatDistribution) -> Result<Option<Chart>> {
    if distribution.rows.is_empty() || distribution.formats.is_empty() {
        return Ok(None);
    }

    let header_row: RowNum = 1;
    let first_row: RowNum = 2;
    let last_row = first_row + row(distribution.rows.len() - 1)?;

    let mut labels = ChartDataLabel::new();
    labels.show_value().set_num_format(DATA_LABEL_FORMAT);

    let mut chart = Chart::new(ChartType::BarStacked);
    chart.title().set_name("Sheet formats per PDF file");

    for j in 0..distribution.formats.len() {
        let values_col = DISTRIBUTION_COL + col(j + 1)?;
        chart
            .add_series()
            .set_name((SUMMARY_SHEET, header_row, values_col))
            .set_categories((
                SUMMARY_SHEET,
                first_row,
                DISTRIBUTION_COL,
                last_row,
                DISTRIBUTION_COL,
            ))
            .set_values((SUMMARY_SHEET, first_row, values_col, last_row, values_col))
            .set_data_label(&labels);
    }

    let documents = u32::try_from(distribution.rows.len()).unwrap_or(u32::MAX);
    chart
        .set_width(CHART_WIDTH)
        .set_height(CHART_MIN_HEIGHT.max(documents.saturating_mul(CHART_HEIGHT_PER_DOCUMENT)));

    Ok(Some(chart))
}

fn row(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError.into())
}

fn col(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError.into())
}
