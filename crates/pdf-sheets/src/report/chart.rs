//! Data behind the per-document format chart

use crate::stats::BatchReport;

/// Sheet counts per document and format, ready for a stacked bar chart
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatDistribution {
    /// One segment per format, most frequent across the batch first
    pub formats: Vec<String>,
    /// One bar per document, in report order
    pub rows: Vec<DistributionRow>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionRow {
    pub file_name: String,
    /// Count for each entry of `FormatDistribution::formats`, 0 when absent
    pub counts: Vec<usize>,
}

impl FormatDistribution {
    pub fn from_report(report: &BatchReport) -> Self {
        let formats: Vec<String> = report
            .summary
            .formats_by_frequency()
            .into_iter()
            .map(|entry| entry.format)
            .collect();

        let rows = report
            .documents
            .iter()
            .map(|stats| DistributionRow {
                file_name: stats.file_name.clone(),
                counts: formats
                    .iter()
                    .map(|format| stats.formats.get(format).copied().unwrap_or(0))
                    .collect(),
            })
            .collect();

        Self { formats, rows }
    }
}
