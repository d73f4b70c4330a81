use crate::constants::{pt_to_mm, round_to_hundredths};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid page geometry: {0}")]
    Geometry(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SheetsError>;

/// Why a document could not be analyzed.
///
/// Stored in the page inventory in place of a page list; never aborts a batch.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentReadError {
    /// The file could not be read or is not a parsable PDF
    #[error("{0}")]
    Open(String),
    /// The document opened but one of its pages has no usable page box
    #[error("page {page}: {reason}")]
    Geometry { page: usize, reason: String },
}

/// Physical page size in millimeters, rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageDimensions {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageDimensions {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm: round_to_hundredths(width_mm),
            height_mm: round_to_hundredths(height_mm),
        }
    }

    /// Build from a page box size expressed in PDF points
    pub fn from_points(width_pt: f64, height_pt: f64) -> Self {
        Self::new(pt_to_mm(width_pt.abs()), pt_to_mm(height_pt.abs()))
    }

    /// Same size turned a quarter turn
    pub fn rotated(self) -> Self {
        Self {
            width_mm: self.height_mm,
            height_mm: self.width_mm,
        }
    }

    /// Sheet format label, each side rounded to a whole millimeter ("210×297 mm")
    pub fn format_label(self) -> String {
        format!(
            "{}×{} mm",
            self.width_mm.round_ties_even() as i64,
            self.height_mm.round_ties_even() as i64
        )
    }
}

impl fmt::Display for PageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always at least one decimal: "210.0 mm × 297.0 mm"
        write!(f, "{:?} mm × {:?} mm", self.width_mm, self.height_mm)
    }
}

/// A page of a successfully read document
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    /// 1-based position within the document
    pub index: usize,
    pub dimensions: PageDimensions,
}

/// A reconstructed physical sheet: two consecutive pages, or a lone orphan page
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sheet {
    pub first_page: usize,
    pub second_page: Option<usize>,
    /// Format label of the first page
    pub format: String,
}

impl Sheet {
    pub fn paired(first_page: usize, format: String) -> Self {
        Self {
            first_page,
            second_page: Some(first_page + 1),
            format,
        }
    }

    pub fn orphan(page: usize, format: String) -> Self {
        Self {
            first_page: page,
            second_page: None,
            format,
        }
    }

    pub fn is_orphan(&self) -> bool {
        self.second_page.is_none()
    }

    /// Page indices covered by this sheet, in order
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.first_page).chain(self.second_page)
    }
}
