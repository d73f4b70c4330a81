//! Sheet reconstruction
//!
//! Pages are paired greedily from left to right: a page and the one right
//! after it form a sheet when their sizes match, possibly rotated a quarter
//! turn. A page that does not match its successor, or the last page of an odd
//! run, is an orphan sheet on its own. Only the next page is ever considered,
//! so a false match consumes both pages even if a better partner follows.

use crate::types::*;
use log::debug;

/// Whether two page sizes describe the same physical sheet size
///
/// Matches in the same orientation or turned a quarter turn, each side within
/// `tolerance_mm`.
pub fn dimensions_similar(a: PageDimensions, b: PageDimensions, tolerance_mm: f64) -> bool {
    let close = |x: f64, y: f64| (x - y).abs() <= tolerance_mm;

    (close(a.width_mm, b.width_mm) && close(a.height_mm, b.height_mm))
        || (close(a.width_mm, b.height_mm) && close(a.height_mm, b.width_mm))
}

/// Group a document's pages into sheets
///
/// `pages` is in document order; sheet page numbers are 1-based positions
/// in that slice. Every page lands in exactly one sheet.
pub fn pair_sheets(pages: &[PageDimensions], tolerance_mm: f64) -> Vec<Sheet> {
    let mut sheets = Vec::with_capacity(pages.len().div_ceil(2));
    let mut i = 0;

    while i + 1 < pages.len() {
        let format = pages[i].format_label();
        if dimensions_similar(pages[i], pages[i + 1], tolerance_mm) {
            debug!("pages {} and {} paired as {}", i + 1, i + 2, format);
            sheets.push(Sheet::paired(i + 1, format));
            i += 2;
        } else {
            debug!("page {} left alone as {}", i + 1, format);
            sheets.push(Sheet::orphan(i + 1, format));
            i += 1;
        }
    }

    if i + 1 == pages.len() {
        sheets.push(Sheet::orphan(i + 1, pages[i].format_label()));
    }

    sheets
}

/// Group already read pages into sheets
pub fn pair_pages(pages: &[Page], tolerance_mm: f64) -> Vec<Sheet> {
    let dimensions: Vec<PageDimensions> = pages.iter().map(|page| page.dimensions).collect();
    pair_sheets(&dimensions, tolerance_mm)
}
