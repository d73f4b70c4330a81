//! Page box resolution
//!
//! A page's physical size is its visible box: the `/CropBox` when present,
//! otherwise the `/MediaBox`. Both keys, as well as `/Rotate`, may be set on
//! the page itself or inherited from any `/Pages` node above it.

use crate::types::*;
use lopdf::{Document, Object, ObjectId};

/// Deepest page tree walked before giving up on a `/Parent` chain
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// Get the physical dimensions of every page, in page order
///
/// Fails on the first page whose geometry cannot be read; the caller gets the
/// 1-based page number with the error so the whole document can be rejected.
pub fn read_page_dimensions(
    doc: &Document,
) -> std::result::Result<Vec<PageDimensions>, DocumentReadError> {
    doc.get_pages()
        .into_iter()
        .enumerate()
        .map(|(position, (_, page_id))| {
            page_dimensions(doc, page_id).map_err(|e| DocumentReadError::Geometry {
                page: position + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Get the dimensions of a single page, rotation applied
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> Result<PageDimensions> {
    let page_box = match resolve_inherited(doc, page_id, b"CropBox")? {
        Some(crop_box) => crop_box,
        None => resolve_inherited(doc, page_id, b"MediaBox")?
            .ok_or_else(|| SheetsError::Geometry("page has no MediaBox".to_string()))?,
    };
    let [x0, y0, x1, y1] = parse_box(doc, page_box)?;
    let dimensions = PageDimensions::from_points(x1 - x0, y1 - y0);

    let rotation = match resolve_inherited(doc, page_id, b"Rotate")? {
        Some(rotate) => {
            let (_, rotate) = doc.dereference(rotate)?;
            let degrees = extract_number(rotate)
                .filter(|degrees| degrees.fract() == 0.0)
                .ok_or_else(|| {
                    SheetsError::Geometry("/Rotate is not a whole number of degrees".to_string())
                })?;
            normalize_rotation(degrees as i64)
        }
        None => 0,
    };

    if rotation == 90 || rotation == 270 {
        Ok(dimensions.rotated())
    } else {
        Ok(dimensions)
    }
}

/// Look up a key on the page, then on each ancestor through `/Parent`
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut current_id = page_id;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let dict = doc.get_dictionary(current_id)?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent) => {
                current_id = parent.as_reference().map_err(|_| {
                    SheetsError::Geometry("/Parent is not a reference".to_string())
                })?;
            }
            Err(_) => return Ok(None),
        }
    }

    Err(SheetsError::Geometry(format!(
        "page tree deeper than {MAX_PAGE_TREE_DEPTH} levels"
    )))
}

/// Parse a `[x0 y0 x1 y1]` box, following indirect references
fn parse_box(doc: &Document, obj: &Object) -> Result<[f64; 4]> {
    let (_, obj) = doc.dereference(obj)?;
    let array = obj
        .as_array()
        .map_err(|_| SheetsError::Geometry("page box is not an array".to_string()))?;

    if array.len() != 4 {
        return Err(SheetsError::Geometry(format!(
            "page box has {} elements, expected 4",
            array.len()
        )));
    }

    let mut coords = [0.0; 4];
    for (i, item) in array.iter().enumerate() {
        let (_, item) = doc.dereference(item)?;
        coords[i] = extract_number(item).ok_or_else(|| {
            SheetsError::Geometry(format!("page box element {i} is not a number"))
        })?;
    }
    Ok(coords)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Normalize a `/Rotate` value into 0..360
fn normalize_rotation(degrees: i64) -> i64 {
    degrees.rem_euclid(360)
}
